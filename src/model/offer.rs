use super::{check_percentage, check_reference, EnumRule, Resource};
use crate::error::AppError;
use crate::store::Collection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferProduct {
    pub product_id: String,
    pub discount: f64,
}

/// Promotional campaign. `active` is toggled by hand; reaching `expires_at`
/// does not change it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub title: String,
    pub banner_image: String,
    #[serde(default)]
    pub active: bool,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub products: Vec<OfferProduct>,
}

impl Resource for Offer {
    const COLLECTION: Collection = Collection::Offers;
    const LABEL: &'static str = "Offer";
    const PLURAL: &'static str = "Offers";
    const PUBLIC_READ: bool = true;
    const PUBLIC_CREATE: bool = false;
    const REQUIRED: &'static [&'static str] = &["title", "bannerImage", "expiresAt"];
    const ENUMS: &'static [EnumRule] = &[];

    fn check(&self) -> Result<(), AppError> {
        for (i, p) in self.products.iter().enumerate() {
            check_reference(&format!("products[{}].productId", i), &p.product_id)?;
            check_percentage(&format!("products[{}].discount", i), p.discount)?;
        }
        Ok(())
    }
}
