//! Entity records and the per-entity rules the CRUD layer enforces.

/// Declares a string-valued enum together with its list of wire values.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant,)+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($value),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }
    };
}
pub(crate) use string_enum;

mod application;
mod enquiry;
mod offer;
mod product;

pub use application::{Application, ApplicationStatus, Experience, Role};
pub use enquiry::{AdjustmentType, Enquiry, EnquiryStatus};
pub use offer::{Offer, OfferProduct};
pub use product::{slugify, Category, Feature, PlanTier, PricingOption, Product, Seo};

use crate::error::AppError;
use crate::store::Collection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Closed set of string values allowed at `field`.
///
/// `field` is a dotted path; a segment ending in `[]` applies the rule to every
/// element of that array, e.g. `pricingOptions[].label`.
#[derive(Clone, Copy, Debug)]
pub struct EnumRule {
    pub field: &'static str,
    pub allowed: &'static [&'static str],
}

/// A persisted entity type: its collection, access policy and validation rules.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Human label used in messages, e.g. "Product".
    const LABEL: &'static str;
    const PLURAL: &'static str;
    /// Whether list/get are open to anonymous callers.
    const PUBLIC_READ: bool;
    /// Whether create is open to anonymous callers (public forms).
    const PUBLIC_CREATE: bool;
    /// Checked in order; the first missing one is reported.
    const REQUIRED: &'static [&'static str];
    const ENUMS: &'static [EnumRule];

    /// Fill derived fields before validation.
    fn normalize(_fields: &mut Map<String, Value>) {}

    /// Invariants that cannot be expressed by the field types.
    fn check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub(crate) fn check_percentage(field: &str, value: f64) -> Result<(), AppError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::Validation(format!("{} must be between 0 and 100", field)));
    }
    Ok(())
}

pub(crate) fn check_email(field: &str, value: &str) -> Result<(), AppError> {
    if !value.contains('@') || value.len() < 3 {
        return Err(AppError::Validation(format!("{} must be a valid email", field)));
    }
    Ok(())
}

pub(crate) fn check_reference(field: &str, value: &str) -> Result<(), AppError> {
    if uuid::Uuid::parse_str(value).is_err() {
        return Err(AppError::Validation(format!("{} must be a valid identifier", field)));
    }
    Ok(())
}
