use super::{check_percentage, EnumRule, Resource};
use crate::error::AppError;
use crate::store::Collection;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

string_enum!(Category {
    Ecommerce => "ecommerce",
    Portfolio => "portfolio",
    Business => "business",
    Blog => "blog",
    LandingPage => "landing-page",
});

string_enum!(
    /// Pricing plan tier, shared by products and enquiries.
    PlanTier {
        Base => "base",
        Plus => "plus",
        Pro => "pro",
        Ultimate => "ultimate",
    }
);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOption {
    pub label: PlanTier,
    pub price: f64,
    /// Percentage off `price`.
    #[serde(default)]
    pub discount: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub category: Category,
    pub features: Vec<Feature>,
    pub pricing_options: Vec<PricingOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub seo: Seo,
}

/// Lowercase, collapse every run of non-alphanumerics into `-`, trim dashes.
pub fn slugify(input: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));
    re.replace_all(&input.to_lowercase(), "-").trim_matches('-').to_string()
}

impl Resource for Product {
    const COLLECTION: Collection = Collection::Products;
    const LABEL: &'static str = "Product";
    const PLURAL: &'static str = "Products";
    const PUBLIC_READ: bool = true;
    const PUBLIC_CREATE: bool = false;
    const REQUIRED: &'static [&'static str] = &[
        "title",
        "shortDescription",
        "longDescription",
        "category",
        "features",
        "pricingOptions",
    ];
    const ENUMS: &'static [EnumRule] = &[
        EnumRule {
            field: "category",
            allowed: Category::VALUES,
        },
        EnumRule {
            field: "pricingOptions[].label",
            allowed: PlanTier::VALUES,
        },
    ];

    /// Derive `seo.slug` from the title when absent; normalize a given one.
    fn normalize(fields: &mut Map<String, Value>) {
        let title = fields.get("title").and_then(Value::as_str).map(str::to_string);
        let seo = fields
            .entry("seo")
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(seo) = seo else {
            return;
        };
        let given = seo
            .get("slug")
            .and_then(Value::as_str)
            .map(slugify)
            .filter(|s| !s.is_empty());
        if let Some(slug) = given.or_else(|| title.as_deref().map(slugify)) {
            seo.insert("slug".into(), Value::String(slug));
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.pricing_options.is_empty() {
            return Err(AppError::Validation("pricingOptions must not be empty".into()));
        }
        for (i, option) in self.pricing_options.iter().enumerate() {
            if !option.price.is_finite() || option.price < 0.0 {
                return Err(AppError::Validation(format!(
                    "pricingOptions[{}].price must be a non-negative number",
                    i
                )));
            }
            check_percentage(&format!("pricingOptions[{}].discount", i), option.discount)?;
        }
        if self.seo.slug.is_empty() {
            return Err(AppError::Validation("seo.slug could not be derived from title".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Shop A"), "shop-a");
        assert_eq!(slugify("  Bakery & Café -- Pro!  "), "bakery-caf-pro");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn enum_values_round_trip_through_serde() {
        for v in Category::VALUES {
            let c: Category = serde_json::from_value(json!(v)).unwrap();
            assert_eq!(c.as_str(), *v);
        }
        for v in PlanTier::VALUES {
            let t: PlanTier = serde_json::from_value(json!(v)).unwrap();
            assert_eq!(t.as_str(), *v);
        }
    }

    #[test]
    fn normalize_derives_slug_from_title() {
        let mut fields = json!({ "title": "Shop A" }).as_object().unwrap().clone();
        Product::normalize(&mut fields);
        assert_eq!(fields["seo"]["slug"], json!("shop-a"));

        let mut fields = json!({ "title": "Shop A", "seo": { "slug": "My Custom Slug" } })
            .as_object()
            .unwrap()
            .clone();
        Product::normalize(&mut fields);
        assert_eq!(fields["seo"]["slug"], json!("my-custom-slug"));
    }
}
