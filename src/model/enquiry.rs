use super::{check_email, check_reference, EnumRule, PlanTier, Resource};
use crate::error::AppError;
use crate::store::Collection;
use serde::{Deserialize, Serialize};

string_enum!(AdjustmentType {
    None => "none",
    Minor => "minor",
    Major => "major",
    Custom => "custom",
});

string_enum!(
    /// Follow-up state. Any transition is allowed.
    EnquiryStatus {
        Pending => "pending",
        Contacted => "contacted",
        Closed => "closed",
    }
);

impl Default for EnquiryStatus {
    fn default() -> Self {
        EnquiryStatus::Pending
    }
}

/// A visitor's request about a product, submitted through the public form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// `_id` of the enquired product.
    pub product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanTier>,
    pub adjustment_type: AdjustmentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: EnquiryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Resource for Enquiry {
    const COLLECTION: Collection = Collection::Enquiries;
    const LABEL: &'static str = "Enquiry";
    const PLURAL: &'static str = "Enquiries";
    const PUBLIC_READ: bool = false;
    const PUBLIC_CREATE: bool = true;
    const REQUIRED: &'static [&'static str] = &["name", "email", "phone", "product", "adjustmentType"];
    const ENUMS: &'static [EnumRule] = &[
        EnumRule {
            field: "plan",
            allowed: PlanTier::VALUES,
        },
        EnumRule {
            field: "adjustmentType",
            allowed: AdjustmentType::VALUES,
        },
        EnumRule {
            field: "status",
            allowed: EnquiryStatus::VALUES,
        },
    ];

    fn check(&self) -> Result<(), AppError> {
        check_email("email", &self.email)?;
        check_reference("product", &self.product)
    }
}
