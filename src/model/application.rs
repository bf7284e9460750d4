use super::{check_email, EnumRule, Resource};
use crate::error::AppError;
use crate::store::Collection;
use serde::{Deserialize, Serialize};

string_enum!(Role {
    FrontendDeveloper => "frontend-developer",
    BackendDeveloper => "backend-developer",
    FullstackDeveloper => "fullstack-developer",
    UiUxDesigner => "ui-ux-designer",
    SeoSpecialist => "seo-specialist",
    ContentWriter => "content-writer",
});

string_enum!(Experience {
    Fresher => "fresher",
    OneToThreeYears => "1-3-years",
    ThreeToFiveYears => "3-5-years",
    FivePlusYears => "5-plus-years",
});

string_enum!(ApplicationStatus {
    Pending => "pending",
    Selected => "selected",
    Declined => "declined",
});

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Pending
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    pub experience: Experience,
    /// Link to the uploaded resume.
    pub resume: String,
    pub cover_letter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
}

impl Resource for Application {
    const COLLECTION: Collection = Collection::Applications;
    const LABEL: &'static str = "Application";
    const PLURAL: &'static str = "Applications";
    const PUBLIC_READ: bool = false;
    const PUBLIC_CREATE: bool = true;
    const REQUIRED: &'static [&'static str] = &["name", "email", "role", "experience", "resume", "coverLetter"];
    const ENUMS: &'static [EnumRule] = &[
        EnumRule {
            field: "role",
            allowed: Role::VALUES,
        },
        EnumRule {
            field: "experience",
            allowed: Experience::VALUES,
        },
        EnumRule {
            field: "status",
            allowed: ApplicationStatus::VALUES,
        },
    ];

    fn check(&self) -> Result<(), AppError> {
        check_email("email", &self.email)
    }
}
