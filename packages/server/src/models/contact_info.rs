use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::contact_info;
use crate::error::AppError;

use super::shared::{validate_optional_text, validate_optional_url};

/// Full replacement of the contact details. Omitted fields are stored as null.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(default)]
pub struct UpsertContactInfoRequest {
    #[schema(example = "info@example.com")]
    pub email: Option<String>,
    #[schema(example = "+1 555 0100")]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Contact details. `id` and `updated_at` are null until first saved.
#[derive(Serialize, Default, utoipa::ToSchema)]
pub struct ContactInfoResponse {
    pub id: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<contact_info::Model> for ContactInfoResponse {
    fn from(m: contact_info::Model) -> Self {
        Self {
            id: Some(m.id),
            email: m.email,
            phone: m.phone,
            address: m.address,
            facebook_url: m.facebook_url,
            twitter_url: m.twitter_url,
            instagram_url: m.instagram_url,
            linkedin_url: m.linkedin_url,
            updated_at: Some(m.updated_at),
        }
    }
}

pub fn validate_upsert_contact_info(req: &UpsertContactInfoRequest) -> Result<(), AppError> {
    validate_optional_text(req.email.as_deref(), "email", 256)?;
    if let Some(ref email) = req.email
        && !email.trim().is_empty()
        && !email.contains('@')
    {
        return Err(AppError::Validation("email must be an email address".into()));
    }
    validate_optional_text(req.phone.as_deref(), "phone", 64)?;
    for (field, url) in [
        ("facebook_url", &req.facebook_url),
        ("twitter_url", &req.twitter_url),
        ("instagram_url", &req.instagram_url),
        ("linkedin_url", &req.linkedin_url),
    ] {
        // Blank links clear the field.
        validate_optional_url(url.as_deref().filter(|u| !u.trim().is_empty()), field)?;
    }
    Ok(())
}
