use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use crate::models::url::ClickEvent;

#[derive(Deserialize, Serialize, Validate)]
pub struct ShortenRequest {
    #[validate(custom(
        function = validate_http_url,
        message = "URL must use the http or https scheme"
    ))]
    pub url: String,
}

/// Accepts only well-formed `http`/`https` URLs.
fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::new("blank_url"));
    }
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("invalid_url")),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub click_count: u64,
    pub created_at: DateTime<Utc>,
    pub click_history: Vec<ClickEvent>,
}
