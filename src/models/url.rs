use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored short-code-to-URL mapping, together with its click history.
///
/// The short code and original URL never change after creation; clicks are
/// the only mutation.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UrlMapping {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: u64,
    pub click_history: Vec<ClickEvent>,
}

impl UrlMapping {
    pub fn new(short_code: String, original_url: String) -> Self {
        Self {
            short_code,
            original_url,
            created_at: Utc::now(),
            click_count: 0,
            click_history: Vec::new(),
        }
    }

    /// Record one redirect access. Keeps the click counter in step with the
    /// history length.
    pub fn record_click(&mut self, user_agent: Option<String>, ip_address: String) {
        self.click_count += 1;
        self.click_history
            .push(ClickEvent::new(user_agent, ip_address));
    }
}

/// One redirect access to a shortened URL.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub ip_address: String,
}

impl ClickEvent {
    pub fn new(user_agent: Option<String>, ip_address: String) -> Self {
        Self {
            timestamp: Utc::now(),
            user_agent,
            ip_address,
        }
    }
}
