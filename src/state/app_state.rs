use crate::config::AppConfig;
use crate::store::url_store::UrlStore;

/// Shared application state, injected into handlers via `web::Data`.
pub struct AppState {
    pub store: UrlStore,
    pub config: AppConfig,
}
