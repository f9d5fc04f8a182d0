use actix_web::web;

use crate::handlers::health_handlers::health_check;
use crate::handlers::url_handlers::{
    create_short_url, get_url_stats, not_found_error, redirect_to_url,
};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/shorten", web::post().to(create_short_url))
            .route("/stats/{code}", web::get().to(get_url_stats))
            .route("/health", web::get().to(health_check))
            .route("/error", web::get().to(not_found_error)),
    );
    // Define redirect route at the root level
    cfg.route("/{code}", web::get().to(redirect_to_url));
}
