use actix_web::{HttpRequest, HttpResponse, Responder, Result, http, web};
use log::{info, warn};
use validator::Validate;

use crate::state::app_state::AppState;
use crate::structs::url_request::{ShortenRequest, ShortenResponse, StatsResponse};
use crate::utils::client_ip::client_ip;

/// Create a shortened URL
pub async fn create_short_url(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<ShortenRequest>,
) -> Result<impl Responder> {
    info!("Received shorten request for URL: {}", req.url);

    // Validate the URL
    if let Err(errors) = req.validate() {
        warn!("Invalid URL format: {}", req.url);
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let mapping = app_state.store.shorten(&req.url);

    // Construct the short URL
    let short_url = format!("{}/{}", app_state.config.base_url, mapping.short_code);

    let response = ShortenResponse {
        short_code: mapping.short_code,
        short_url,
        original_url: mapping.original_url,
        created_at: mapping.created_at,
    };

    Ok(HttpResponse::Created().json(response))
}

/// Redirect to original URL
pub async fn redirect_to_url(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();
    info!("Redirect request for short code: {}", code);

    match app_state.store.lookup(&code) {
        Some(mapping) => {
            // Get optional user agent and visitor IP
            let user_agent = req
                .headers()
                .get(http::header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let ip_address = client_ip(&req);

            app_state.store.record_click(&code, user_agent, ip_address);
            info!("Redirecting {} to {}", code, mapping.original_url);

            Ok(HttpResponse::Found()
                .append_header((http::header::LOCATION, mapping.original_url))
                .finish())
        }
        None => {
            warn!("Short code not found: {}", code);
            Ok(HttpResponse::Found()
                .append_header((http::header::LOCATION, "/api/error"))
                .finish())
        }
    }
}

/// Get click statistics for a specific short code
pub async fn get_url_stats(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();
    info!("Stats request for short code: {}", code);

    match app_state.store.lookup(&code) {
        Some(mapping) => {
            let response = StatsResponse {
                short_code: mapping.short_code,
                original_url: mapping.original_url,
                click_count: mapping.click_count,
                created_at: mapping.created_at,
                click_history: mapping.click_history,
            };

            Ok(HttpResponse::Ok().json(response))
        }
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "URL not found"
        }))),
    }
}

/// Landing endpoint for redirects of unknown short codes
pub async fn not_found_error() -> impl Responder {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Short URL not found"
    }))
}
