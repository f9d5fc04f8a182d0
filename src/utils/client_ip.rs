use actix_web::HttpRequest;

/// Resolve the client address for click tracking.
///
/// Prefers the first `X-Forwarded-For` entry when present and non-empty,
/// then falls back to the peer address of the connection.
pub fn client_ip(req: &HttpRequest) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
