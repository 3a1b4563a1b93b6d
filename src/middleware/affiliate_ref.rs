// Referral attribution middleware
// Persists the `ref` query parameter as the affiliate cookie on page requests

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use crate::{app::AppState, app_config::AffiliateConfig};

/// Path prefixes never carrying attribution: static assets and API routes.
const EXCLUDED_PREFIXES: &[&str] = &["/_next/static", "/_next/image", "/favicon.ico", "/api/"];

pub fn is_excluded_path(path: &str) -> bool {
    EXCLUDED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Non-empty `ref` value from a raw query string. The first occurrence wins.
pub fn referral_code(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "ref")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

pub fn attribution_cookie(config: &AffiliateConfig, code: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), code))
        .path("/")
        .max_age(time::Duration::days(config.cookie_max_age_days))
        .same_site(SameSite::Lax)
        .http_only(false)
        .build()
}

/// Sets the attribution cookie when a page request carries `?ref=`.
/// The request itself is forwarded untouched.
pub async fn affiliate_attribution(
    State(app_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_excluded_path(request.uri().path()) {
        return next.run(request).await;
    }

    let code = referral_code(request.uri().query());
    let response = next.run(request).await;

    match code {
        Some(code) => {
            debug!("Recording referral code {}", code);
            let jar = CookieJar::new().add(attribution_cookie(&app_state.config.affiliate, code));
            (jar, response).into_response()
        },
        None => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_paths() {
        assert!(is_excluded_path("/api/affiliates/check"));
        assert!(is_excluded_path("/_next/static/chunks/app.js"));
        assert!(is_excluded_path("/_next/image"));
        assert!(is_excluded_path("/favicon.ico"));

        assert!(!is_excluded_path("/"));
        assert!(!is_excluded_path("/home"));
        assert!(!is_excluded_path("/api"));
        assert!(!is_excluded_path("/tarification"));
    }

    #[test]
    fn test_referral_code() {
        assert_eq!(referral_code(Some("ref=AFF9")), Some("AFF9".to_string()));
        assert_eq!(referral_code(Some("utm=x&ref=promo%201")), Some("promo 1".to_string()));
        assert_eq!(referral_code(Some("ref=A&ref=B")), Some("A".to_string()));
        assert_eq!(referral_code(Some("ref=")), None);
        assert_eq!(referral_code(Some("other=1")), None);
        assert_eq!(referral_code(None), None);
    }

    #[test]
    fn test_attribution_cookie_attributes() {
        let cookie = attribution_cookie(&AffiliateConfig::default(), "AFF9".to_string());
        let rendered = cookie.to_string();

        assert!(rendered.starts_with("affiliate_ref=AFF9"));
        assert!(rendered.contains("Max-Age=2592000"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(!rendered.contains("HttpOnly"));
    }
}
