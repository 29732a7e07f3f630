//! CORS layer assembled from the shares API configuration.

use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use droplink_core::config::app::CorsConfig;

/// Wildcard entry in a CORS allow-list.
const WILDCARD: &str = "*";

/// Builds the CORS layer. A `"*"` entry in origins or headers opens that
/// allow-list entirely; unparseable list entries are dropped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(parse_list::<Method>(&config.allowed_methods))
        .max_age(Duration::from_secs(config.max_age_seconds));

    let layer = if has_wildcard(&config.allowed_origins) {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parse_list::<HeaderValue>(&config.allowed_origins))
    };

    if has_wildcard(&config.allowed_headers) {
        layer.allow_headers(Any)
    } else {
        layer.allow_headers(parse_list::<HeaderName>(&config.allowed_headers))
    }
}

fn has_wildcard(values: &[String]) -> bool {
    values.iter().any(|value| value == WILDCARD)
}

fn parse_list<T: FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|value| value.parse().ok()).collect()
}
