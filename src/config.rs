//! Endpoint resolution and request URL construction.

use std::time::Duration;

/// Default SearXNG base URL for a stock local install.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8888";

/// Client-side timeout for one search request.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Precedence: explicit flag, then SEARX_URL (env or .env), then default.
pub fn resolve_endpoint(flag: Option<&str>) -> String {
    flag.map(str::to_string)
        .or_else(|| dotenvy::var("SEARX_URL").ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
        .trim_end_matches('/')
        .to_string()
}

pub fn search_url(endpoint: &str, query: &str) -> String {
    format!(
        "{}/search?q={}&format=json",
        endpoint.trim_end_matches('/'),
        urlencoding::encode(query)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_and_trailing_slash_is_trimmed() {
        let endpoint = resolve_endpoint(Some("http://10.0.0.2:8080/"));
        assert_eq!(endpoint, "http://10.0.0.2:8080");
    }

    #[test]
    fn search_url_encodes_the_query() {
        let url = search_url("http://localhost:8888", "rust async & await");
        assert_eq!(
            url,
            "http://localhost:8888/search?q=rust%20async%20%26%20await&format=json"
        );
    }
}
