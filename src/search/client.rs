//! HTTP search client with outcome classification.

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{SEARCH_TIMEOUT, search_url};
use crate::model::types::{DISPLAY_LIMIT, SearchResult};

/// Why a fetch failed. Callers show distinct messages per variant, so these
/// must never be collapsed into one generic error.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("cannot reach search backend at {endpoint} - is SearXNG running?")]
    Connect { endpoint: String },
    #[error("search timed out after {}s", SEARCH_TIMEOUT.as_secs())]
    Timeout,
    #[error("search backend returned HTTP {0}")]
    Status(u16),
    #[error("could not parse search response")]
    Format,
}

/// Resolved fetch: a capped, 1-indexed result list, or a distinct zero-match
/// outcome so the UI can notify without treating it as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Results(Vec<SearchResult>),
    Empty,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl SearchClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// One GET per submitted query. Blocks up to the configured timeout;
    /// run it off the input thread.
    pub fn fetch(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        let url = search_url(&self.endpoint, query);
        debug!(%url, "search request");
        let resp = self.http.get(&url).send().map_err(|e| self.classify(e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        let body = resp.text().map_err(|e| self.classify(e))?;
        parse_results(&body)
    }

    fn classify(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::Timeout
        } else if err.is_connect() {
            SearchError::Connect {
                endpoint: self.endpoint.clone(),
            }
        } else if err.is_decode() || err.is_body() {
            SearchError::Format
        } else {
            // Remaining send-phase failures read as "backend unreachable".
            SearchError::Connect {
                endpoint: self.endpoint.clone(),
            }
        }
    }
}

/// Parses a JSON body into an outcome: truncates to [`DISPLAY_LIMIT`],
/// assigns 1-based indices, and strips emphasis markup from snippets.
pub fn parse_results(body: &str) -> Result<SearchOutcome, SearchError> {
    let parsed: SearchResponse = serde_json::from_str(body).map_err(|_| SearchError::Format)?;
    if parsed.results.is_empty() {
        return Ok(SearchOutcome::Empty);
    }
    let results = parsed
        .results
        .into_iter()
        .take(DISPLAY_LIMIT)
        .enumerate()
        .map(|(i, raw)| SearchResult {
            index: i + 1,
            title: raw.title,
            url: raw.url,
            snippet: strip_emphasis(&raw.content),
        })
        .collect();
    Ok(SearchOutcome::Results(results))
}

/// SearXNG wraps matched terms in `<b>` tags inside JSON snippets.
pub fn strip_emphasis(text: &str) -> String {
    text.replace("<b>", "").replace("</b>", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_results_with_indices_and_clean_snippets() {
        let body = r#"{"results":[
            {"title":"Foo","url":"http://a","content":"about <b>foo</b> things"},
            {"title":"Bar","url":"http://b","content":"more foo"}
        ]}"#;
        let outcome = parse_results(body).unwrap();
        let SearchOutcome::Results(results) = outcome else {
            panic!("expected results");
        };
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].index, 1);
        assert_eq!(results[0].title, "Foo");
        assert_eq!(results[0].snippet, "about foo things");
        assert_eq!(results[1].index, 2);
        assert_eq!(results[1].url, "http://b");
    }

    #[test]
    fn truncates_to_display_limit() {
        let entries: Vec<String> = (0..15)
            .map(|i| format!(r#"{{"title":"t{i}","url":"http://x/{i}","content":""}}"#))
            .collect();
        let body = format!(r#"{{"results":[{}]}}"#, entries.join(","));
        let SearchOutcome::Results(results) = parse_results(&body).unwrap() else {
            panic!("expected results");
        };
        assert_eq!(results.len(), DISPLAY_LIMIT);
        assert_eq!(results.last().unwrap().index, DISPLAY_LIMIT);
    }

    #[test]
    fn empty_results_is_a_distinct_outcome() {
        assert_eq!(
            parse_results(r#"{"results":[]}"#).unwrap(),
            SearchOutcome::Empty
        );
        // Missing array entirely also counts as zero matches, not an error.
        assert_eq!(parse_results("{}").unwrap(), SearchOutcome::Empty);
    }

    #[test]
    fn malformed_body_is_a_format_error() {
        assert!(matches!(
            parse_results("<html>not json</html>"),
            Err(SearchError::Format)
        ));
    }

    #[test]
    fn missing_fields_default_to_empty_strings() {
        let body = r#"{"results":[{"url":"http://a"}]}"#;
        let SearchOutcome::Results(results) = parse_results(body).unwrap() else {
            panic!("expected results");
        };
        assert_eq!(results[0].title, "");
        assert_eq!(results[0].display_title(), "(untitled)");
        assert_eq!(results[0].snippet, "");
    }
}
