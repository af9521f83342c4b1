use std::io::Read;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::core::params::ClientConfig;
use crate::core::select::SearchOutcome;
use crate::error::{Error, Result};
use crate::types::{RawCandidate, RawDetail};

const SEARCH_FIELDS: [&str; 6] = ["id", "name", "alternativeName", "year", "poster", "rating"];

/// Read-only view of the remote movie catalog.
///
/// Implementations never panic or retry; every failure comes back as an
/// [`Error`] and the caller decides what to do with it.
pub trait CatalogSource {
    /// Search titles by name. Zero matches is `SearchOutcome::Empty`, not an error.
    fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome>;

    /// Fetch the full record for one identifier. A missing title is `Error::NotFound`.
    fn fetch_detail(&self, id: u64) -> Result<RawDetail>;
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    docs: Option<Vec<Option<RawCandidate>>>,
}

/// Blocking client for the kinopoisk.dev REST API.
pub struct KinopoiskClient {
    http_client: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for KinopoiskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KinopoiskClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl KinopoiskClient {
    pub fn new(config: &ClientConfig) -> Self {
        let http_client = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();

        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn search_url(&self, query: &str, limit: usize) -> String {
        let limit = limit.to_string();
        let mut params: Vec<(&str, &str)> = vec![("query", query), ("limit", limit.as_str())];
        params.extend(SEARCH_FIELDS.iter().map(|f| ("selectFields", *f)));
        request_url(&format!("{}/movie/search", self.base_url), &params)
    }

    pub fn detail_url(&self, id: u64) -> String {
        format!("{}/movie/{}", self.base_url, id)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .http_client
            .get(url)
            .set("X-API-KEY", &self.api_key)
            .set("Accept", "application/json")
            .call()
            .map_err(map_ureq_error)?;

        let mut body = String::new();
        response
            .into_reader()
            .read_to_string(&mut body)
            .map_err(map_io_error)?;
        serde_json::from_str(&body).map_err(|e| Error::Upstream {
            status: None,
            message: format!("invalid JSON response: {e}"),
        })
    }
}

impl CatalogSource for KinopoiskClient {
    fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome> {
        let page: SearchPage = self.get_json(&self.search_url(query, limit))?;
        let mut docs: Vec<RawCandidate> = page
            .docs
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect();
        if docs.is_empty() {
            info!("Search for {:?} returned no titles", query);
            return Ok(SearchOutcome::Empty);
        }
        docs.truncate(limit);
        info!("Search for {:?} returned {} titles", query, docs.len());
        Ok(SearchOutcome::Found(docs))
    }

    fn fetch_detail(&self, id: u64) -> Result<RawDetail> {
        self.get_json(&self.detail_url(id)).map_err(|e| match e {
            Error::Upstream {
                status: Some(404), ..
            } => Error::NotFound(format!("title {id}")),
            other => other,
        })
    }
}

/// Build `base?k=v&k=v` with percent-encoded values. Repeated keys are kept.
pub fn request_url(base: &str, params: &[(&str, &str)]) -> String {
    let mut url = base.to_string();
    if params.is_empty() {
        return url;
    }

    url.push('?');
    for (index, (key, value)) in params.iter().enumerate() {
        if index > 0 {
            url.push('&');
        }
        url.push_str(key);
        url.push('=');
        url.push_str(urlencoding::encode(value).as_ref());
    }
    url
}

/// Map a non-2xx status to the failure taxonomy.
pub fn status_error(status: u16, detail: &str) -> Error {
    match status {
        401 | 403 => Error::Auth { status },
        429 => Error::RateLimited,
        _ => Error::Upstream {
            status: Some(status),
            message: format!("HTTP {status}: {detail}"),
        },
    }
}

fn map_ureq_error(error: ureq::Error) -> Error {
    match error {
        ureq::Error::Status(status, response) => {
            let text = response.status_text().to_string();
            warn!("Catalog answered HTTP {} {}", status, text);
            status_error(status, &text)
        }
        ureq::Error::Transport(transport) => {
            if is_timeout(&transport) {
                warn!("Catalog request timed out");
                Error::Timeout
            } else {
                Error::Transport(transport.to_string())
            }
        }
    }
}

fn map_io_error(error: std::io::Error) -> Error {
    if matches!(
        error.kind(),
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    ) {
        Error::Timeout
    } else {
        Error::Transport(format!("failed to read response: {error}"))
    }
}

fn is_timeout(transport: &ureq::Transport) -> bool {
    let mut source = std::error::Error::source(transport);
    while let Some(err) = source {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ) {
                return true;
            }
        }
        source = err.source();
    }
    transport.to_string().contains("timed out")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use pretty_assertions::assert_eq;

    fn client() -> KinopoiskClient {
        KinopoiskClient::new(&ClientConfig {
            base_url: "https://api.example.test/v1.4/".to_string(),
            api_key: "KEY".to_string(),
            ..ClientConfig::default()
        })
    }

    #[test]
    fn search_url_encodes_query_and_repeats_select_fields() {
        let url = client().search_url("Начало 2010", 5);
        assert_eq!(
            url,
            "https://api.example.test/v1.4/movie/search?query=%D0%9D%D0%B0%D1%87%D0%B0%D0%BB%D0%BE%202010&limit=5\
             &selectFields=id&selectFields=name&selectFields=alternativeName\
             &selectFields=year&selectFields=poster&selectFields=rating"
        );
    }

    #[test]
    fn detail_url_uses_identifier() {
        assert_eq!(
            client().detail_url(447301),
            "https://api.example.test/v1.4/movie/447301"
        );
    }

    #[test]
    fn statuses_map_to_distinct_kinds() {
        assert_eq!(status_error(403, "Forbidden").kind(), FailureKind::Auth);
        assert_eq!(status_error(401, "Unauthorized").kind(), FailureKind::Auth);
        assert_eq!(status_error(429, "Too Many").kind(), FailureKind::RateLimited);
        assert_eq!(status_error(500, "Oops").kind(), FailureKind::UpstreamError);
    }

    #[test]
    fn request_url_without_params_is_base() {
        assert_eq!(request_url("http://x/y", &[]), "http://x/y");
    }

    #[test]
    fn debug_output_hides_api_key() {
        assert!(!format!("{:?}", client()).contains("KEY"));
    }
}
