//! Static catalog loading.
//!
//! # Responsibility
//! - Fetch the `{ lastUpdated, attractions[] }` document from a file or URL.
//! - Degrade to an empty catalog instead of surfacing load failures to the UI.
//!
//! # Invariants
//! - One fetch per call; no pagination, refresh or retry.
//! - Returned catalogs are sanitized (valid entries, unique ids).
//! - A malformed entry is skipped on its own; only a malformed document
//!   envelope fails the load.

use crate::config::DEFAULT_CATALOG_TIMEOUT_SECS;
use crate::model::attraction::Attraction;
use crate::model::catalog::Catalog;
use log::{info, warn};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// HTTP timeout used by [`load_catalog`].
pub const DEFAULT_CATALOG_TIMEOUT: Duration =
    Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalog {
    last_updated: String,
    #[serde(default)]
    attractions: Vec<serde_json::Value>,
}

/// Result type for catalog loading.
pub type CatalogResult<T> = Result<T, CatalogLoadError>;

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Interprets `http://`/`https://` values as URLs and anything else as a
    /// file path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Url(_) => "url",
        }
    }
}

impl Display for CatalogSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Catalog fetch/decode failures.
#[derive(Debug)]
pub enum CatalogLoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Http(reqwest::Error),
    HttpStatus {
        url: String,
        status: u16,
    },
    Parse(serde_json::Error),
}

impl Display for CatalogLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog `{}`: {source}", path.display())
            }
            Self::Http(err) => write!(f, "catalog request failed: {err}"),
            Self::HttpStatus { url, status } => {
                write!(f, "catalog request to `{url}` returned HTTP {status}")
            }
            Self::Parse(err) => write!(f, "invalid catalog document: {err}"),
        }
    }
}

impl Error for CatalogLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Http(err) => Some(err),
            Self::HttpStatus { .. } => None,
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for CatalogLoadError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<serde_json::Error> for CatalogLoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Decodes and sanitizes a catalog document.
///
/// Entries that do not decode, fail validation or repeat an earlier id are
/// skipped with a `warn` event.
pub fn parse_catalog(raw: &str) -> CatalogResult<Catalog> {
    let document: RawCatalog = serde_json::from_str(raw)?;

    let mut undecodable = 0usize;
    let mut attractions = Vec::with_capacity(document.attractions.len());
    for (index, entry) in document.attractions.into_iter().enumerate() {
        match serde_json::from_value::<Attraction>(entry) {
            Ok(attraction) => attractions.push(attraction),
            Err(err) => {
                warn!(
                    "event=catalog_entry_skipped module=catalog status=error index={} reason={}",
                    index, err
                );
                undecodable += 1;
            }
        }
    }

    let (catalog, invalid) = Catalog::new(document.last_updated, attractions).sanitized();
    let skipped = undecodable + invalid;
    if skipped > 0 {
        warn!(
            "event=catalog_parse module=catalog status=partial kept={} skipped={}",
            catalog.len(),
            skipped
        );
    }
    Ok(catalog)
}

/// Fetches and decodes the catalog from `source` with the default timeout.
pub fn load_catalog(source: &CatalogSource) -> CatalogResult<Catalog> {
    load_catalog_with_timeout(source, DEFAULT_CATALOG_TIMEOUT)
}

/// Fetches and decodes the catalog from `source`.
///
/// # Side effects
/// - Reads a file or performs one blocking HTTP GET bounded by `timeout`.
/// - Emits `catalog_load` logging events with duration and status.
pub fn load_catalog_with_timeout(
    source: &CatalogSource,
    timeout: Duration,
) -> CatalogResult<Catalog> {
    let started_at = Instant::now();
    info!(
        "event=catalog_load module=catalog status=start mode={}",
        source.mode()
    );

    let result = read_source(source, timeout).and_then(|raw| parse_catalog(raw.as_str()));
    match &result {
        Ok(catalog) => info!(
            "event=catalog_load module=catalog status=ok mode={} duration_ms={} attractions={}",
            source.mode(),
            started_at.elapsed().as_millis(),
            catalog.len()
        ),
        Err(err) => warn!(
            "event=catalog_load module=catalog status=error mode={} duration_ms={} error={}",
            source.mode(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

/// Loads the catalog, falling back to an empty one stamped with now.
pub fn load_catalog_or_empty(source: &CatalogSource) -> Catalog {
    load_catalog(source).unwrap_or_else(|_| Catalog::empty_now())
}

fn read_source(source: &CatalogSource, timeout: Duration) -> CatalogResult<String> {
    match source {
        CatalogSource::File(path) => {
            std::fs::read_to_string(path).map_err(|err| CatalogLoadError::Io {
                path: path.clone(),
                source: err,
            })
        }
        CatalogSource::Url(url) => {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?;
            let response = client.get(url.as_str()).send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(CatalogLoadError::HttpStatus {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            Ok(response.text()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_catalog, CatalogLoadError, CatalogSource};
    use std::path::PathBuf;

    #[test]
    fn parse_source_distinguishes_urls_and_paths() {
        assert_eq!(
            CatalogSource::parse(" https://example.com/data.json "),
            CatalogSource::Url("https://example.com/data.json".to_string())
        );
        assert_eq!(
            CatalogSource::parse("./data.json"),
            CatalogSource::File(PathBuf::from("./data.json"))
        );
    }

    #[test]
    fn parse_catalog_reads_camel_case_document() {
        let raw = r#"{
            "lastUpdated": "2024-05-01T08:00:00.000Z",
            "attractions": [{
                "id": "1",
                "region": "台北",
                "district": "信義",
                "name": "台北101",
                "category": "風景",
                "description": "地標",
                "suggestedDuration": "2 小時",
                "address": "台北市信義區",
                "rating": 4.7,
                "popularity": 98,
                "lat": 25.0339,
                "lng": 121.5645
            }]
        }"#;

        let catalog = parse_catalog(raw).expect("valid catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.attractions[0].suggested_duration, "2 小時");
        assert!(catalog.last_updated_at().is_some());
    }

    #[test]
    fn parse_catalog_skips_unknown_category_entry() {
        let raw = r#"{"lastUpdated":"x","attractions":[
            {"id":"1","region":"a","district":"b","name":"kept","category":"有趣",
             "description":"","suggestedDuration":"","address":"","rating":1,"popularity":1},
            {"id":"2","region":"a","district":"b","name":"n","category":"博物館",
             "description":"","suggestedDuration":"","address":"","rating":1,"popularity":1}]}"#;
        let catalog = parse_catalog(raw).expect("document envelope is valid");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.attractions[0].name, "kept");
    }

    #[test]
    fn parse_catalog_accepts_numeric_id_and_fractional_popularity() {
        let raw = r#"{"lastUpdated":"2024-05-01T08:00:00Z","attractions":[
            {"id":"a-1","region":"台北","district":"信義","name":"first","category":"風景",
             "description":"","suggestedDuration":"","address":"","rating":4.1,"popularity":90},
            {"id":2,"region":"台中","district":"西區","name":"second","category":"餐廳",
             "description":"","suggestedDuration":"","address":"","rating":4.4,"popularity":87.5}]}"#;
        let catalog = parse_catalog(raw).expect("valid catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.attractions[1].id.as_str(), "2");
        assert_eq!(catalog.attractions[1].popularity, 87.5);
    }

    #[test]
    fn parse_catalog_rejects_broken_envelope() {
        let err = parse_catalog(r#"{"attractions":[]}"#).expect_err("lastUpdated is required");
        assert!(matches!(err, CatalogLoadError::Parse(_)));
    }
}
