//! Model source acquisition: local files and HTTP URLs.

use std::path::Path;
use std::time::Duration;

use crate::error::FetchError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Read IFC text from a path or an http(s) URL. The whole body is read
/// into memory before parsing, matching the parser's whole-file model.
pub fn load_source(source: &str) -> Result<String, FetchError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_url(source)
    } else {
        std::fs::read_to_string(source).map_err(|err| FetchError::FileRead {
            path: Path::new(source).to_path_buf(),
            source: err,
        })
    }
}

fn fetch_url(url: &str) -> Result<String, FetchError> {
    let http_error = |source| FetchError::Http {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(http_error)?;

    client
        .get(url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .and_then(|resp| resp.text())
        .map_err(http_error)
}

/// Display name for a source: file stem for paths, last path segment
/// for URLs.
#[must_use]
pub fn source_label(source: &str) -> String {
    let tail = source
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(source);
    tail.to_string()
}
