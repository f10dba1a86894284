//! SignalFx API client
//!
//! Blocking-style client over the shared runtime: one request in flight at
//! a time, no retries. A failed page fetch ends pagination; whatever was
//! retrieved up to that point is kept.

use anyhow::Context;
use detsnap_core::{HttpError, SHARED_RUNTIME, http_client};

use crate::detector::{Detector, DetectorPage};

/// Fixed page size for the detector list endpoint.
pub const PAGE_SIZE: usize = 50;

/// Realm whose API answers on the bare host, without a realm prefix.
pub const DEFAULT_REALM: &str = "us0";

/// API base URL for a realm.
///
/// `us0` is the original deployment and lives on `api.signalfx.com`; every
/// other realm gets a realm-qualified host.
pub fn base_url_for_realm(realm: &str) -> String {
    if realm == DEFAULT_REALM {
        "https://api.signalfx.com".to_string()
    } else {
        format!("https://api.{realm}.signalfx.com")
    }
}

/// Authenticated SignalFx API client for one org token and realm.
#[derive(Debug)]
pub struct Client {
    token: String,
    base_url: String,
}

impl Client {
    pub fn new(token: &str, realm: &str) -> Self {
        Self {
            token: token.to_string(),
            base_url: base_url_for_realm(realm),
        }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticated GET returning the raw response body.
    fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, HttpError> {
        let url = format!("{}/{}", self.base_url, path);
        let result: Result<String, reqwest::Error> = SHARED_RUNTIME.handle().block_on(async {
            let resp = http_client()
                .get(&url)
                .query(query)
                .header("X-SF-Token", &self.token)
                .header("Content-Type", "application/json")
                .send()
                .await?
                .error_for_status()?;
            resp.text().await
        });
        result.map_err(|e| HttpError::from_reqwest(&e))
    }

    /// Fetch one page of the detector list.
    pub fn list_page(&self, offset: usize, limit: usize) -> Result<DetectorPage, HttpError> {
        let body = self.get_text(
            "v2/detector",
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
        )?;
        DetectorPage::from_json(&body).map_err(|e| HttpError {
            status: None,
            message: format!("invalid detector list JSON: {e}"),
        })
    }

    /// Fetch a single detector by ID.
    pub fn get_detector(&self, id: &str) -> anyhow::Result<Detector> {
        let body = self
            .get_text(&format!("v2/detector/{id}"), &[])
            .with_context(|| format!("failed to fetch detector {id}"))?;
        serde_json::from_str(&body).context("invalid detector JSON")
    }

    /// Connectivity and token check: one bounded request, no side effects.
    ///
    /// Any failure is logged and folded into `false`.
    pub fn probe(&self) -> bool {
        match self.list_page(0, 1) {
            Ok(_) => {
                log::info!("API connection successful ({})", self.base_url);
                true
            }
            Err(e) if e.is_auth() => {
                log::error!("API connection failed: {e} (check the token)");
                false
            }
            Err(e) => {
                log::error!("API connection failed: {e}");
                false
            }
        }
    }

    /// Fetch all detectors, paginating until a short or empty page.
    ///
    /// With `limit`, stops early and truncates to exactly `limit` records.
    pub fn fetch_all(&self, limit: Option<usize>) -> FetchOutcome {
        paginate(PAGE_SIZE, limit, |offset, page_size| {
            log::info!("fetching detectors (offset: {offset}, limit: {page_size})");
            let page = self.list_page(offset, page_size)?;
            if offset == 0 {
                if let Some(count) = page.count {
                    log::debug!("organization reports {count} detectors");
                }
            }
            Ok(page.results)
        })
    }
}

/// Result of a pagination run: everything retrieved, plus the error that
/// ended the run early, if any.
#[derive(Debug)]
pub struct FetchOutcome {
    pub detectors: Vec<Detector>,
    /// Set when pagination aborted before the natural last page.
    pub error: Option<HttpError>,
}

/// Pagination loop over a page-fetching function.
///
/// Stop conditions, in order: accumulated `limit` records (no further
/// requests are issued, result truncated to exactly `limit`), a fetch
/// error (partial results kept), an empty page, or a short page.
pub fn paginate<F>(page_size: usize, limit: Option<usize>, mut fetch_page: F) -> FetchOutcome
where
    F: FnMut(usize, usize) -> Result<Vec<Detector>, HttpError>,
{
    let mut detectors = Vec::new();
    let mut offset = 0;
    let mut error = None;

    loop {
        if let Some(max) = limit {
            if detectors.len() >= max {
                break;
            }
        }

        let batch = match fetch_page(offset, page_size) {
            Ok(batch) => batch,
            Err(e) => {
                log::error!("failed to fetch detectors at offset {offset}: {e}");
                error = Some(e);
                break;
            }
        };

        if batch.is_empty() {
            break;
        }

        let batch_len = batch.len();
        detectors.extend(batch);
        log::info!("retrieved {batch_len} detectors (total: {})", detectors.len());

        if batch_len < page_size {
            break;
        }
        offset += page_size;
    }

    if let Some(max) = limit {
        detectors.truncate(max);
    }

    FetchOutcome { detectors, error }
}
