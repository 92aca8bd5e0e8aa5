//! IPEA Atlas da Violência API integration.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::Series;
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://www.ipea.gov.br/atlasviolencia";

/// Fixed scope segment selecting per-municipality values. The API also
/// serves state- and country-level scopes, but nothing here requests them.
const MUNICIPALITY_SCOPE: &str = "4";

/// One raw record as served by the API.
///
/// `valor` arrives as a string and `periodo` as an ISO-like date string;
/// both are parsed downstream so a bad payload fails with a message naming
/// the offending field.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub valor: String,
    pub periodo: String,
    pub cod: i64,
}

pub struct IpeaClient {
    client: Client,
    base_url: String,
}

impl IpeaClient {
    /// Build a client, honoring an `ATLAS_BASE_URL` override from the
    /// environment (or a `.env` file) when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("ATLAS_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch every per-municipality record of `series`.
    ///
    /// Single GET, no retry, no backoff. Any non-200 status is fatal.
    pub fn fetch_series(&self, series: Series) -> Result<Vec<RawRecord>, AppError> {
        let url = self.series_url(series);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::new(4, format!("IPEA request failed: {e}")))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(AppError::new(
                4,
                format!("IPEA request for '{url}' failed with status {status}."),
            ));
        }

        let records: Vec<RawRecord> = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to decode IPEA response: {e}")))?;

        Ok(records)
    }

    fn series_url(&self, series: Series) -> String {
        format!(
            "{}/api/v1/valores-series/{}/{}",
            self.base_url,
            series.id(),
            MUNICIPALITY_SCOPE
        )
    }
}
