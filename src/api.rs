use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::models::{into_country_list, Country, Currencies, RatesResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.vatcomply.com/";

/// The three read-only resources the converter consumes. Seam for tests and
/// for the cache, which should not care where the data comes from.
#[allow(async_fn_in_trait)]
pub trait RemoteSource {
    async fn fetch_currencies(&self) -> Result<Currencies, ApiError>;
    async fn fetch_rates(&self) -> Result<RatesResponse, ApiError>;
    async fn fetch_countries(&self) -> Result<Vec<Country>, ApiError>;
}

pub struct VatComplyClient {
    client: Client,
    base_url: String,
}

impl VatComplyClient {
    pub fn new(base_url: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// One bare GET, no retries, no timeout beyond reqwest defaults.
    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|source| ApiError::Decode { url, source })
    }
}

impl RemoteSource for VatComplyClient {
    async fn fetch_currencies(&self) -> Result<Currencies, ApiError> {
        self.fetch_json("currencies").await
    }

    async fn fetch_rates(&self) -> Result<RatesResponse, ApiError> {
        self.fetch_json("rates").await
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>, ApiError> {
        let by_iso2: HashMap<String, Country> = self.fetch_json("countries").await?;
        Ok(into_country_list(by_iso2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = VatComplyClient::new("https://api.vatcomply.com");
        assert_eq!(client.base_url, "https://api.vatcomply.com/");

        let client = VatComplyClient::new(DEFAULT_BASE_URL);
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }
}
