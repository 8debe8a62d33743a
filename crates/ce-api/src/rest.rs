//! HTTP client for the REST Countries API

use async_trait::async_trait;
use ce_core::{encode_name, Country};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{SourceError, SourceResult};
use crate::source::{best_match, CountrySource};

/// Client for `https://restcountries.com/v3.1` or a compatible server
#[derive(Clone)]
pub struct RestCountriesClient {
    client: Client,
    base_url: String,
    list_fields: Vec<String>,
}

impl RestCountriesClient {
    /// Create a client for `base_url`
    ///
    /// `list_fields` restricts the fields requested for the country list;
    /// an empty list requests the full records.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        list_fields: Vec<String>,
    ) -> SourceResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Fetch {
                url: base_url.clone(),
                source: e,
            })?;

        Ok(Self {
            client,
            base_url,
            list_fields,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_url(&self) -> String {
        let url = format!("{}/all", self.base_url);
        if self.list_fields.is_empty() {
            url
        } else {
            format!("{}?fields={}", url, self.list_fields.join(","))
        }
    }

    fn lookup_url(&self, name: &str) -> String {
        format!("{}/name/{}", self.base_url, encode_name(name))
    }

    /// GET `url` and decode the JSON body
    ///
    /// Returns `Ok(None)` for a 404 so callers can decide what "missing" means.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> SourceResult<Option<T>> {
        debug!(url, "Fetching");
        let fetch_err = |e| SourceError::Fetch {
            url: url.to_string(),
            source: e,
        };

        let response = self.client.get(url).send().await.map_err(fetch_err)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(fetch_err)?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| SourceError::Parse {
                url: url.to_string(),
                source: e,
            })
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    #[instrument(skip(self))]
    async fn list_countries(&self) -> SourceResult<Vec<Country>> {
        let url = self.list_url();
        match self.get_json::<Vec<Country>>(&url).await? {
            Some(countries) => {
                debug!(count = countries.len(), "Fetched country list");
                Ok(countries)
            }
            None => Err(SourceError::Status {
                url,
                status: StatusCode::NOT_FOUND,
            }),
        }
    }

    #[instrument(skip(self))]
    async fn get_country(&self, name: &str) -> SourceResult<Country> {
        let url = self.lookup_url(name);
        let not_found = || SourceError::NotFound {
            name: name.to_string(),
        };

        let candidates = self
            .get_json::<Vec<Country>>(&url)
            .await?
            .ok_or_else(not_found)?;
        best_match(candidates, name).ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str, fields: &[&str]) -> RestCountriesClient {
        RestCountriesClient::new(
            base,
            Duration::from_secs(5),
            fields.iter().map(|f| f.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_list_url() {
        let c = client("https://restcountries.com/v3.1/", &["name", "flags"]);
        assert_eq!(c.base_url(), "https://restcountries.com/v3.1");
        assert_eq!(
            c.list_url(),
            "https://restcountries.com/v3.1/all?fields=name,flags"
        );

        let c = client("https://restcountries.com/v3.1", &[]);
        assert_eq!(c.list_url(), "https://restcountries.com/v3.1/all");
    }

    #[test]
    fn test_lookup_url_is_encoded() {
        let c = client("https://restcountries.com/v3.1", &[]);
        assert_eq!(
            c.lookup_url("Côte d'Ivoire"),
            "https://restcountries.com/v3.1/name/C%C3%B4te%20d%27Ivoire"
        );
    }
}
