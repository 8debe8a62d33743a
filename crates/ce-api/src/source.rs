//! Country data source trait and the in-memory implementation

use async_trait::async_trait;
use ce_core::Country;
use tracing::trace;

use crate::error::{SourceError, SourceResult};

/// A provider of country records
///
/// Implementations are constructed explicitly and injected where needed;
/// the explorer never reaches for a shared global client. Failures are
/// returned as-is: retrying is up to the implementation.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Fetch every country
    async fn list_countries(&self) -> SourceResult<Vec<Country>>;

    /// Fetch one country by its common name
    ///
    /// Returns [`SourceError::NotFound`] when nothing matches.
    async fn get_country(&self, name: &str) -> SourceResult<Country>;
}

/// Pick the record for `name` out of a lookup result
///
/// Prefers an exact common-name match, then a case-insensitive one, then
/// the first record.
pub(crate) fn best_match(mut candidates: Vec<Country>, name: &str) -> Option<Country> {
    let index = candidates
        .iter()
        .position(|c| c.common_name() == name)
        .or_else(|| {
            candidates
                .iter()
                .position(|c| c.common_name().to_lowercase() == name.to_lowercase())
        })
        .unwrap_or(0);

    if candidates.is_empty() {
        None
    } else {
        Some(candidates.swap_remove(index))
    }
}

/// A fixed list of countries held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    countries: Vec<Country>,
}

impl MemorySource {
    /// Serve `countries` in the order given
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    /// Build from a JSON array in the REST Countries format
    pub fn from_json(json: &str) -> SourceResult<Self> {
        let countries = serde_json::from_str(json).map_err(|e| SourceError::Parse {
            url: "memory".to_string(),
            source: e,
        })?;
        Ok(Self::new(countries))
    }

    /// Number of countries held
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Whether the source holds no countries
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

#[async_trait]
impl CountrySource for MemorySource {
    async fn list_countries(&self) -> SourceResult<Vec<Country>> {
        trace!(count = self.countries.len(), "Listing in-memory countries");
        Ok(self.countries.clone())
    }

    async fn get_country(&self, name: &str) -> SourceResult<Country> {
        let lowered = name.to_lowercase();
        self.countries
            .iter()
            .find(|c| c.common_name() == name)
            .or_else(|| {
                self.countries
                    .iter()
                    .find(|c| c.common_name().to_lowercase() == lowered)
            })
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn source() -> MemorySource {
        MemorySource::new(vec![
            Country::new("Niger", "Republic of Niger"),
            Country::new("Nigeria", "Federal Republic of Nigeria"),
        ])
    }

    #[tokio::test]
    async fn test_list_returns_all() {
        let countries = source().list_countries().await.unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[1].common_name(), "Nigeria");
    }

    #[tokio::test]
    async fn test_get_exact_then_case_insensitive() {
        let src = source();
        assert_eq!(src.get_country("Niger").await.unwrap().name.official, "Republic of Niger");
        assert_eq!(
            src.get_country("nigeria").await.unwrap().common_name(),
            "Nigeria"
        );
    }

    #[tokio::test]
    async fn test_get_missing() {
        let err = source().get_country("Atlantis").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "country 'Atlantis' not found");
    }

    #[test]
    fn test_from_json() {
        let src = MemorySource::from_json(
            r#"[{"name": {"common": "Japan", "official": "Japan"}, "population": 125836021}]"#,
        )
        .unwrap();
        assert_eq!(src.len(), 1);

        let err = MemorySource::from_json(r#"{"status": 404}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_best_match() {
        let candidates = vec![
            Country::new("Nigeria", "Federal Republic of Nigeria"),
            Country::new("Niger", "Republic of Niger"),
        ];
        assert_eq!(
            best_match(candidates.clone(), "Niger").unwrap().common_name(),
            "Niger"
        );
        assert_eq!(
            best_match(candidates.clone(), "NIGER").unwrap().common_name(),
            "Niger"
        );
        assert_eq!(
            best_match(candidates, "nige").unwrap().common_name(),
            "Nigeria"
        );
        assert!(best_match(Vec::new(), "Niger").is_none());
    }
}
