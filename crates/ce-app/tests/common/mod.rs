//! Shared fixtures for the application tests

use async_trait::async_trait;
use ce_api::{CountrySource, MemorySource, SourceError, SourceResult};
use ce_app::{ListPage, Session};
use ce_comparison::ComparisonPanel;
use ce_config::CompareControl;
use ce_core::Country;
use ce_event_bus::EventBus;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;

/// A REST Countries style document with three countries
pub const COUNTRIES_JSON: &str = r#"[
  {
    "name": {"common": "France", "official": "French Republic"},
    "capital": ["Paris"],
    "region": "Europe",
    "subregion": "Western Europe",
    "population": 67391582,
    "area": 551695.0,
    "flags": {"png": "https://flagcdn.com/w320/fr.png", "svg": "https://flagcdn.com/fr.svg"},
    "languages": {"fra": "French"},
    "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
    "borders": ["AND", "BEL", "DEU", "ITA", "LUX", "MCO", "ESP", "CHE"],
    "maps": {"googleMaps": "https://goo.gl/maps/g7QxxSFsWyTPKuzd7"}
  },
  {
    "name": {"common": "Germany", "official": "Federal Republic of Germany"},
    "capital": ["Berlin"],
    "region": "Europe",
    "subregion": "Western Europe",
    "population": 83240525,
    "area": 357114.0,
    "flags": {"png": "https://flagcdn.com/w320/de.png", "svg": "https://flagcdn.com/de.svg"}
  },
  {
    "name": {"common": "Japan", "official": "Japan"},
    "capital": ["Tokyo"],
    "region": "Asia",
    "subregion": "Eastern Asia",
    "population": 125836021,
    "area": 377930.0,
    "flags": {"png": "https://flagcdn.com/w320/jp.png", "svg": "https://flagcdn.com/jp.svg"}
  }
]"#;

pub fn memory_source() -> Arc<dyn CountrySource> {
    Arc::new(MemorySource::from_json(COUNTRIES_JSON).unwrap())
}

/// A source whose server answers every request with 503
pub struct UnavailableSource;

impl UnavailableSource {
    fn error(path: &str) -> SourceError {
        SourceError::Status {
            url: format!("http://countries.test/v3.1/{path}"),
            status: StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[async_trait]
impl CountrySource for UnavailableSource {
    async fn list_countries(&self) -> SourceResult<Vec<Country>> {
        Err(Self::error("all"))
    }

    async fn get_country(&self, name: &str) -> SourceResult<Country> {
        Err(Self::error(&format!("name/{name}")))
    }
}

/// Build a session over `source` with the given close delay
pub fn session(
    source: Arc<dyn CountrySource>,
    close_delay: Duration,
    control: CompareControl,
) -> (Session, Arc<EventBus>) {
    let bus = Arc::new(EventBus::new());
    let panel = ComparisonPanel::new(bus.clone(), close_delay);
    let list = ListPage::new(source.clone(), panel, bus.clone(), control);
    (Session::new(list, source), bus)
}

/// Advance the paused clock and let spawned tasks run
pub async fn settle(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
