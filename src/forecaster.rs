//! The entry point: runs fetch cycles against a provider, keeps the latest
//! snapshot and exports it.

use crate::clock::{Clock, SystemClock};
use crate::config::ForecastConfig;
use crate::correlation::{correlate, BatchOutcome, LocationFailure};
use crate::error::ForecastError;
use crate::export::tabular::{flatten, ExportOptions};
use crate::export::writer::{default_export_path, write_csv};
use crate::providers::error::ProviderError;
use crate::providers::{fetch, FetchPlan, NormalizeContext};
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::types::canonical::CanonicalLocationSeries;
use crate::types::location::LocationRequest;
use crate::types::provider::ProviderKind;
use crate::types::window::ForecastWindow;
use bon::bon;
use chrono::{DateTime, Utc};
use log::{info, warn};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;

/// The outcome of one fetch cycle.
///
/// `series` keeps the order of the requested locations; locations that failed
/// are missing from it and listed in `failures` instead.
#[derive(Debug)]
pub struct ForecastCycle {
    pub provider: ProviderKind,
    pub fetched_at: DateTime<Utc>,
    pub series: Vec<CanonicalLocationSeries>,
    pub failures: Vec<LocationFailure>,
}

/// What a refresh did with its cycle's results.
#[derive(Debug)]
pub struct Refresh {
    pub generation: u64,
    /// `false` when a newer cycle had already published.
    pub published: bool,
    pub failures: Vec<LocationFailure>,
}

/// Fetches forecasts from any supported provider and normalizes them into
/// [`CanonicalLocationSeries`].
///
/// # Examples
///
/// ```no_run
/// # use forecastkit::{ForecastConfig, ForecastError, Forecaster, ProviderKind};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ForecastError> {
/// let forecaster = Forecaster::new(ForecastConfig::from_env())?;
///
/// // Defaults to the three Brazilian capitals and a 3-day window.
/// let cycle = forecaster.fetch(ProviderKind::OpenMeteo).call().await?;
/// for series in &cycle.series {
///     println!("{}: {}°C now", series.name, series.current.temperature);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Forecaster {
    config: ForecastConfig,
    client: Client,
    clock: Arc<dyn Clock>,
    snapshots: SnapshotStore,
}

#[bon]
impl Forecaster {
    /// Creates a forecaster reading time from the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(config: ForecastConfig) -> Result<Self, ForecastError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a forecaster reading "now" from `clock`.
    pub fn with_clock(
        config: ForecastConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ForecastError::HttpClient)?;
        Ok(Self {
            config,
            client,
            clock,
            snapshots: SnapshotStore::new(),
        })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Runs one fetch cycle without touching the stored snapshot.
    ///
    /// Optional: `.locations(Vec<LocationRequest>)` (default: the Brazilian
    /// capitals) and `.window(ForecastWindow)` (default: the configured one).
    ///
    /// # Errors
    ///
    /// * [`ForecastError::Configuration`] if the provider's credential is
    ///   missing. Nothing is sent in that case.
    /// * [`ForecastError::EmptyRequest`] for no locations or a zero-day window.
    /// * [`ForecastError::AllLocationsFailed`] if no location produced a series.
    ///
    /// Individual location failures are not errors; they are reported in
    /// [`ForecastCycle::failures`].
    #[builder(start_fn = fetch)]
    #[doc(hidden)]
    pub async fn build_fetch(
        &self,
        #[builder(start_fn)] provider: ProviderKind,
        locations: Option<Vec<LocationRequest>>,
        window: Option<ForecastWindow>,
    ) -> Result<ForecastCycle, ForecastError> {
        let locations = locations.unwrap_or_else(LocationRequest::brazilian_capitals);
        let window = window.unwrap_or(self.config.window());
        self.run_cycle(provider, &locations, window).await
    }

    /// Runs a fetch cycle and publishes its series as the latest snapshot,
    /// unless a cycle started later has already published.
    #[builder(start_fn = refresh)]
    #[doc(hidden)]
    pub async fn build_refresh(
        &self,
        #[builder(start_fn)] provider: ProviderKind,
        locations: Option<Vec<LocationRequest>>,
        window: Option<ForecastWindow>,
    ) -> Result<Refresh, ForecastError> {
        let ticket = self.snapshots.begin();
        let locations = locations.unwrap_or_else(LocationRequest::brazilian_capitals);
        let window = window.unwrap_or(self.config.window());
        let cycle = self.run_cycle(provider, &locations, window).await?;
        let published = self
            .snapshots
            .publish(ticket, provider, cycle.fetched_at, cycle.series)
            .await;
        Ok(Refresh {
            generation: ticket.generation(),
            published,
            failures: cycle.failures,
        })
    }

    /// The most recently published snapshot, if any cycle has published yet.
    pub async fn latest(&self) -> Option<Arc<Snapshot>> {
        self.snapshots.latest().await
    }

    /// Writes the latest snapshot to a CSV file and returns its path.
    ///
    /// Optional: `.options(ExportOptions)` and `.path(PathBuf)` (default:
    /// `previsao-tempo.csv` in the download directory). With no snapshot yet,
    /// a header-only file is written.
    #[builder(start_fn = export)]
    #[doc(hidden)]
    pub async fn build_export(
        &self,
        options: Option<ExportOptions>,
        path: Option<PathBuf>,
    ) -> Result<PathBuf, ForecastError> {
        let path = match path {
            Some(path) => path,
            None => default_export_path()?,
        };
        let snapshot = self.snapshots.latest().await;
        let series = snapshot.as_deref().map_or(&[][..], |s| &s.series[..]);
        let rows = flatten(series, options.unwrap_or_default());
        write_csv(&rows, &path).await?;
        Ok(path)
    }

    async fn run_cycle(
        &self,
        provider: ProviderKind,
        requests: &[LocationRequest],
        window: ForecastWindow,
    ) -> Result<ForecastCycle, ForecastError> {
        let credential = self.config.credential(provider)?;
        if requests.is_empty() {
            return Err(ForecastError::EmptyRequest);
        }

        let offset = self.config.utc_offset_seconds();
        let fetched_at = self.clock.now();
        let today = self
            .clock
            .today_at(offset)
            .ok_or(ProviderError::InvalidOffset(offset))?;
        let dates = window
            .request_dates(today)
            .ok_or(ForecastError::EmptyRequest)?;

        info!(
            "Fetching {} forecast for {} location(s), {} day(s) from {}",
            provider,
            requests.len(),
            window.days,
            today
        );

        let plan = FetchPlan {
            client: &self.client,
            provider,
            base_url: self.config.base_url(provider),
            timezone: self.config.timezone(),
            credential,
            requests,
            dates,
        };
        let responses = match fetch(&plan).await {
            Ok(responses) => responses,
            Err(e) => {
                warn!("Batched {} request failed: {}", provider, e);
                return Err(ForecastError::AllLocationsFailed {
                    provider,
                    attempted: requests.len(),
                    last_error: e,
                });
            }
        };

        let ctx = NormalizeContext::new(window, offset);
        let mut outcome: BatchOutcome<CanonicalLocationSeries> = correlate(requests, responses)
            .into_iter()
            .map(|slot| slot.and_then(|request, payload| payload.normalize(&request.name, &ctx)))
            .collect();

        if outcome.present.is_empty() {
            if let Some(last) = outcome.failures.pop() {
                return Err(ForecastError::AllLocationsFailed {
                    provider,
                    attempted: requests.len(),
                    last_error: last.error,
                });
            }
        }

        info!(
            "{} cycle finished: {} location(s) ok, {} failed",
            provider,
            outcome.present.len(),
            outcome.failures.len()
        );
        Ok(ForecastCycle {
            provider,
            fetched_at,
            series: outcome.present,
            failures: outcome.failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn forecaster(config: ForecastConfig) -> Forecaster {
        let now = DateTime::from_timestamp(1_709_305_200, 0).unwrap();
        Forecaster::with_clock(config, Arc::new(FixedClock(now))).unwrap()
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_fetching() {
        // Unroutable base URL: reaching the network would fail differently.
        let config = ForecastConfig::builder()
            .tomorrow_io_url("http://127.0.0.1:9/unreachable")
            .build();
        let result = forecaster(config)
            .fetch(ProviderKind::TomorrowIo)
            .call()
            .await;
        assert!(matches!(
            result,
            Err(ForecastError::Configuration {
                provider: ProviderKind::TomorrowIo,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_empty_location_list() {
        let result = forecaster(ForecastConfig::default())
            .fetch(ProviderKind::OpenMeteo)
            .locations(Vec::new())
            .call()
            .await;
        assert!(matches!(result, Err(ForecastError::EmptyRequest)));
    }

    #[tokio::test]
    async fn test_zero_day_window() {
        let result = forecaster(ForecastConfig::default())
            .fetch(ProviderKind::OpenMeteo)
            .window(ForecastWindow::new(0, Default::default()))
            .call()
            .await;
        assert!(matches!(result, Err(ForecastError::EmptyRequest)));
    }

    #[tokio::test]
    async fn test_export_without_snapshot_writes_header() -> Result<(), Box<dyn std::error::Error>>
    {
        let dir = tempfile::tempdir()?;
        let path = forecaster(ForecastConfig::default())
            .export()
            .path(dir.path().join("empty.csv"))
            .call()
            .await?;
        let text = std::fs::read_to_string(path)?;
        assert_eq!(text.trim(), "Name");
        Ok(())
    }
}
