//! Provider adapters. Each turns one provider's native response into a
//! [`CanonicalLocationSeries`]; which adapter runs is decided by the payload's
//! provider tag alone.

pub mod error;
mod http;
pub mod open_meteo;
pub mod openweather;
pub mod tomorrow_io;

use crate::providers::error::ProviderError;
use crate::types::canonical::CanonicalLocationSeries;
use crate::types::location::LocationRequest;
use crate::types::provider::ProviderKind;
use crate::types::window::ForecastWindow;
use chrono::NaiveDate;
use futures_util::future::join_all;
use reqwest::Client;

pub use open_meteo::ColumnarLocation;
pub use openweather::OpenWeatherPayload;
pub use tomorrow_io::TimelineResponse;

/// Settings every normalizer needs besides the payload itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeContext {
    pub window: ForecastWindow,
    /// Local offset used when the payload does not carry one.
    pub utc_offset_seconds: i32,
}

impl NormalizeContext {
    pub fn new(window: ForecastWindow, utc_offset_seconds: i32) -> Self {
        Self {
            window,
            utc_offset_seconds,
        }
    }
}

/// A provider-native response for one location.
#[derive(Debug, Clone)]
pub enum ProviderPayload {
    Columnar(ColumnarLocation),
    Timeline(TimelineResponse),
    RawSamples(OpenWeatherPayload),
}

impl ProviderPayload {
    /// Converts the payload into the canonical series for location `name`,
    /// rounding every value once.
    ///
    /// # Errors
    ///
    /// Fails with a [`ProviderError`] if the payload is structurally
    /// incomplete or its arrays disagree with its time axis.
    pub fn normalize(
        self,
        name: &str,
        ctx: &NormalizeContext,
    ) -> Result<CanonicalLocationSeries, ProviderError> {
        match self {
            ProviderPayload::Columnar(location) => open_meteo::normalize(location, name, ctx),
            ProviderPayload::Timeline(response) => tomorrow_io::normalize(response, name, ctx),
            ProviderPayload::RawSamples(payload) => openweather::normalize(payload, name, ctx),
        }
    }
}

/// Everything one fetch needs.
pub(crate) struct FetchPlan<'a> {
    pub client: &'a Client,
    pub provider: ProviderKind,
    pub base_url: &'a str,
    pub timezone: &'a str,
    pub credential: Option<&'a str>,
    pub requests: &'a [LocationRequest],
    /// Inclusive date range to request from providers that take one.
    pub dates: (NaiveDate, NaiveDate),
}

/// Fetches payloads for every request, one result per request in request
/// order.
///
/// The outer error is a failed batched call, which takes every location down
/// with it. Per-location providers never fail as a whole.
pub(crate) async fn fetch(
    plan: &FetchPlan<'_>,
) -> Result<Vec<Result<ProviderPayload, ProviderError>>, ProviderError> {
    let key = plan.credential.unwrap_or_default();
    match plan.provider {
        ProviderKind::OpenMeteo => {
            let locations = open_meteo::fetch_batch(
                plan.client,
                plan.base_url,
                plan.timezone,
                plan.requests,
                plan.dates,
            )
            .await?;
            Ok(locations
                .into_iter()
                .map(|location| Ok(ProviderPayload::Columnar(location)))
                .collect())
        }
        ProviderKind::TomorrowIo => Ok(join_all(plan.requests.iter().map(|request| async move {
            tomorrow_io::fetch_location(plan.client, plan.base_url, plan.timezone, request, key)
                .await
                .map(ProviderPayload::Timeline)
        }))
        .await),
        ProviderKind::OpenWeather => Ok(join_all(plan.requests.iter().map(|request| async move {
            openweather::fetch_location(plan.client, plan.base_url, request, key)
                .await
                .map(ProviderPayload::RawSamples)
        }))
        .await),
    }
}
