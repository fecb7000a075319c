//! Nested-timeline adapter: one request per location, answered with daily
//! intervals the provider has already aggregated.

use crate::providers::error::ProviderError;
use crate::providers::http::get_json;
use crate::providers::NormalizeContext;
use crate::types::canonical::{CanonicalLocationSeries, RawDay};
use crate::types::location::LocationRequest;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Client;
use serde::Deserialize;

const INTERVALS_PATH: &str = "data.timelines[0].intervals";
const FIELDS: &str = "temperature,temperatureMax,temperatureMin,rainAccumulationSum";

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineResponse {
    pub data: Option<TimelineData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineData {
    #[serde(default)]
    pub timelines: Vec<Timeline>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub intervals: Vec<TimelineInterval>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInterval {
    pub start_time: DateTime<Utc>,
    pub values: IntervalValues,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalValues {
    pub temperature: Option<f64>,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub rain_accumulation_sum: Option<f64>,
}

pub(crate) async fn fetch_location(
    client: &Client,
    url: &str,
    timezone: &str,
    request: &LocationRequest,
    api_key: &str,
) -> Result<TimelineResponse, ProviderError> {
    let query = [
        ("location", request.coordinate_pair()),
        ("fields", FIELDS.to_string()),
        ("timesteps", "1d".to_string()),
        ("units", "metric".to_string()),
        ("timezone", timezone.to_string()),
        ("apikey", api_key.to_string()),
    ];
    get_json(client, url, &query).await
}

/// Projects the daily intervals onto the canonical series.
///
/// The first interval supplies the current temperature; the window then
/// applies to the intervals as to any other daily sequence. Interval dates are
/// taken in the configured local offset.
pub(crate) fn normalize(
    response: TimelineResponse,
    name: &str,
    ctx: &NormalizeContext,
) -> Result<CanonicalLocationSeries, ProviderError> {
    let intervals = response
        .data
        .and_then(|data| data.timelines.into_iter().next())
        .map(|timeline| timeline.intervals)
        .filter(|intervals| !intervals.is_empty())
        .ok_or(ProviderError::MissingPath(INTERVALS_PATH))?;

    let offset = FixedOffset::east_opt(ctx.utc_offset_seconds)
        .ok_or(ProviderError::InvalidOffset(ctx.utc_offset_seconds))?;
    let current_temperature = intervals
        .first()
        .and_then(|interval| interval.values.temperature)
        .ok_or_else(|| ProviderError::MissingVariable("temperature".to_string()))?;

    let days = ctx
        .window
        .select(intervals)
        .into_iter()
        .map(|interval| {
            let values = interval.values;
            Ok(RawDay {
                date: interval.start_time.with_timezone(&offset).date_naive(),
                min_temp: values
                    .temperature_min
                    .ok_or_else(|| ProviderError::MissingVariable("temperatureMin".to_string()))?,
                max_temp: values
                    .temperature_max
                    .ok_or_else(|| ProviderError::MissingVariable("temperatureMax".to_string()))?,
                rain_sum: values.rain_accumulation_sum,
            })
        })
        .collect::<Result<Vec<_>, ProviderError>>()?;

    CanonicalLocationSeries::from_raw(name, current_temperature, None, &days)
}
