//! Columnar batch adapter: one request for every location, each answered with
//! a daily `time` array plus value arrays keyed by variable name.

use crate::providers::error::ProviderError;
use crate::providers::http::get_json;
use crate::providers::NormalizeContext;
use crate::time_axis::{ensure_aligned, ensure_on_axis, reconstruct, TimeAxisSpec};
use crate::types::canonical::{CanonicalLocationSeries, RawDay};
use crate::types::location::LocationRequest;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

const CURRENT_TEMPERATURE: &str = "temperature_2m";
const CURRENT_RAIN: &str = "rain";
const DAILY_MAX: &str = "temperature_2m_max";
const DAILY_MIN: &str = "temperature_2m_min";
const DAILY_RAIN: &str = "rain_sum";

const SECONDS_PER_DAY: i64 = 86_400;
// Local midnight moves by an hour across daylight-saving changes.
const DAILY_DRIFT_SECONDS: u64 = 3_600;

/// One location of a columnar batch response.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnarLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_seconds: i32,
    pub current: Option<ColumnarCurrent>,
    pub daily: Option<ColumnarDaily>,
}

/// The `current` block, one value per requested variable.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnarCurrent {
    #[serde(flatten)]
    pub values: HashMap<String, Option<f64>>,
}

/// The `daily` block. `time` holds the epoch of each local midnight; every
/// other field is an array parallel to it.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnarDaily {
    pub time: Vec<i64>,
    #[serde(flatten)]
    pub series: HashMap<String, Vec<Option<f64>>>,
}

impl ColumnarCurrent {
    fn value(&self, variable: &str) -> Option<f64> {
        self.values.get(variable).copied().flatten()
    }
}

impl ColumnarDaily {
    /// The values of `variable`, checked against an axis of `axis_len` days.
    fn series(
        &self,
        variable: &str,
        axis_len: usize,
    ) -> Result<Option<&[Option<f64>]>, ProviderError> {
        match self.series.get(variable) {
            Some(values) => {
                ensure_aligned(axis_len, variable, values)?;
                Ok(Some(values))
            }
            None => Ok(None),
        }
    }

    fn required(&self, variable: &str, axis_len: usize) -> Result<Vec<f64>, ProviderError> {
        self.series(variable, axis_len)?
            .ok_or_else(|| ProviderError::MissingVariable(variable.to_string()))?
            .iter()
            .enumerate()
            .map(|(i, value)| {
                value.ok_or_else(|| ProviderError::MissingVariable(format!("{variable}[{i}]")))
            })
            .collect()
    }
}

// A single-location batch may come back as a bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum BatchBody {
    Many(Vec<ColumnarLocation>),
    One(ColumnarLocation),
}

/// Fetches `requests` in one call covering `start..=end`. Locations come back
/// in request order.
pub(crate) async fn fetch_batch(
    client: &Client,
    url: &str,
    timezone: &str,
    requests: &[LocationRequest],
    (start, end): (NaiveDate, NaiveDate),
) -> Result<Vec<ColumnarLocation>, ProviderError> {
    let join = |f: fn(&LocationRequest) -> f64| {
        requests
            .iter()
            .map(|r| f(r).to_string())
            .collect::<Vec<_>>()
            .join(",")
    };
    let query = [
        ("latitude", join(|r| r.latitude)),
        ("longitude", join(|r| r.longitude)),
        ("current", format!("{CURRENT_TEMPERATURE},{CURRENT_RAIN}")),
        ("daily", format!("{DAILY_MAX},{DAILY_MIN},{DAILY_RAIN}")),
        ("timezone", timezone.to_string()),
        ("timeformat", "unixtime".to_string()),
        ("start_date", start.format("%Y-%m-%d").to_string()),
        ("end_date", end.format("%Y-%m-%d").to_string()),
    ];

    let body: BatchBody = get_json(client, url, &query).await?;
    Ok(match body {
        BatchBody::Many(locations) => locations,
        BatchBody::One(location) => vec![location],
    })
}

/// Checks every daily array against the `time` axis, reconstructs the local
/// dates and applies the window.
pub(crate) fn normalize(
    location: ColumnarLocation,
    name: &str,
    ctx: &NormalizeContext,
) -> Result<CanonicalLocationSeries, ProviderError> {
    let current = location
        .current
        .as_ref()
        .ok_or(ProviderError::MissingPath("current"))?;
    let daily = location
        .daily
        .as_ref()
        .ok_or(ProviderError::MissingPath("daily"))?;

    let axis = TimeAxisSpec::covering(&daily.time, SECONDS_PER_DAY, location.utc_offset_seconds)?;
    let axis_len = axis.len()?;
    let max_temp = daily.required(DAILY_MAX, axis_len)?;
    let min_temp = daily.required(DAILY_MIN, axis_len)?;
    let rain_sum = daily.series(DAILY_RAIN, axis_len)?;

    let stamps = reconstruct(&axis)?;
    ensure_on_axis(&stamps, &daily.time, DAILY_DRIFT_SECONDS)?;

    let days: Vec<RawDay> = stamps
        .iter()
        .zip(min_temp.into_iter().zip(max_temp))
        .enumerate()
        .map(|(i, (stamp, (min_temp, max_temp)))| RawDay {
            date: stamp.date_naive(),
            min_temp,
            max_temp,
            rain_sum: rain_sum.and_then(|rain| rain.get(i).copied().flatten()),
        })
        .collect();

    let temperature = current
        .value(CURRENT_TEMPERATURE)
        .ok_or_else(|| ProviderError::MissingVariable(CURRENT_TEMPERATURE.to_string()))?;

    CanonicalLocationSeries::from_raw(
        name,
        temperature,
        current.value(CURRENT_RAIN),
        &ctx.window.select(days),
    )
}
