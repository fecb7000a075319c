//! Raw-sample adapter: current conditions plus a 3-hourly forecast list that
//! is bucketed into local days here.

use crate::aggregation::{summarize, DailyAggregator};
use crate::providers::error::ProviderError;
use crate::providers::http::get_json;
use crate::providers::NormalizeContext;
use crate::types::canonical::{CanonicalLocationSeries, RawDay};
use crate::types::location::LocationRequest;
use crate::types::sample::RawSample;
use reqwest::Client;
use serde::Deserialize;

const TEMP: &str = "temp";

#[derive(Debug, Clone, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RainBlock {
    #[serde(rename = "1h")]
    pub last_hour: Option<f64>,
}

/// Body of the `/weather` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub main: MainBlock,
    pub rain: Option<RainBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: MainBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    /// Seconds east of UTC.
    pub timezone: Option<i32>,
}

/// Body of the `/forecast` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastList {
    pub list: Vec<ForecastEntry>,
    pub city: Option<City>,
}

/// Both responses for one location.
#[derive(Debug, Clone)]
pub struct OpenWeatherPayload {
    pub current: CurrentWeather,
    pub forecast: ForecastList,
}

/// Fetches current conditions and the forecast list concurrently. Either
/// failing fails the location.
pub(crate) async fn fetch_location(
    client: &Client,
    base_url: &str,
    request: &LocationRequest,
    api_key: &str,
) -> Result<OpenWeatherPayload, ProviderError> {
    let base_url = base_url.trim_end_matches('/');
    let current_url = format!("{base_url}/weather");
    let forecast_url = format!("{base_url}/forecast");
    let query = [
        ("lat", request.latitude.to_string()),
        ("lon", request.longitude.to_string()),
        ("units", "metric".to_string()),
        ("lang", "pt_br".to_string()),
        ("appid", api_key.to_string()),
    ];

    let (current, forecast) = tokio::try_join!(
        get_json::<CurrentWeather>(client, &current_url, &query),
        get_json::<ForecastList>(client, &forecast_url, &query),
    )?;
    Ok(OpenWeatherPayload { current, forecast })
}

/// Buckets the forecast list into local days and summarizes each into
/// min/max. Current rain is the last-hour accumulation, 0 when absent; daily
/// rain is not reported.
pub(crate) fn normalize(
    payload: OpenWeatherPayload,
    name: &str,
    ctx: &NormalizeContext,
) -> Result<CanonicalLocationSeries, ProviderError> {
    let utc_offset_seconds = payload
        .forecast
        .city
        .as_ref()
        .and_then(|city| city.timezone)
        .unwrap_or(ctx.utc_offset_seconds);

    let samples = payload
        .forecast
        .list
        .iter()
        .map(|entry| RawSample::new(entry.dt).with_value(TEMP, entry.main.temp))
        .collect();
    let buckets = DailyAggregator::new(utc_offset_seconds, ctx.window).aggregate(samples);

    let days: Vec<RawDay> = buckets
        .iter()
        .filter_map(|bucket| summarize(bucket, TEMP))
        .map(|summary| RawDay {
            date: summary.date,
            min_temp: summary.min,
            max_temp: summary.max,
            rain_sum: None,
        })
        .collect();

    let current_rain = payload
        .current
        .rain
        .and_then(|rain| rain.last_hour)
        .unwrap_or(0.0);

    CanonicalLocationSeries::from_raw(
        name,
        payload.current.main.temp,
        Some(current_rain),
        &days,
    )
}
