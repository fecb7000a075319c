//! Full fetch cycles against mock provider endpoints.

use chrono::{DateTime, NaiveDate};
use forecastkit::{
    FixedClock, ForecastConfig, ForecastError, Forecaster, LocationRequest, ProviderError,
    ProviderKind,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 2024-03-01T15:00:00Z, noon in São Paulo.
const NOW: i64 = 1_709_305_200;
// 2024-03-01T00:00:00-03:00
const LOCAL_MIDNIGHT: i64 = 1_709_262_000;
const TOMORROW_KEY: &str = "tomorrow-secret";
const OPENWEATHER_KEY: &str = "openweather-secret";

fn forecaster(server: &MockServer) -> Forecaster {
    let config = ForecastConfig::builder()
        .tomorrow_api_key(TOMORROW_KEY)
        .openweather_api_key(OPENWEATHER_KEY)
        .open_meteo_url(format!("{}/v1/forecast", server.uri()))
        .tomorrow_io_url(format!("{}/v4/timelines", server.uri()))
        .openweather_url(format!("{}/data/2.5", server.uri()))
        .build();
    let clock = FixedClock(DateTime::from_timestamp(NOW, 0).unwrap());
    Forecaster::with_clock(config, Arc::new(clock)).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

fn timeline_body(base_max: f64) -> Value {
    let intervals: Vec<Value> = (0..5)
        .map(|d| {
            json!({
                "startTime": format!("2024-03-{:02}T09:00:00Z", 1 + d),
                "values": {
                    "temperature": 24.2,
                    "temperatureMax": base_max + d as f64,
                    "temperatureMin": 17.8,
                    "rainAccumulationSum": 3.5
                }
            })
        })
        .collect();
    json!({"data": {"timelines": [{"timestep": "1d", "intervals": intervals}]}})
}

fn columnar_location(rain_values: usize) -> Value {
    json!({
        "latitude": -23.5,
        "longitude": -46.625,
        "utc_offset_seconds": -10800,
        "timezone": "America/Sao_Paulo",
        "current_units": {"time": "unixtime", "interval": "seconds", "temperature_2m": "°C"},
        "current": {"time": NOW, "interval": 900, "temperature_2m": 27.3, "rain": 0.0},
        "daily_units": {"time": "unixtime", "temperature_2m_max": "°C", "rain_sum": "mm"},
        "daily": {
            "time": (0..4).map(|d| LOCAL_MIDNIGHT + d * 86_400).collect::<Vec<_>>(),
            "temperature_2m_max": [30.0, 31.0, 32.0, 33.0],
            "temperature_2m_min": [20.0, 21.0, 22.0, 23.0],
            "rain_sum": vec![1.0; rain_values]
        }
    })
}

#[tokio::test]
async fn test_failed_location_is_isolated_and_order_kept() {
    let server = MockServer::start().await;
    let locations = LocationRequest::brazilian_capitals();

    for (i, location) in locations.iter().enumerate() {
        let response = if i == 1 {
            ResponseTemplate::new(500)
        } else {
            ResponseTemplate::new(200).set_body_json(timeline_body(28.0 + i as f64))
        };
        Mock::given(method("GET"))
            .and(path("/v4/timelines"))
            .and(query_param("location", location.coordinate_pair()))
            .and(query_param("apikey", TOMORROW_KEY))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
    }

    let cycle = forecaster(&server)
        .fetch(ProviderKind::TomorrowIo)
        .locations(locations)
        .call()
        .await
        .unwrap();

    let names: Vec<&str> = cycle.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["São Paulo", "Brasília"]);
    assert_eq!(cycle.series[0].daily.dates(), &[date(2), date(3), date(4)]);
    assert_eq!(cycle.series[0].daily.max_temp(), &[29.0, 30.0, 31.0]);
    assert_eq!(cycle.series[1].daily.max_temp(), &[31.0, 32.0, 33.0]);
    assert_eq!(cycle.series[0].current.temperature, 24.0);

    assert_eq!(cycle.failures.len(), 1);
    assert_eq!(cycle.failures[0].request.name, "Rio de Janeiro");
    assert!(matches!(
        &cycle.failures[0].error,
        ProviderError::HttpStatus { status, .. } if status.as_u16() == 500
    ));
    let rendered = format!("{:?} {}", cycle.failures[0].error, cycle.failures[0].error);
    assert!(!rendered.contains(TOMORROW_KEY));
}

#[tokio::test]
async fn test_slow_first_location_keeps_request_order() {
    let server = MockServer::start().await;
    let locations = LocationRequest::brazilian_capitals();

    for (i, location) in locations.iter().enumerate() {
        let mut response = ResponseTemplate::new(200).set_body_json(timeline_body(28.0 + i as f64));
        if i == 0 {
            response = response.set_delay(Duration::from_millis(300));
        }
        Mock::given(method("GET"))
            .and(path("/v4/timelines"))
            .and(query_param("location", location.coordinate_pair()))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
    }

    let cycle = forecaster(&server)
        .fetch(ProviderKind::TomorrowIo)
        .locations(locations)
        .call()
        .await
        .unwrap();

    let names: Vec<&str> = cycle.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["São Paulo", "Rio de Janeiro", "Brasília"]);
    let first_days: Vec<f64> = cycle.series.iter().map(|s| s.daily.max_temp()[0]).collect();
    assert_eq!(first_days, [29.0, 30.0, 31.0]);
    assert!(cycle.failures.is_empty());
}

#[tokio::test]
async fn test_columnar_batch_single_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-23.5475,-22.9064,-15.7797"))
        .and(query_param("longitude", "-46.6361,-43.1822,-47.9297"))
        .and(query_param("start_date", "2024-03-01"))
        .and(query_param("end_date", "2024-03-04"))
        .and(query_param("timezone", "America/Sao_Paulo"))
        .and(query_param("timeformat", "unixtime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            columnar_location(4),
            columnar_location(3),
            columnar_location(4),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let cycle = forecaster(&server)
        .fetch(ProviderKind::OpenMeteo)
        .call()
        .await
        .unwrap();

    let names: Vec<&str> = cycle.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["São Paulo", "Brasília"]);
    let series = &cycle.series[0];
    assert_eq!(series.current.temperature, 27.0);
    assert_eq!(series.daily.dates(), &[date(2), date(3), date(4)]);
    assert_eq!(series.daily.min_temp(), &[21.0, 22.0, 23.0]);
    assert_eq!(series.daily.rain_sum(), Some(&[1.0, 1.0, 1.0][..]));

    assert_eq!(cycle.failures.len(), 1);
    assert!(matches!(
        cycle.failures[0].error,
        ProviderError::AxisLengthMismatch { expected: 4, found: 3, .. }
    ));
}

#[tokio::test]
async fn test_columnar_short_response_marks_missing_location() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([columnar_location(4), columnar_location(4)])),
        )
        .mount(&server)
        .await;

    let cycle = forecaster(&server)
        .fetch(ProviderKind::OpenMeteo)
        .call()
        .await
        .unwrap();
    assert_eq!(cycle.series.len(), 2);
    assert_eq!(cycle.failures[0].request.name, "Brasília");
    assert!(matches!(
        cycle.failures[0].error,
        ProviderError::MissingResponse(2)
    ));
}

#[tokio::test]
async fn test_failed_batch_fails_every_location() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = forecaster(&server)
        .fetch(ProviderKind::OpenMeteo)
        .call()
        .await;
    assert!(matches!(
        result,
        Err(ForecastError::AllLocationsFailed {
            provider: ProviderKind::OpenMeteo,
            attempted: 3,
            ..
        })
    ));
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ForecastConfig::builder()
        .tomorrow_io_url(format!("{}/v4/timelines", server.uri()))
        .build();
    let forecaster = Forecaster::new(config).unwrap();
    let result = forecaster.fetch(ProviderKind::TomorrowIo).call().await;
    assert!(matches!(
        result,
        Err(ForecastError::Configuration {
            variable: "TOMORROW_API_KEY",
            ..
        })
    ));
}

#[tokio::test]
async fn test_openweather_refresh_and_export() {
    let server = MockServer::start().await;
    let list: Vec<Value> = (0..40)
        .map(|i| json!({"dt": NOW + i * 10_800, "main": {"temp": 20.0 + (i % 8) as f64}}))
        .collect();

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("appid", OPENWEATHER_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"main": {"temp": 26.4}, "rain": {"1h": 0.6}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("appid", OPENWEATHER_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"list": list, "city": {"timezone": -10800}})),
        )
        .mount(&server)
        .await;

    let forecaster = forecaster(&server);
    let refresh = forecaster
        .refresh(ProviderKind::OpenWeather)
        .locations(vec![LocationRequest::new("Recife", -8.0539, -34.8811)])
        .call()
        .await
        .unwrap();
    assert!(refresh.published);
    assert!(refresh.failures.is_empty());

    let snapshot = forecaster.latest().await.unwrap();
    assert_eq!(snapshot.generation, refresh.generation);
    let series = &snapshot.series[0];
    assert_eq!(series.current.temperature, 26.0);
    assert_eq!(series.current.rain, Some(1.0));
    assert_eq!(series.daily.dates(), &[date(2), date(3), date(4)]);
    assert_eq!(series.daily.min_temp(), &[20.0, 20.0, 20.0]);
    assert_eq!(series.daily.max_temp(), &[27.0, 27.0, 27.0]);

    let dir = tempfile::tempdir().unwrap();
    let written = forecaster
        .export()
        .path(dir.path().join("previsao-tempo.csv"))
        .call()
        .await
        .unwrap();
    let text = std::fs::read_to_string(written).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Name,CurrentTemp,CurrentRain,Day1Date,Day1Min,Day1Max,Day1Rain"));
    // 2024-03-02 is a Saturday.
    assert_eq!(
        lines[1],
        "Recife,26°C,1mm,sáb.,20°C,27°C,-,dom.,20°C,27°C,-,seg.,20°C,27°C,-"
    );
}
