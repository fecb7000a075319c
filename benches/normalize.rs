use criterion::{black_box, criterion_group, criterion_main, Criterion};
use forecastkit::{
    flatten, reconstruct, summarize, DailyAggregator, ExportOptions, ForecastWindow,
    LocationRequest, NormalizeContext, OpenWeatherPayload, ProviderPayload, RawSample,
    TimeAxisSpec,
};
use serde_json::json;

const START: i64 = 1_709_305_200;

fn samples() -> Vec<RawSample> {
    (0..40)
        .rev()
        .map(|i| RawSample::new(START + i * 10_800).with_value("temp", 18.0 + (i % 8) as f64))
        .collect()
}

fn openweather_payload() -> OpenWeatherPayload {
    let list: Vec<_> = (0..40)
        .map(|i| json!({"dt": START + i * 10_800, "main": {"temp": 18.0 + (i % 8) as f64}}))
        .collect();
    OpenWeatherPayload {
        current: serde_json::from_value(json!({"main": {"temp": 24.5}})).unwrap(),
        forecast: serde_json::from_value(json!({"list": list, "city": {"timezone": -10800}}))
            .unwrap(),
    }
}

fn bench_normalize(c: &mut Criterion) {
    let aggregator = DailyAggregator::new(-10_800, ForecastWindow::default());
    c.bench_function("aggregate_40_samples", |b| {
        b.iter(|| {
            let buckets = aggregator.aggregate(black_box(samples()));
            buckets
                .iter()
                .filter_map(|bucket| summarize(bucket, "temp"))
                .count()
        })
    });

    let axis = TimeAxisSpec::new(START, START + 16 * 86_400, 86_400, -10_800);
    c.bench_function("reconstruct_16_days", |b| b.iter(|| reconstruct(black_box(&axis))));

    let ctx = NormalizeContext::new(ForecastWindow::default(), -10_800);
    let payload = openweather_payload();
    c.bench_function("normalize_openweather", |b| {
        b.iter(|| ProviderPayload::RawSamples(black_box(payload.clone())).normalize("Recife", &ctx))
    });

    let series: Vec<_> = LocationRequest::brazilian_capitals()
        .iter()
        .cycle()
        .take(27)
        .filter_map(|location| {
            ProviderPayload::RawSamples(payload.clone())
                .normalize(&location.name, &ctx)
                .ok()
        })
        .collect();
    c.bench_function("flatten_27_locations", |b| {
        b.iter(|| flatten(black_box(&series), ExportOptions::default()))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
