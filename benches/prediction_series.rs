use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use envsafety_forecast::time_series::generate_time_series;
use envsafety_forecast::{EnvironmentalPredictor, ForecastRequest, MetricsSnapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_prediction_series(c: &mut Criterion) {
    let predictor = EnvironmentalPredictor::default();
    let now = Utc::now();
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("predict_12_months", |b| {
        let request = ForecastRequest {
            current: MetricsSnapshot::default(),
            country_code: "BD",
            prediction_type: "comprehensive",
            timeframe: 12,
        };
        b.iter(|| predictor.predict(black_box(&request), now, &mut rng))
    });

    c.bench_function("time_series_36_plus_12", |b| {
        let today = now.date_naive();
        b.iter(|| generate_time_series(black_box("IN"), 36, 12, today, &mut rng))
    });
}

criterion_group!(benches, bench_prediction_series);
criterion_main!(benches);
