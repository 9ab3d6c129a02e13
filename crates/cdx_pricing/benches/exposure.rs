//! Criterion benchmarks for exposure aggregation.
//!
//! Covers the per-trajectory PV reduction at varying trajectory counts and
//! schedule lengths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cdx_core::table::CurveTable;
use cdx_core::types::Date;
use cdx_pricing::exposure::{compute_exposure, CashFlowSpec};

/// Quarterly schedule of `n` dates starting 2005-03-10.
fn quarterly_schedule(n: usize) -> Vec<Date> {
    let start = Date::from_ymd(2005, 3, 10).unwrap();
    (0..n)
        .map(|i| start.add_months(3 * i as u32).unwrap())
        .collect()
}

/// Synthetic discount table: mildly decaying factors with per-trajectory
/// dispersion.
fn synthetic_discount(dates: &[Date], trajectories: usize) -> CurveTable {
    let values = (0..dates.len())
        .map(|i| {
            (0..trajectories)
                .map(|c| {
                    let base = (-0.04 * i as f64 / 4.0).exp();
                    base * (1.0 + ((c * 31 + i * 7) % 100) as f64 * 1e-4)
                })
                .collect()
        })
        .collect();
    CurveTable::new(dates.to_vec(), values).unwrap()
}

fn bench_compute_exposure(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_exposure");

    for (n_dates, trajectories) in [(40, 10), (40, 100), (40, 1000), (120, 100)] {
        let label = format!("{}dates_{}trajectories", n_dates, trajectories);
        let dates = quarterly_schedule(n_dates);
        let discount = synthetic_discount(&dates, trajectories);
        let spec = CashFlowSpec {
            coupon: 0.05,
            fee: 0.001,
            notional: 1.0,
            start_date: dates[0],
        };

        group.bench_with_input(
            BenchmarkId::new("pv", &label),
            &(dates, discount, spec),
            |b, (dates, discount, spec)| {
                b.iter(|| {
                    compute_exposure(
                        black_box(dates),
                        dates[0],
                        black_box(discount),
                        black_box(spec),
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute_exposure);
criterion_main!(benches);
