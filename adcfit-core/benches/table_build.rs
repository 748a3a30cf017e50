use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use adcfit_core::{build_table, FitConfig, ThermistorConfig};

fn bench_ntc_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("ntc_table");

    for (name, config) in [
        ("10k_12bit", ThermistorConfig::ntc_10k_3950()),
        ("100k_hotend", ThermistorConfig::ntc_100k_hotend()),
        ("10k_15bit", ThermistorConfig::precision()),
    ] {
        group.bench_with_input(BenchmarkId::new("generate", name), &config, |b, config| {
            b.iter(|| black_box(config.generate_table()))
        });
    }

    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    let curve = ThermistorConfig::ntc_10k_3950().reference_curve();
    let mut group = c.benchmark_group("bound");

    for bound in [0.5, 0.1, 0.02] {
        let config = FitConfig::default().with_max_error(bound);
        group.bench_with_input(BenchmarkId::from_parameter(bound), &config, |b, config| {
            b.iter(|| black_box(build_table(&curve, 677, 3963, config)))
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let generated = ThermistorConfig::ntc_10k_3950()
        .generate_table()
        .unwrap();
    let table = generated.table.lookup();

    c.bench_function("lookup_all_codes", |b| {
        b.iter(|| {
            let mut acc = 0i32;
            for code in 0..4096u16 {
                acc = acc.wrapping_add(i32::from(table.lookup(black_box(code))));
            }
            acc
        })
    });
}

criterion_group!(benches, bench_ntc_tables, bench_bounds, bench_lookup);
criterion_main!(benches);
