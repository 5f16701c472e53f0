#[path = "common/rng.rs"]
mod bench_rng;
#[path = "common/tier.rs"]
mod bench_tier;

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use cellmap_core::FieldCandidate;
use cellmap_core::api::{ExtractOptions, extract_table_fields};
use cellmap_core::geometry::BBox;
use cellmap_core::table::{GroupingStrategy, TableSettings, detect_tables};

use bench_rng::{XorShift64, bench_seed};
use bench_tier::{BenchTier, bench_tier, configure_group};

/// A page with `tables` jittered grids of `rows` x `cols` plus loose fields.
fn synthetic_page(
    tables: usize,
    rows: usize,
    cols: usize,
    rng: &mut XorShift64,
) -> Vec<FieldCandidate> {
    let mut out = Vec::new();
    for t in 0..tables {
        let y0 = t as f64 * (rows as f64 * 40.0 + 200.0);
        for r in 0..rows {
            for c in 0..cols {
                let x = 40.0 + c as f64 * 110.0 + rng.jitter(4.0);
                let y = y0 + r as f64 * 40.0 + rng.jitter(4.0);
                let label = (r == 0).then(|| format!("Coluna {c}"));
                out.push(FieldCandidate::new(
                    format!("t{t}r{r}c{c}"),
                    label.as_deref(),
                    BBox::new(x, y, 100.0, 30.0),
                ));
            }
        }
        out.push(FieldCandidate::new(
            format!("t{t}note"),
            Some("Observações"),
            BBox::new(40.0, y0 + rows as f64 * 40.0 + 120.0, 400.0, 60.0),
        ));
    }
    out
}

fn bench_detect(c: &mut Criterion) {
    let tier = bench_tier();
    let mut rng = XorShift64::new(bench_seed());
    let sizes: &[(usize, usize, usize)] = match tier {
        BenchTier::Quick => &[(1, 4, 3), (3, 8, 5)],
        BenchTier::Full => &[(1, 4, 3), (3, 8, 5), (6, 12, 6)],
    };

    let mut group = c.benchmark_group("table_detect");
    configure_group(&mut group, tier);
    for &(tables, rows, cols) in sizes {
        let page = synthetic_page(tables, rows, cols, &mut rng);
        let id = format!("{tables}x{rows}x{cols}");
        for (name, grouping) in [
            ("single", GroupingStrategy::SingleExpansion),
            ("components", GroupingStrategy::ConnectedComponents),
        ] {
            let settings = TableSettings {
                grouping,
                ..Default::default()
            };
            group.bench_with_input(BenchmarkId::new(name, &id), &page, |b, page| {
                b.iter(|| black_box(detect_tables(black_box(page), &settings)))
            });
        }
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let tier = bench_tier();
    let mut rng = XorShift64::new(bench_seed());
    let page = synthetic_page(3, 8, 5, &mut rng);
    let options = ExtractOptions::default();

    let mut group = c.benchmark_group("table_extract_fields");
    configure_group(&mut group, tier);
    group.bench_function("3x8x5", |b| {
        b.iter(|| black_box(extract_table_fields(black_box(&page), &options)))
    });
    group.finish();
}

criterion_group!(benches, bench_detect, bench_extract);
criterion_main!(benches);
