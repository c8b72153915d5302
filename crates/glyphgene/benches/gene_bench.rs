//! Criterion benchmark for whole gene builds.
//! Focus sizes: stroke counts in {1, 4, 8}.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glyphgene::geometry::{PointDistance, Rect, Vec2};
use glyphgene::han::{HanChar, Stroke};
use glyphgene::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn stroke_from_points(index: usize, points: &[(f64, f64)]) -> Stroke {
    let pts: Vec<Vec2> = points.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
    let mut cumulative = vec![0.0];
    for w in pts.windows(2) {
        let last = *cumulative.last().unwrap();
        cumulative.push(last + (w[1] - w[0]).norm());
    }
    let total: f64 = *cumulative.last().unwrap();
    let forward: Vec<PointDistance> = pts
        .iter()
        .zip(&cumulative)
        .map(|(&p, &d)| PointDistance::new(p, if total > 0.0 { d / total } else { 0.0 }))
        .collect();
    let reverse: Vec<PointDistance> = forward
        .iter()
        .rev()
        .map(|pd| PointDistance::new(pd.point(), 1.0 - pd.fractional))
        .collect();
    Stroke {
        index,
        bounds: Rect::around(pts.iter().copied()).unwrap(),
        length: total,
        forward,
        reverse,
    }
}

/// Ladder of horizontal strokes across a 500-unit grid.
fn character(stroke_count: usize) -> HanChar {
    let strokes: Vec<Stroke> = (0..stroke_count)
        .map(|i| {
            let y = 50.0 + 400.0 * (i as f64) / (stroke_count as f64);
            stroke_from_points(i + 1, &[(50.0, y), (450.0, y)])
        })
        .collect();
    HanChar {
        codepoint: "4E2D".to_string(),
        bounds: Rect::new(0.0, 0.0, 500.0, 500.0),
        length: strokes.iter().map(|s| s.length).sum(),
        min_stroke_length: 400.0,
        strokes,
        groups: Vec::new(),
        overlaps: Vec::new(),
    }
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("gene_build");
    for &n in &[1usize, 4, 8] {
        let han = character(n);
        group.bench_with_input(BenchmarkId::new("default_params", n), &han, |b, han| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(17);
                build_gene(
                    han,
                    "",
                    None,
                    &BuildCfg::default(),
                    JoinSelect::Best,
                    &mut rng,
                )
                .unwrap()
            });
        });
        group.bench_with_input(BenchmarkId::new("min_order", n), &han, |b, han| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(17);
                build_gene(
                    han,
                    "omin",
                    None,
                    &BuildCfg::default(),
                    JoinSelect::Best,
                    &mut rng,
                )
                .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
