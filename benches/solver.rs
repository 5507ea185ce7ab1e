use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flowstack::config::{LayoutConfig, RenderConfig};
use flowstack::layout::{ChainSpan, compute_chain_layout, solve_vertical_chain};
use flowstack::parser::parse_chain;
use flowstack::render::render_svg;
use flowstack::theme::Theme;
use std::hint::black_box;

fn chain_source(blocks: usize) -> String {
    let mut out = String::from("%% title: Generated chain\n( ) Start\n");
    for i in 0..blocks {
        if i % 4 == 3 {
            out.push_str(&format!("< > Check step {i}?\n"));
        } else {
            out.push_str(&format!("[ ] Do the work for step number {i}\n"));
        }
    }
    out.push_str("(( )) Done\n");
    out
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_vertical_chain");
    for n in [4usize, 16, 64, 256] {
        let heights: Vec<f32> = (0..n).map(|i| 40.0 + (i % 5) as f32 * 12.0).collect();
        let factors: Vec<f32> = (0..n - 1)
            .map(|i| if i < n / 2 { 0.4 } else { 1.0 })
            .collect();
        let span = ChainSpan {
            start_center: 60.0,
            max_center: 50.0 * n as f32,
            min_center_floor: 10.0,
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let centers = solve_vertical_chain(
                    black_box(&heights),
                    110.0,
                    24.0,
                    black_box(&factors),
                    span,
                )
                .expect("solve failed");
                black_box(centers.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::modern();
    let config = LayoutConfig {
        fast_text_metrics: true,
        ..LayoutConfig::default()
    };
    let render = RenderConfig::default();
    for n in [8usize, 32, 128] {
        let chain = parse_chain(&chain_source(n)).expect("parse failed");
        group.bench_with_input(BenchmarkId::from_parameter(n), &chain, |b, chain| {
            b.iter(|| {
                let layout = compute_chain_layout(black_box(chain), &theme, &config, &render)
                    .expect("layout failed");
                black_box(layout.blocks.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::modern();
    let config = LayoutConfig {
        fast_text_metrics: true,
        ..LayoutConfig::default()
    };
    let render = RenderConfig::default();
    for n in [8usize, 32, 128] {
        let source = chain_source(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &source, |b, source| {
            b.iter(|| {
                let chain = parse_chain(black_box(source)).expect("parse failed");
                let layout = compute_chain_layout(&chain, &theme, &config, &render)
                    .expect("layout failed");
                let svg = render_svg(&layout, &theme, &render);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_solver, bench_layout, bench_end_to_end
);
criterion_main!(benches);
