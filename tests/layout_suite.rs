use std::path::Path;

use flowstack::{
    ChainLayout, LayoutConfig, RenderConfig, Theme, compute_chain_layout, parse_chain, render_svg,
};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn assert_chain_invariants(layout: &ChainLayout, clearance: f32, fixture: &str) {
    for pair in layout.blocks.windows(2) {
        assert!(
            pair[1].y > pair[0].y,
            "{fixture}: centers not strictly increasing"
        );
        let edge_gap = pair[1].top() - pair[0].bottom();
        assert!(
            edge_gap >= clearance - 1e-3,
            "{fixture}: clearance violated, edge gap {edge_gap}"
        );
    }
}

fn layout_fixture(path: &Path) -> (ChainLayout, LayoutConfig, RenderConfig) {
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    let chain = parse_chain(&input).expect("parse failed");
    let theme = Theme::modern();
    let config = LayoutConfig {
        fast_text_metrics: true,
        ..LayoutConfig::default()
    };
    let render = RenderConfig::default();
    let layout = compute_chain_layout(&chain, &theme, &config, &render).expect("layout failed");
    (layout, config, render)
}

#[test]
fn layout_and_render_all_fixtures() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "basic.flow",
        "decisions.flow",
        "titled.flow",
        "compressed.flow",
        "long_labels.flow",
        "single.flow",
        "tall.flow",
    ];

    for rel in candidates {
        let path = root.join(rel);
        assert!(path.exists(), "fixture missing: {rel}");
        let (layout, config, render) = layout_fixture(&path);
        assert_chain_invariants(&layout, config.clearance_margin, rel);
        let svg = render_svg(&layout, &Theme::modern(), &render);
        assert_valid_svg(&svg, rel);
    }
}

#[test]
fn tall_fixture_overflows_a_short_canvas_but_fits_a_tall_one() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/tall.flow");
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    let chain = parse_chain(&input).expect("parse failed");
    let theme = Theme::modern();
    let config = LayoutConfig {
        fast_text_metrics: true,
        ..LayoutConfig::default()
    };

    let short = RenderConfig {
        height: 300.0,
        ..RenderConfig::default()
    };
    let layout = compute_chain_layout(&chain, &theme, &config, &short).expect("layout failed");
    assert!(layout.overflow, "expected overflow on a 300px canvas");
    assert_chain_invariants(&layout, config.clearance_margin, "tall.flow/short");

    let tall = RenderConfig {
        height: 3000.0,
        ..RenderConfig::default()
    };
    let layout = compute_chain_layout(&chain, &theme, &config, &tall).expect("layout failed");
    assert!(!layout.overflow, "3000px canvas should fit");
}

#[test]
fn compressed_fixture_keeps_leading_gaps_no_wider_than_tail_gaps() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/compressed.flow");
    let (layout, _, _) = layout_fixture(&path);
    let gaps: Vec<f32> = layout
        .blocks
        .windows(2)
        .map(|pair| pair[1].y - pair[0].y)
        .collect();
    let first = gaps.first().copied().unwrap();
    let last = gaps.last().copied().unwrap();
    assert!(
        first <= last + 1e-3,
        "compressed leading gap {first} wider than tail gap {last}"
    );
}

#[test]
fn layouts_are_deterministic_across_calls() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/basic.flow");
    let (a, _, _) = layout_fixture(&path);
    let (b, _, _) = layout_fixture(&path);
    let centers = |l: &ChainLayout| l.blocks.iter().map(|blk| blk.y).collect::<Vec<_>>();
    assert_eq!(centers(&a), centers(&b));
}
