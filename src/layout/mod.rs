//! Chain layout: measures labels, sizes blocks per shape, runs the vertical
//! spacing solver, and emits placed shapes plus connector arrows.

pub mod solver;
mod text;

use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::{BlockShape, Chain};
use crate::theme::Theme;

pub use solver::{ChainSpan, SolverError, overflows, solve_vertical_chain};

use text::measure_label_with_font_size;

/// Wrapped, measured label text.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

/// A placed block. `x`/`y` are the shape center.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    pub index: usize,
    pub shape: BlockShape,
    pub label: TextBlock,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BlockLayout {
    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Straight connector between two consecutive blocks.
#[derive(Debug, Clone)]
pub struct ArrowLayout {
    pub from: usize,
    pub to: usize,
    pub points: Vec<(f32, f32)>,
}

#[derive(Debug, Clone)]
pub struct TitleLayout {
    pub text: TextBlock,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct ChainLayout {
    pub title: Option<TitleLayout>,
    pub blocks: Vec<BlockLayout>,
    pub arrows: Vec<ArrowLayout>,
    pub width: f32,
    pub height: f32,
    /// Fit invariant re-checked after the solve: the chain did not fit inside
    /// the canvas even at minimum spacing. Rendering still proceeds; the
    /// caller decides whether to warn or switch to compact mode.
    pub overflow: bool,
}

/// When the canvas is too short, the chain may ride up into the top margin
/// down to this pad before settling for minimum packing.
const TOP_FLOOR_PAD: f32 = 12.0;

pub fn compute_chain_layout(
    chain: &Chain,
    theme: &Theme,
    config: &LayoutConfig,
    render: &RenderConfig,
) -> Result<ChainLayout, SolverError> {
    if chain.is_empty() {
        return Err(SolverError::EmptyChain);
    }
    let n = chain.blocks.len();

    let title = chain.title.as_ref().map(|t| {
        measure_label_with_font_size(t, theme.title_font_size, &theme.font_family, config, false)
    });
    let title_offset = title
        .as_ref()
        .map(|t| t.height + config.title_gap)
        .unwrap_or(0.0);

    let mut widths = Vec::with_capacity(n);
    let mut heights = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for block in &chain.blocks {
        let label = text::measure_label(&block.label, theme, config);
        let mut width = (label.width + 2.0 * config.node_padding_x).max(config.min_node_width);
        let mut height = label.height + 2.0 * config.node_padding_y;
        if block.shape == BlockShape::Decision {
            // The label lives in the diamond's inscribed rectangle.
            width *= config.decision_scale;
            height *= config.decision_scale;
        }
        widths.push(width);
        heights.push(height);
        labels.push(label);
    }

    let mut target_gap = config.target_gap;
    let mut factors: Vec<f32> = chain.blocks[..n - 1].iter().map(|b| b.compress).collect();
    if config.compact.enabled {
        target_gap *= config.compact.target_gap_scale;
        let leading = ((n - 1) as f32 * config.compact.leading_fraction).ceil() as usize;
        for factor in factors.iter_mut().take(leading) {
            *factor = factor.min(config.compact.leading_factor);
        }
    }

    let half_first = heights[0] / 2.0;
    let span = ChainSpan {
        start_center: config.margin_top + title_offset + half_first,
        max_center: render.height - config.margin_bottom,
        min_center_floor: TOP_FLOOR_PAD + title_offset + half_first,
    };
    let centers = solve_vertical_chain(
        &heights,
        target_gap,
        config.clearance_margin,
        &factors,
        span,
    )?;
    let overflow = overflows(&centers, span.max_center);

    let widest = widths.iter().fold(0.0f32, |acc, w| acc.max(*w));
    let width = render.width.max(widest + 2.0 * config.margin_x);
    let center_x = width / 2.0;

    let blocks: Vec<BlockLayout> = (0..n)
        .map(|i| BlockLayout {
            index: i,
            shape: chain.blocks[i].shape,
            label: labels[i].clone(),
            x: center_x,
            y: centers[i],
            width: widths[i],
            height: heights[i],
        })
        .collect();

    let arrows: Vec<ArrowLayout> = blocks
        .windows(2)
        .map(|pair| ArrowLayout {
            from: pair[0].index,
            to: pair[1].index,
            points: vec![(center_x, pair[0].bottom()), (center_x, pair[1].top())],
        })
        .collect();

    let title = title.map(|text| TitleLayout {
        x: center_x,
        y: config.margin_top,
        text,
    });

    let content_bottom = blocks
        .last()
        .map(|b| b.bottom() + config.margin_bottom)
        .unwrap_or(render.height);
    let height = render.height.max(content_bottom);

    Ok(ChainLayout {
        title,
        blocks,
        arrows,
        width,
        height,
        overflow,
    })
}
