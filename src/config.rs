use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Preferred center-to-center gap between consecutive blocks. The solver
    /// treats this as the ceiling for its base step.
    pub target_gap: f32,
    /// Empty space kept between adjacent block edges beyond their
    /// half-heights.
    pub clearance_margin: f32,
    pub node_padding_x: f32,
    pub node_padding_y: f32,
    pub min_node_width: f32,
    pub label_line_height: f32,
    pub max_label_width_chars: usize,
    /// Diamonds inscribe their label, so their outline grows by this factor.
    pub decision_scale: f32,
    pub margin_x: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub title_gap: f32,
    /// Skip the font database and size text from the built-in width table.
    pub fast_text_metrics: bool,
    pub compact: CompactConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            target_gap: 110.0,
            clearance_margin: 24.0,
            node_padding_x: 30.0,
            node_padding_y: 15.0,
            min_node_width: 120.0,
            label_line_height: 1.5,
            max_label_width_chars: 22,
            decision_scale: 1.6,
            margin_x: 60.0,
            margin_top: 50.0,
            margin_bottom: 50.0,
            title_gap: 24.0,
            fast_text_metrics: false,
            compact: CompactConfig::default(),
        }
    }
}

/// Compact mode squeezes the leading part of the chain first, mirroring how
/// hand-tuned flowcharts give up whitespace near the top before the tail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompactConfig {
    pub enabled: bool,
    /// Multiplier applied to `target_gap` when compact mode is on.
    pub target_gap_scale: f32,
    /// Compression factor forced onto the leading gaps.
    pub leading_factor: f32,
    /// Fraction of the chain (from the top) that counts as leading.
    pub leading_fraction: f32,
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target_gap_scale: 0.7,
            leading_factor: 0.5,
            leading_fraction: 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 1000.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutOverrides>,
    render: Option<RenderOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    title_font_size: Option<f32>,
    process_fill: Option<String>,
    decision_fill: Option<String>,
    terminator_fill: Option<String>,
    border_color: Option<String>,
    text_color: Option<String>,
    line_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOverrides {
    target_gap: Option<f32>,
    clearance_margin: Option<f32>,
    node_padding_x: Option<f32>,
    node_padding_y: Option<f32>,
    min_node_width: Option<f32>,
    label_line_height: Option<f32>,
    max_label_width_chars: Option<usize>,
    decision_scale: Option<f32>,
    margin_x: Option<f32>,
    margin_top: Option<f32>,
    margin_bottom: Option<f32>,
    fast_text_metrics: Option<bool>,
    compact: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderOverrides {
    width: Option<f32>,
    height: Option<f32>,
    background: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(&mut config, parsed);
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.title_font_size {
            config.theme.title_font_size = v;
        }
        if let Some(v) = vars.process_fill {
            config.theme.process_fill = v;
        }
        if let Some(v) = vars.decision_fill {
            config.theme.decision_fill = v;
        }
        if let Some(v) = vars.terminator_fill {
            config.theme.terminator_fill = v;
        }
        if let Some(v) = vars.border_color {
            config.theme.border_color = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v.clone();
            config.render.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.target_gap {
            config.layout.target_gap = v;
        }
        if let Some(v) = layout.clearance_margin {
            config.layout.clearance_margin = v;
        }
        if let Some(v) = layout.node_padding_x {
            config.layout.node_padding_x = v;
        }
        if let Some(v) = layout.node_padding_y {
            config.layout.node_padding_y = v;
        }
        if let Some(v) = layout.min_node_width {
            config.layout.min_node_width = v;
        }
        if let Some(v) = layout.label_line_height {
            config.layout.label_line_height = v;
        }
        if let Some(v) = layout.max_label_width_chars {
            config.layout.max_label_width_chars = v;
        }
        if let Some(v) = layout.decision_scale {
            config.layout.decision_scale = v;
        }
        if let Some(v) = layout.margin_x {
            config.layout.margin_x = v;
        }
        if let Some(v) = layout.margin_top {
            config.layout.margin_top = v;
        }
        if let Some(v) = layout.margin_bottom {
            config.layout.margin_bottom = v;
        }
        if let Some(v) = layout.fast_text_metrics {
            config.layout.fast_text_metrics = v;
        }
        if let Some(v) = layout.compact {
            config.layout.compact.enabled = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }
}
