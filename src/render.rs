use crate::config::RenderConfig;
use crate::ir::BlockShape;
use crate::layout::{BlockLayout, ChainLayout, TextBlock};
use crate::theme::Theme;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

pub fn render_svg(layout: &ChainLayout, theme: &Theme, render: &RenderConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        render.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");

    if let Some(title) = &layout.title {
        let y = title.y + theme.title_font_size;
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\" text-anchor=\"middle\">{}</text>",
            title.x,
            theme.font_family,
            theme.title_font_size,
            theme.text_color,
            escape_xml(title.text.lines.join(" ").as_str())
        ));
    }

    for arrow in &layout.arrows {
        let d = points_to_path(&arrow.points);
        svg.push_str(&format!(
            "<path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\" marker-end=\"url(#arrow)\"/>",
            theme.line_color
        ));
    }

    for block in &layout.blocks {
        svg.push_str(&block_shape_svg(block, theme));
        svg.push_str(&label_svg(block.x, block.y, &block.label, theme));
    }

    svg.push_str("</svg>");
    svg
}

fn block_shape_svg(block: &BlockLayout, theme: &Theme) -> String {
    let left = block.x - block.width / 2.0;
    let top = block.top();
    match block.shape {
        BlockShape::Process => format!(
            "<rect x=\"{left:.2}\" y=\"{top:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"4\" ry=\"4\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            block.width, block.height, theme.process_fill, theme.border_color
        ),
        BlockShape::Start | BlockShape::Terminator => {
            let rx = block.height / 2.0;
            let fill = if block.shape == BlockShape::Start {
                &theme.process_fill
            } else {
                &theme.terminator_fill
            };
            format!(
                "<rect x=\"{left:.2}\" y=\"{top:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{rx:.2}\" ry=\"{rx:.2}\" fill=\"{fill}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
                block.width, block.height, theme.border_color
            )
        }
        BlockShape::Decision => {
            let half_w = block.width / 2.0;
            let half_h = block.height / 2.0;
            format!(
                "<polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
                block.x,
                block.y - half_h,
                block.x + half_w,
                block.y,
                block.x,
                block.y + half_h,
                block.x - half_w,
                block.y,
                theme.decision_fill,
                theme.border_color
            )
        }
    }
}

fn label_svg(x: f32, center_y: f32, label: &TextBlock, theme: &Theme) -> String {
    let line_height = if label.lines.is_empty() {
        theme.font_size
    } else {
        label.height / label.lines.len() as f32
    };
    let mut out = format!(
        "<text x=\"{x:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\">",
        theme.font_family, theme.font_size, theme.text_color
    );
    let first_baseline =
        center_y - label.height / 2.0 + line_height / 2.0 + theme.font_size * 0.35;
    for (i, line) in label.lines.iter().enumerate() {
        let y = first_baseline + i as f32 * line_height;
        out.push_str(&format!(
            "<tspan x=\"{x:.2}\" y=\"{y:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    out.push_str("</text>");
    out
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let op = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{op} {x:.2} {y:.2} "));
    }
    d.trim_end().to_string()
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn write_output_svg(svg: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, svg)?,
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(svg.as_bytes())?;
            handle.write_all(b"\n")?;
        }
    }
    Ok(())
}
