use crate::layout::ChainLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// JSON mirror of a computed chain layout, for debugging and golden tests.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub title: Option<String>,
    pub width: f32,
    pub height: f32,
    pub overflow: bool,
    pub blocks: Vec<BlockDump>,
    pub arrows: Vec<ArrowDump>,
}

#[derive(Debug, Serialize)]
pub struct BlockDump {
    pub index: usize,
    pub shape: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label_lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ArrowDump {
    pub from: usize,
    pub to: usize,
    pub points: Vec<[f32; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &ChainLayout) -> Self {
        let blocks = layout
            .blocks
            .iter()
            .map(|block| BlockDump {
                index: block.index,
                shape: format!("{:?}", block.shape),
                x: block.x,
                y: block.y,
                width: block.width,
                height: block.height,
                label_lines: block.label.lines.clone(),
            })
            .collect();
        let arrows = layout
            .arrows
            .iter()
            .map(|arrow| ArrowDump {
                from: arrow.from,
                to: arrow.to,
                points: arrow.points.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();
        LayoutDump {
            title: layout
                .title
                .as_ref()
                .map(|t| t.text.lines.join(" ")),
            width: layout.width,
            height: layout.height,
            overflow: layout.overflow,
            blocks,
            arrows,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &ChainLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
