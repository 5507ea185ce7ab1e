use serde::{Deserialize, Serialize};

/// Shape drawn for a chain block. Shapes only affect sizing and rendering;
/// the spacing solver sees nothing but heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockShape {
    /// Oval entry point.
    Start,
    /// Rectangular process step.
    Process,
    /// Diamond branch point.
    Decision,
    /// Stadium-shaped end point.
    Terminator,
}

/// One step in a vertical flowchart chain. `compress` scales the solver's
/// base step for the gap *below* this block; 1.0 means no extra compression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub label: String,
    pub shape: BlockShape,
    pub compress: f32,
}

impl Block {
    pub fn new(label: impl Into<String>, shape: BlockShape) -> Self {
        Self {
            label: label.into(),
            shape,
            compress: 1.0,
        }
    }
}

/// An ordered top-to-bottom chain of blocks, built fresh for every layout
/// call and discarded once the caller has read the result back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chain {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

impl Chain {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
