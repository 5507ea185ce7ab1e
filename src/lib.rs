#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{Block, BlockShape, Chain};
pub use layout::{
    ChainLayout, ChainSpan, SolverError, compute_chain_layout, overflows, solve_vertical_chain,
};
pub use parser::parse_chain;
pub use render::render_svg;
pub use theme::Theme;
