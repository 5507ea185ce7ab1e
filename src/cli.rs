use crate::config::load_config;
use crate::layout::compute_chain_layout;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::parser::parse_chain;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "flowstack", version, about = "Vertical flowchart chain layout and SVG export")]
pub struct Args {
    /// Input chain file (.flow) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme and layout overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height (the vertical budget the chain must fit)
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Compress the leading part of the chain to fit tighter canvases
    #[arg(long = "compact")]
    pub compact: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    /// Pretty JSON dump of the computed layout
    Layout,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if args.compact {
        config.layout.compact.enabled = true;
    }

    let input = read_input(args.input.as_deref())?;
    let chain = parse_chain(&input)?;
    let layout = compute_chain_layout(&chain, &config.theme, &config.layout, &config.render)?;
    if layout.overflow {
        eprintln!(
            "warning: chain does not fit the {}px canvas even at minimum spacing; consider --compact or a taller canvas",
            config.render.height
        );
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Layout => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &layout)?,
            None => {
                let dump = LayoutDump::from_layout(&layout);
                println!("{}", serde_json::to_string_pretty(&dump)?);
            }
        },
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
