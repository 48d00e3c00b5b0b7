//! Scene Layout CLI
//!
//! Usage:
//!   scene-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>      Layout configuration (TOML format)
//!   -W, --width <N>          Override the scene's canvas width
//!   -H, --height <N>         Override the scene's canvas height
//!   -f, --format <FORMAT>    Output format: svg or text
//!   -s, --seed <N>           Seed for free placement
//!       --padding <N>        SVG margin around the canvas
//!       --fragment           Emit an SVG fragment for embedding
//!       --no-labels          Don't print nouns over their drawables
//!       --log-level <LEVEL>  Log level (off, error, warn, info, debug, trace)
//!   -h, --help               Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use log::{debug, error, info, LevelFilter};

use scene_layout::{
    arrange, render_svg, render_text, Canvas, Error, LayoutConfig, SceneFile, SvgConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "scene-layout")]
#[command(about = "Lay out the nouns of a sentence on a canvas")]
struct Cli {
    /// Scene file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Canvas width, overriding the scene file
    #[arg(short = 'W', long)]
    width: Option<i32>,

    /// Canvas height, overriding the scene file
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Seed for free placement, for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// SVG margin around the canvas
    #[arg(long)]
    padding: Option<i32>,

    /// Emit a single-line SVG fragment without the XML declaration
    #[arg(long)]
    fragment: bool,

    /// Don't print nouns over their drawables
    #[arg(long)]
    no_labels: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting scene-layout");
    debug!(cli:?; "Parsed arguments");

    if cli.input.is_none() && io::stdin().is_terminal() {
        eprintln!("Reading scene from stdin; pass a FILE or pipe a scene in. See --help.");
    }

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, Error> {
    let scene = match &cli.input {
        Some(path) => SceneFile::from_file(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(scene_layout::SceneFileError::from)?;
            SceneFile::from_toml_str(&buffer)?
        }
    };

    let mut config = match &cli.config {
        Some(path) => LayoutConfig::from_file(path)?,
        None => LayoutConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let scene_canvas = scene.canvas();
    let canvas = Canvas::new(
        cli.width.unwrap_or(scene_canvas.width),
        cli.height.unwrap_or(scene_canvas.height),
    );

    let mut graph = scene.build()?;
    let report = arrange(&mut graph, canvas.width, canvas.height, &config)?;
    info!(
        passes = report.passes,
        shifts = report.shifts,
        relocations = report.relocations,
        converged = report.converged;
        "Layout finished"
    );

    Ok(match cli.format {
        Format::Svg => render_svg(&graph, canvas, &svg_config(cli)),
        Format::Text => render_text(&graph),
    })
}

fn svg_config(cli: &Cli) -> SvgConfig {
    let mut config = SvgConfig::new().with_labels(!cli.no_labels);
    if let Some(padding) = cli.padding {
        config = config.with_padding(padding);
    }
    if cli.fragment {
        config = config.fragment();
    }
    config
}
