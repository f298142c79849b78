//! Topology Router CLI
//!
//! Usage:
//!   topology-router [OPTIONS] [FILE]
//!
//! Options:
//!   -f, --format <FORMAT>        Output format: svg or toml [default: svg]
//!   -d, --debug                  Log routing decisions to stderr
//!   -c, --clearance <N>          Override the scene's obstacle clearance
//!   -r, --corner-radius <N>      Override the scene's corner radius
//!   -h, --help                   Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use topology_router::{render_svg, route_with_config, RenderConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// SVG preview of boxes and routed edges
    Svg,
    /// Routed points and path descriptors as TOML
    Toml,
}

#[derive(Parser)]
#[command(name = "topology-router")]
#[command(about = "Orthogonal edge routing for network topology diagrams")]
struct Cli {
    /// Scene file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "svg")]
    format: Format,

    /// Log routing decisions to stderr
    #[arg(short, long)]
    debug: bool,

    /// Override the scene's obstacle clearance
    #[arg(short, long)]
    clearance: Option<f64>,

    /// Override the scene's corner radius
    #[arg(short = 'r', long)]
    corner_radius: Option<f64>,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("topology_router=trace"))
            .with_writer(io::stderr)
            .init();
    }

    let filename = cli
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut config = RenderConfig::new();
    if let Some(clearance) = cli.clearance {
        config = config.with_clearance(clearance);
    }
    if let Some(radius) = cli.corner_radius {
        config = config.with_corner_radius(radius);
    }

    let routed = match route_with_config(&source, &config) {
        Ok(routed) => routed,
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename).trim_end());
            std::process::exit(1);
        }
    };

    match cli.format {
        Format::Svg => println!("{}", render_svg(&routed, &config.svg)),
        Format::Toml => match toml::to_string(&routed) {
            Ok(out) => print!("{}", out),
            Err(e) => {
                eprintln!("Error writing TOML: {}", e);
                std::process::exit(1);
            }
        },
    }
}
