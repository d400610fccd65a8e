use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;
use display::{Display, DisplayConfig, PointerClick, View};
use topography::{DEFAULT_DATA_PATH, DEFAULT_STACK_SIZE};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Map and profile views of a tau decay event")]
struct Args {
    /// Event file: a single JSON event or one event per line
    events: PathBuf,

    /// Zero-based index of the event to display
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Directory of .hgt elevation tiles (default: $TOPOGRAPHY_PATH or share/topography)
    #[arg(long)]
    topography: Option<PathBuf>,

    /// Maximum number of elevation tiles kept in memory
    #[arg(long, default_value_t = DEFAULT_STACK_SIZE)]
    stack_size: usize,

    /// Directory receiving map.svg and profile.svg (default: $EVENT_DISPLAY_OUT or .)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Figure size in pixels
    #[arg(long, default_value = "800x600", value_parser = parse_size)]
    size: (u32, u32),

    /// Read pointer clicks from stdin, one `map|profile <x_px> <y_px>` per line
    #[arg(long)]
    clicks: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    if w == 0 || h == 0 {
        return Err("figure size must be non-zero".to_string());
    }
    Ok((w, h))
}

fn parse_click(line: &str) -> Result<(View, PointerClick), String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let &[view, x, y] = parts.as_slice() else {
        return Err("expected `<view> <x_px> <y_px>`".to_string());
    };
    let view: View = view.parse()?;
    let x: f64 = x.parse().map_err(|e| format!("x: {e}"))?;
    let y: f64 = y.parse().map_err(|e| format!("y: {e}"))?;
    Ok((view, PointerClick::new(x, y)))
}

fn env_path(var: &str, default: &str) -> PathBuf {
    env::var_os(var).map_or_else(|| PathBuf::from(default), PathBuf::from)
}

fn config_from(args: &Args) -> DisplayConfig {
    let topography_path = args
        .topography
        .clone()
        .unwrap_or_else(|| env_path("TOPOGRAPHY_PATH", DEFAULT_DATA_PATH));
    let output_dir = args
        .out
        .clone()
        .unwrap_or_else(|| env_path("EVENT_DISPLAY_OUT", "."));
    DisplayConfig {
        topography_path,
        stack_size: args.stack_size,
        output_dir,
        figure_size: args.size,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let event = shower::load_event(&args.events, args.index)?;
    info!(
        "event #{} from {} at origin {:?}",
        args.index,
        args.events.display(),
        event.origin
    );

    let mut display = Display::new(config_from(&args));
    for figure in display.show(&event)? {
        info!("{} view: {}", figure.view, figure.path.display());
    }

    if !args.clicks {
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (view, click) = match parse_click(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("ignoring '{line}': {e}");
                continue;
            }
        };
        match display.click(view, click) {
            Ok(Some(lla)) => println!("{lla}"),
            Ok(None) => {}
            Err(e) => {
                let PointerClick { x_px, y_px } = click;
                error!("{view} click at ({x_px}, {y_px}) failed: {e}");
            }
        }
    }

    Ok(())
}
