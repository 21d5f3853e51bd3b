// cli.rs - Command-line interface configuration
use clap::Parser;
use glam::IVec2;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "viewport-camera")]
#[command(about = "Replay camera gestures and print the resulting view", long_about = None)]
pub struct Cli {
    /// Viewport configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Gesture script: a JSON array of pointer events
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Viewport size in pixels, e.g. 1920x1080
    #[arg(long, value_parser = parse_size)]
    pub viewport: Option<IVec2>,

    /// Frame the unit box at the origin before replaying
    #[arg(long, default_value = "false")]
    pub frame: bool,

    /// Pretty-print the JSON output
    #[arg(long, default_value = "false")]
    pub pretty: bool,
}

/// Parses `WIDTHxHEIGHT` into a positive pixel size.
pub fn parse_size(s: &str) -> Result<IVec2, String> {
    let (w, h) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: i32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: i32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w <= 0 || h <= 0 {
        return Err(format!("size must be positive, got {w}x{h}"));
    }
    Ok(IVec2::new(w, h))
}
