//! CLI argument definitions for the TEdit command line.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tedit_core::PaintMode;
use tedit_world::TilePoint;

#[derive(Parser)]
#[command(
    name = "tedit",
    version,
    about = "TEdit - generate, inspect and edit world files",
    long_about = "Generate, inspect and edit world files from the command line.\n\n\
                  Every command runs through the same editing session as the \
                  editor: loads and saves happen on background workers, and \
                  saves refuse to overwrite files changed on disk unless forced."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file to use instead of the one in the config directory.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Hide the progress bar.
    #[arg(long = "no-progress", global = true)]
    pub no_progress: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a new flat world and save it.
    New(NewArgs),

    /// Print a summary of a world file.
    Info(InfoArgs),

    /// Load a world and save it again, optionally to a new path.
    Resave(ResaveArgs),

    /// Paint tiles into a world with the pencil tool.
    Paint(PaintArgs),

    /// Check whether a newer version of TEdit has been published.
    CheckUpdates(CheckUpdatesArgs),
}

#[derive(Args)]
pub struct NewArgs {
    /// Where to write the new world.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    #[arg(long, default_value = "New World")]
    pub title: String,

    /// Width in tiles.
    #[arg(long, default_value_t = 4200)]
    pub width: u32,

    /// Height in tiles.
    #[arg(long, default_value_t = 1200)]
    pub height: u32,

    #[arg(long = "ground-level", default_value_t = 350)]
    pub ground_level: u32,

    #[arg(long = "rock-level", default_value_t = 480)]
    pub rock_level: u32,

    /// Rows between the surface and the ground level.
    #[arg(long = "spawn-offset", default_value_t = 10)]
    pub spawn_offset: u32,

    /// Rows from the bottom where the underworld starts.
    #[arg(long = "underworld-depth", default_value_t = 182)]
    pub underworld_depth: u32,

    /// Replace OUTPUT if it already exists.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    #[arg(value_name = "WORLD")]
    pub world: PathBuf,
}

#[derive(Args)]
pub struct ResaveArgs {
    #[arg(value_name = "WORLD")]
    pub world: PathBuf,

    /// Save to this path instead of back to WORLD.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite even if the destination changed on disk after the world
    /// was last saved.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct PaintArgs {
    #[arg(value_name = "WORLD")]
    pub world: PathBuf,

    /// Tile coordinates to paint, as X,Y. May be repeated.
    #[arg(long = "at", value_name = "X,Y", value_parser = parse_point, required = true)]
    pub at: Vec<TilePoint>,

    #[arg(long, value_enum, default_value = "tile")]
    pub mode: PaintModeArg,

    /// Tile id to paint (defaults to the configured paint tile).
    #[arg(long)]
    pub tile: Option<u16>,

    /// Wall id to paint (defaults to the configured paint wall).
    #[arg(long)]
    pub wall: Option<u8>,

    /// Clear instead of paint.
    #[arg(long)]
    pub erase: bool,

    /// Save to this path instead of back to WORLD.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite even if the destination changed on disk.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct CheckUpdatesArgs {
    /// Version file URL (defaults to the configured one).
    #[arg(long)]
    pub url: Option<String>,
}

/// CLI paint mode choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PaintModeArg {
    Tile,
    Wall,
    TileAndWall,
    Liquid,
}

impl From<PaintModeArg> for PaintMode {
    fn from(mode: PaintModeArg) -> Self {
        match mode {
            PaintModeArg::Tile => PaintMode::Tile,
            PaintModeArg::Wall => PaintMode::Wall,
            PaintModeArg::TileAndWall => PaintMode::TileAndWall,
            PaintModeArg::Liquid => PaintMode::Liquid,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_point(value: &str) -> Result<TilePoint, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate '{part}': {e}"))
    };
    Ok(TilePoint::new(parse(x)?, parse(y)?))
}
