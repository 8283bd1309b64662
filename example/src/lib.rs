//! Drives a tab indicator through a scripted swipe session and logs what a
//! renderer would paint.

mod session;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use tessera_tab_indicator::TabStripArgs;
use tracing::info;

pub use crate::session::{Session, SessionReport};

/// Command line of the example binary.
#[derive(Parser, Debug)]
#[command(name = "example")]
#[command(version, about = "Simulate swiping through a paged tab strip", long_about = None)]
pub struct Cli {
    /// JSON file with tab strip settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the tab strip viewport width
    #[arg(long)]
    pub viewport_width: Option<f32>,
    /// Frames rendered per page swipe
    #[arg(short, long, default_value_t = 12)]
    pub frames: u32,
    /// Last page the session swipes to (1-based)
    #[arg(short, long, default_value_t = 5)]
    pub target: usize,
}

/// Runs the session described by `cli`.
pub fn run(cli: Cli) -> Result<()> {
    init_tracing();

    let mut args = match &cli.config {
        Some(path) => load_args(path)?,
        None => TabStripArgs::default(),
    };
    if let Some(width) = cli.viewport_width {
        args.viewport_width = width;
    }
    info!(?args, "starting swipe session");

    let mut session = Session::new(args)?;
    let report = session.swipe_to(cli.target, cli.frames.max(1))?;
    info!(
        frames = report.frames,
        scroll_requests = report.scroll_requests,
        tab_row_offset = report.tab_row_offset,
        "session finished"
    );
    let report = session.swipe_to(1, cli.frames.max(1))?;
    info!(
        frames = report.frames,
        scroll_requests = report.scroll_requests,
        tab_row_offset = report.tab_row_offset,
        "returned to first tab"
    );
    Ok(())
}

fn load_args(path: &Path) -> Result<TabStripArgs> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,tessera_tab_indicator=debug,example=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .try_init();
}
