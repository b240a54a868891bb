//! Command line configuration for keepsake-tui

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(name = "keepsake-tui")]
#[command(about = "A five-screen valentine keepsake that runs in your terminal")]
#[command(version)]
pub struct Cli {
    /// Directory holding the soundtrack, film, and album photos.
    #[arg(default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Override the media manifest file path.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Soundtrack volume, between 0.0 and 1.0.
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    pub volume: f32,

    /// Override the log file path.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Volume with out-of-range values pulled back into [0.0, 1.0].
    pub fn clamped_volume(&self) -> f32 {
        self.volume.clamp(0.0, 1.0)
    }
}

/// Resolve the log file location, creating its directory when needed.
pub fn resolve_log_path(cli: &Cli) -> Result<PathBuf> {
    let log_path = match cli.log_file.as_ref() {
        Some(path) => path.clone(),
        None => default_data_dir()?.join("keepsake-tui.log"),
    };
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log dir {}", parent.display()))?;
    }
    Ok(log_path)
}

fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("failed to resolve local data directory"))?;
    Ok(base.join("keepsake-tui"))
}
