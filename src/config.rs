use crate::theme::THEMES;
use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

const DEFAULT_CONFIG_PATH: &str = "pomoring/config.json";

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "🍅 pomoring - A single-screen terminal Pomodoro timer")]
pub struct Args {
    #[arg(short = 't', long)]
    pub theme: Option<String>,
    #[arg(long)]
    pub no_notify: bool,
    #[arg(long)]
    pub no_sound: bool,
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Write logs here; filtered by RUST_LOG (default: info).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub notifications: bool,
    pub sound: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "default".into(),
            notifications: true,
            sound: true,
        }
    }
}

impl Config {
    /// Reads the config file, if any, then layers the CLI flags over it.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = load_config(&args.config)?;

        if let Some(t) = &args.theme { config.theme = t.clone(); }
        if args.no_notify { config.notifications = false; }
        if args.no_sound { config.sound = false; }

        if !THEMES.contains(&config.theme.as_str()) {
            tracing::warn!(theme = %config.theme, "unknown theme, using default");
            config.theme = "default".into();
        }

        Ok(config)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
