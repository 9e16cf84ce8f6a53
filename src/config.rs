//! Service configuration: CLI flags, then environment, then defaults.

use crate::catalog::DEFAULT_CATALOG_PATH;
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3067";
pub const DEFAULT_STATIC_DIR: &str = "static";

pub const ENV_CATALOG: &str = "GAME_LAUNCHER_CATALOG";
pub const ENV_STATIC_DIR: &str = "GAME_LAUNCHER_STATIC_DIR";
pub const ENV_ADDR: &str = "GAME_LAUNCHER_ADDR";
pub const ENV_LOG_FORMAT: &str = "GAME_LAUNCHER_LOG_FORMAT";

#[derive(Parser, Debug, Default)]
#[command(name = "game-launcher")]
#[command(about = "Serve a browsable game catalog and launch titles as detached processes")]
pub struct LauncherArgs {
    /// Catalog JSON file (or set GAME_LAUNCHER_CATALOG; default games.json).
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Directory holding index.html and assets served under /static/
    /// (or set GAME_LAUNCHER_STATIC_DIR; default static).
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
    /// Listen address (or set GAME_LAUNCHER_ADDR; default 127.0.0.1:3067).
    #[arg(long)]
    pub addr: Option<String>,
    /// Log output: plain or json (or set GAME_LAUNCHER_LOG_FORMAT).
    #[arg(long, value_parser = ["plain", "json"])]
    pub log_format: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl TryFrom<&str> for LogFormat {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "plain" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => bail!("Unknown log format: {other}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LauncherConfig {
    pub catalog_path: PathBuf,
    pub static_dir: PathBuf,
    pub addr: SocketAddr,
    pub log_format: LogFormat,
}

impl LauncherConfig {
    /// Resolve against the process environment.
    pub fn from_args(args: LauncherArgs) -> Result<Self> {
        Self::resolve(args, |name| env::var(name).ok())
    }

    /// Resolve each setting from `args`, then `lookup(ENV_*)`, then the
    /// default. Empty environment values count as unset.
    pub fn resolve(args: LauncherArgs, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let from_env = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let catalog_path = args
            .catalog
            .or_else(|| from_env(ENV_CATALOG).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));
        let static_dir = args
            .static_dir
            .or_else(|| from_env(ENV_STATIC_DIR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let raw_addr = args
            .addr
            .or_else(|| from_env(ENV_ADDR))
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = raw_addr
            .trim()
            .parse()
            .with_context(|| format!("invalid listen address '{raw_addr}'"))?;

        let log_format = match args.log_format.or_else(|| from_env(ENV_LOG_FORMAT)) {
            Some(raw) => LogFormat::try_from(raw.trim())?,
            None => LogFormat::default(),
        };

        Ok(Self {
            catalog_path,
            static_dir,
            addr,
            log_format,
        })
    }
}
