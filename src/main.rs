//! LinkLift - batch share-link automation for Google Photos albums.
//!
//! Main entry point for the LinkLift CLI.

mod cli;
mod cmd_discover;
mod cmd_run;
mod cmd_single;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use linklift_browser::{CdpHost, LauncherConfig};
use linklift_config::{BrowserConfig, ConfigLoader};

use crate::cli::{Cli, Commands};

/// Get the .linklift directory path.
fn linklift_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".linklift"))
        .unwrap_or_else(|| PathBuf::from(".linklift"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.linklift/debug/ with daily rotation.
fn init_tracing() -> anyhow::Result<()> {
    let log_dir = linklift_dir().join("debug");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("linklift")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the worker guard alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn launcher_config(browser: &BrowserConfig) -> LauncherConfig {
    LauncherConfig {
        debug_port: browser.debug_port,
        chrome_path: browser
            .chrome_path
            .as_deref()
            .map(|path| PathBuf::from(ConfigLoader::expand_path(path))),
        profile_dir: Some(browser.profile_dir.clone()),
        headless: browser.headless,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| linklift_dir().join("config.toml"));
    let mut config = ConfigLoader::load_or_default(&config_path)?;
    if cli.headless {
        config.browser.headless = true;
    }

    let host = CdpHost::new(launcher_config(&config.browser));

    let result = match cli.command {
        Commands::Discover { albums_url, out } => {
            cmd_discover::run(&host, &config, albums_url, &out).await
        }
        Commands::Run { manifest, mode, out } => {
            cmd_run::run(&host, &config, &manifest, mode, &out).await
        }
        Commands::Single {
            album_url,
            existing_only,
        } => cmd_single::run(&host, &config, &album_url, existing_only).await,
    };

    // Chrome only outlives the command when the user brought their own.
    host.shutdown().await;
    result
}
