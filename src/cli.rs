//! CLI definitions for LinkLift.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// LinkLift CLI.
#[derive(Parser)]
#[command(name = "linklift")]
#[command(about = "Batch share-link automation for Google Photos albums")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.linklift/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Run the browser headless
    #[arg(long, global = true)]
    pub headless: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scrape the albums listing into a target manifest
    Discover {
        /// Albums listing URL, overriding the configured one
        #[arg(long)]
        albums_url: Option<String>,

        /// Manifest file to write
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Drive a manifest of targets to share links
    Run {
        /// Target manifest produced by `discover`
        #[arg(short, long)]
        manifest: PathBuf,

        /// How the batch resolves its targets
        #[arg(long, value_enum, default_value_t = RunMode::Pipeline)]
        mode: RunMode,

        /// Result file to write
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Capture the share link of a single album
    Single {
        /// Album page URL
        #[arg(long)]
        album_url: String,

        /// Only read an existing link, never click through the share flow
        #[arg(long)]
        existing_only: bool,
    },
}

/// Batch resolution strategy exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum RunMode {
    /// One surface per target, strictly in order
    Sequential,
    /// One shared-items surface resolving the whole batch
    ListingScan,
    /// Sequential first, then one listing rescue pass
    Pipeline,
}
