//! `run`: drive a manifest of targets to share links.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use linklift_batch::{BatchMode, Orchestrator};
use linklift_browser::CdpHost;
use linklift_config::Config;
use linklift_protocols::target::{HandoffRecord, Target};

use crate::cli::RunMode;

/// Result file contents: every target plus the linked-only hand-off list.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport<'a> {
    targets: &'a [Target],
    handoff: &'a [HandoffRecord],
}

pub(crate) async fn run(
    host: &CdpHost,
    config: &Config,
    manifest: &Path,
    mode: RunMode,
    out: &Path,
) -> anyhow::Result<()> {
    let targets = read_manifest(manifest)?;
    info!("loaded {} targets from {}", targets.len(), manifest.display());

    let orchestrator = Orchestrator::new(host, config.service.sharing_url.clone());
    let finished = match mode {
        RunMode::Sequential => {
            orchestrator
                .run_batch(targets, BatchMode::Sequential)
                .await?
        }
        RunMode::ListingScan => {
            orchestrator
                .run_batch(targets, BatchMode::IsolatedParallel)
                .await?
        }
        RunMode::Pipeline => orchestrator.run_pipeline(targets).await?,
    };

    let handoff = HandoffRecord::from_targets(&finished);
    write_report(&finished, &handoff, out)?;
    print_summary(&finished);
    println!("results -> {}", out.display());
    Ok(())
}

fn read_manifest(path: &Path) -> anyhow::Result<Vec<Target>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let targets: Vec<Target> = serde_json::from_str(&content)
        .with_context(|| format!("parsing manifest {}", path.display()))?;
    Ok(targets)
}

fn write_report(
    targets: &[Target],
    handoff: &[HandoffRecord],
    out: &Path,
) -> anyhow::Result<()> {
    let report = RunReport { targets, handoff };
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(out, json).with_context(|| format!("writing results {}", out.display()))?;
    Ok(())
}

fn print_summary(targets: &[Target]) {
    for target in targets {
        match &target.result_link {
            Some(link) => println!("  {} {}", target.display_name, link),
            None => println!(
                "  {} [{}: {}]",
                target.display_name,
                target.status.bucket(),
                target.last_error.as_deref().unwrap_or("unknown")
            ),
        }
    }
    let linked = targets
        .iter()
        .filter(|target| target.result_link.is_some())
        .count();
    println!("{}/{} albums linked", linked, targets.len());
}
