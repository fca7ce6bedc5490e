//! `discover`: scrape the albums listing into a target manifest.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use linklift_batch::assemble_targets;
use linklift_browser::CdpHost;
use linklift_config::Config;
use linklift_protocols::target::Target;

pub(crate) async fn run(
    host: &CdpHost,
    config: &Config,
    albums_url: Option<String>,
    out: &Path,
) -> anyhow::Result<()> {
    let listing_url = albums_url.unwrap_or_else(|| config.service.albums_url.clone());
    info!("discovering albums from {}", listing_url);

    let cards = host.scrape_albums(&listing_url).await?;
    let targets = assemble_targets(cards);
    if targets.is_empty() {
        anyhow::bail!("no albums found on the listing page; is the browser signed in?");
    }

    write_manifest(&targets, out)?;
    println!("{} albums -> {}", targets.len(), out.display());
    Ok(())
}

fn write_manifest(targets: &[Target], out: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(targets)?;
    std::fs::write(out, json).with_context(|| format!("writing manifest {}", out.display()))?;
    Ok(())
}
