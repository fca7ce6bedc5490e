//! `single`: capture the share link of one album.

use anyhow::Context;

use linklift_batch::{BatchMode, Orchestrator};
use linklift_browser::CdpHost;
use linklift_config::Config;
use linklift_protocols::link::AlbumId;
use linklift_protocols::target::Target;

pub(crate) async fn run(
    host: &CdpHost,
    config: &Config,
    album_url: &str,
    existing_only: bool,
) -> anyhow::Result<()> {
    anyhow::ensure!(
        AlbumId::from_source_url(album_url).is_some(),
        "not an album URL: {}",
        album_url
    );

    let orchestrator = Orchestrator::new(host, config.service.sharing_url.clone());
    let finished = if existing_only {
        let mut target = Target::new(album_url, album_url);
        orchestrator.collect_existing(&mut target).await;
        target
    } else {
        orchestrator
            .run_batch(
                vec![Target::new(album_url, album_url)],
                BatchMode::Sequential,
            )
            .await?
            .pop()
            .context("batch returned no target")?
    };

    match &finished.result_link {
        Some(link) => {
            println!("{}", link);
            Ok(())
        }
        None => anyhow::bail!(
            "no link captured: {}",
            finished.last_error.as_deref().unwrap_or("unknown")
        ),
    }
}
