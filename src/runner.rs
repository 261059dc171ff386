//! Wires an indexer, its channel and a navigator around one host page.

use std::sync::Arc;

use tracing::{info, warn};

use chatnav_config::Config;
use chatnav_core::{LocalChannel, PageIndexer, UnreachableChannel};
use chatnav_navigator::NavigatorController;
use chatnav_protocols::{HostPage, IndexerChannel};

use crate::interactive;

/// Index `page` and navigate it until the user quits.
///
/// A page without a site profile gets no indexer; the navigator then reports
/// it as unreachable instead of empty.
pub(crate) async fn navigate(
    page: Arc<dyn HostPage>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(indexer) = PageIndexer::for_page(page, config).await? else {
        let channel: Arc<dyn IndexerChannel> =
            Arc::new(UnreachableChannel::new("no site profile matches this page"));
        let mut controller = NavigatorController::new(channel, config.navigator.clone());
        return interactive::run(&mut controller).await;
    };

    let watch = indexer.start().await?;
    if !watch.is_observing_mutations() {
        warn!("Chat container not found; new messages need a manual rescan");
    }

    let (channel, server) = LocalChannel::serve(indexer.clone(), config.navigator.request_timeout());
    let mut controller = NavigatorController::new(Arc::new(channel), config.navigator.clone());

    let result = interactive::run(&mut controller).await;

    info!("Stopping indexer for {}", indexer.site_name());
    indexer.shutdown();
    watch.stop().await;
    drop(controller);
    if let Err(e) = server.await {
        warn!("Channel server ended abnormally: {}", e);
    }

    result
}
