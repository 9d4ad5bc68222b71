//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use revfeed_core::prelude::*;
use revfeed_fetch::{ImageLoader, ImageSource, ReviewsProvider};
use tokio::sync::mpsc;

use crate::handler::{ImageBatch, UpdateAction};
use crate::message::Message;

/// Execute an action by spawning background tasks.
///
/// Every task settles into exactly one message on `msg_tx`. Must be called
/// from within a tokio runtime.
pub fn handle_action<P, S>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    provider: Arc<P>,
    images: Arc<ImageLoader<S>>,
) where
    P: ReviewsProvider + Send + Sync + 'static,
    S: ImageSource + Send + Sync + 'static,
{
    match action {
        UpdateAction::FetchPage {
            generation,
            offset,
            limit,
        } => {
            spawn_page_fetch(provider, msg_tx, generation, offset, limit);
        }

        UpdateAction::LoadRowImages { batches } => {
            for batch in batches {
                spawn_image_batch(images.clone(), msg_tx.clone(), batch);
            }
        }
    }
}

fn spawn_page_fetch<P>(
    provider: Arc<P>,
    msg_tx: mpsc::Sender<Message>,
    generation: u64,
    offset: usize,
    limit: usize,
) where
    P: ReviewsProvider + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let msg = match provider.get_reviews(offset, limit).await {
            Ok(bytes) => Message::PageFetched { generation, bytes },
            Err(e) => Message::PageFetchFailed {
                generation,
                error: e.to_string(),
            },
        };

        if msg_tx.send(msg).await.is_err() {
            debug!("View-model dropped before page at offset {} arrived", offset);
        }
    });
}

fn spawn_image_batch<S>(images: Arc<ImageLoader<S>>, msg_tx: mpsc::Sender<Message>, batch: ImageBatch)
where
    S: ImageSource + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let ImageBatch { id, urls } = batch;
        let loaded = images.fetch_image_batch(&urls).await;
        trace!("{}: {}/{} images loaded", id, loaded.len(), urls.len());

        let msg = Message::RowImagesLoaded { id, images: loaded };
        if msg_tx.send(msg).await.is_err() {
            debug!("View-model dropped before images for {} arrived", id);
        }
    });
}
