//! Message processing
//!
//! Runs a message and its follow-ups through the TEA update function,
//! dispatches the resulting actions and notifies the listener after every
//! step that changed visible state.

use std::sync::Arc;

use revfeed_fetch::{ImageLoader, ImageSource, ReviewsProvider};
use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::formatter::Formatter;
use crate::handler;
use crate::message::Message;
use crate::notifier::Notifier;
use crate::state::FeedState;

/// Process a message through the TEA update function
pub fn process_message<P, S>(
    state: &mut FeedState,
    formatter: &Formatter,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    provider: &Arc<P>,
    images: &Arc<ImageLoader<S>>,
    notifier: &mut Notifier,
) where
    P: ReviewsProvider + Send + Sync + 'static,
    S: ImageSource + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, formatter, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), provider.clone(), images.clone());
        }

        notifier.notify_if_changed(state);

        // Continue with follow-up message
        msg = result.message;
    }
}
