//! State change notifier: a single listener slot

use crate::state::FeedState;

/// Callback invoked with the full list state after every visible change.
///
/// The listener only gets a shared borrow, so it cannot mutate the
/// view-model from inside the callback.
pub type Listener = Box<dyn FnMut(&FeedState) + Send>;

/// Holds at most one listener and remembers the last revision delivered.
#[derive(Default)]
pub struct Notifier {
    listener: Option<Listener>,
    delivered_revision: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `listener`, replacing any previous one
    pub fn set_listener(&mut self, listener: impl FnMut(&FeedState) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Deliver `state` if its revision moved since the last delivery.
    ///
    /// Returns true when the listener was invoked.
    pub fn notify_if_changed(&mut self, state: &FeedState) -> bool {
        if state.revision() == self.delivered_revision {
            return false;
        }
        self.delivered_revision = state.revision();

        match self.listener.as_mut() {
            Some(listener) => {
                listener(state);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("has_listener", &self.has_listener())
            .field("delivered_revision", &self.delivered_revision)
            .finish()
    }
}
