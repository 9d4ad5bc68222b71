//! revfeed - Paginated reviews feed
//!
//! Library side of the `revfeed` binary: the headless runner that drives the
//! list view-model from `revfeed-app` against a local fixture.

pub mod headless;

// Re-export main entry points
pub use headless::runner::{run_headless, run_headless_to, HeadlessOptions};
pub use headless::HeadlessEvent;
