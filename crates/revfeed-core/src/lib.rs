//! # revfeed-core - Core Domain Types
//!
//! Foundation crate for the reviews feed. Provides the wire model of the
//! paginated feed, styled text, layout geometry, loaded images and error
//! handling.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Feed Model (`review`)
//! - [`Review`] - A single review record as decoded from the feed
//! - [`ReviewsPage`] - Page envelope: total count plus one page of reviews
//!
//! ### Styled Text (`text`)
//! - [`StyledText`] - Display string tagged with the role that styles it
//! - [`TextRole`] - Username, body, created date, total count, show-more
//!
//! ### Geometry (`geometry`)
//! - [`Size`], [`Rect`], [`EdgeInsets`] - Logical-pixel layout primitives
//!
//! ### Images (`image`)
//! - [`LoadedImage`] - Decoded RGBA image, cheap to clone
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with `recoverable` vs programming-error classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use revfeed_core::prelude::*;
//! ```

pub mod error;
pub mod geometry;
pub mod image;
pub mod logging;
pub mod review;
pub mod text;

/// Prelude for common imports used throughout all revfeed crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result};
pub use geometry::{EdgeInsets, Rect, Size};
pub use image::LoadedImage;
pub use review::{Review, ReviewsPage};
pub use text::{StyledText, TextRole};
