//! Zoom and pan engine of the MView6 viewer.
//!
//! [`view::ZoomEngine`] turns fit modes, wheel and drag input into a zoom
//! factor and pan offset stored in a [`view::ViewportState`]. Drawing is left
//! to a [`view::DisplaySurface`] implementation.

pub mod config;
pub mod error;
pub mod rect;
pub mod view;

pub use config::ViewerConfig;
pub use error::{Result, ViewportError};
pub use view::{ApplyOutcome, ViewportState, ZoomEngine, ZoomMode};
