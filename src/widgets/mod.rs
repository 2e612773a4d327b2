//! UI Widgets - canvas, overlays and status components
//!
//! Widgets read presentation state and report user actions back to the app;
//! they never mutate the presentation directly.

pub mod canvas;
pub mod captions;
pub mod overlays;
pub mod status;

pub use canvas::{Canvas, SurfaceTransform};
pub use status::StatusBar;
