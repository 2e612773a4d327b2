//! Core engine modules - events, scroll tracking, redraw scheduling, workers
//!
//! These modules drive the presentation, independent of UI.

pub mod event_bus;
pub mod redraw;
pub mod scroll;
pub mod scroll_events;
pub mod workers;

// Re-exports for convenience
pub use event_bus::{EventBus, SubscriptionId};
pub use redraw::RedrawScheduler;
pub use scroll::ScrollTracker;
pub use workers::Workers;
