//! Scrollreel - scroll-driven image sequence presentation library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (events, scroll tracking, redraw scheduling, workers)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod entities;
pub mod help;
pub mod hotkeys;
pub mod settings;
pub mod widgets;

// Re-export commonly used types from core
pub use core::event_bus::{downcast_event, BoxedEvent, EventBus, EventEmitter, SubscriptionId};
pub use core::scroll::ScrollTracker;
pub use core::workers::Workers;

// Re-export entities
pub use entities::{Frame, FrameSequence, LayoutBounds, Presentation, Scene};
