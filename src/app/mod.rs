//! Application module - ScrollApp and related functionality.
//!
//! - `events` - Event bus handling and keyboard input
//! - `run` - eframe::App implementation (update loop, persistence)

mod events;
mod run;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use eframe::egui;
use log::info;

use crate::core::event_bus::{EventBus, OptionalEmitter};
use crate::core::scroll::ScrollTracker;
use crate::core::workers::Workers;
use crate::entities::presentation::{Presentation, SequenceSource};
use crate::entities::scene::Scene;
use crate::hotkeys::HotkeyHandler;
use crate::settings::AppSettings;
use crate::widgets::{Canvas, StatusBar};

/// Initial surface size before the window reports its own
pub const INITIAL_SURFACE: (f32, f32) = (1920.0, 1080.0);

/// Startup options resolved from CLI and settings
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub source: SequenceSource,
    pub scene: Scene,
    pub page_factor: f32,
    pub immersive: bool,
    pub fullscreen: bool,
    pub workers: usize,
}

/// Main application state.
///
/// Owns the event bus, the decode worker pool, the scroll tracker and the
/// presentation. Only `settings` is persisted.
pub struct ScrollApp {
    pub settings: AppSettings,
    pub event_bus: EventBus,
    pub workers: Workers,
    pub tracker: ScrollTracker,
    pub presentation: Presentation,
    pub scene: Scene,
    pub canvas: Canvas,
    pub status_bar: StatusBar,
    pub hotkeys: HotkeyHandler,
    /// egui time when immersive mode was entered
    pub immersive_since: Option<f64>,
    pub is_fullscreen: bool,
    pub fullscreen_dirty: bool,
    pub last_render_time_ms: f32,
}

impl ScrollApp {
    pub fn new(ctx: &egui::Context, settings: AppSettings, options: LaunchOptions) -> Self {
        let event_bus = EventBus::new();
        let workers = Workers::new(options.workers, Arc::new(AtomicU64::new(0)));

        let mut tracker = ScrollTracker::new(options.page_factor, INITIAL_SURFACE.1);
        tracker.set_emitter(OptionalEmitter::from_emitter(event_bus.emitter()));

        let mut presentation = Presentation::new(options.source);
        presentation.activate(&workers, &event_bus);

        let mut app = Self {
            settings,
            event_bus,
            workers,
            tracker,
            presentation,
            scene: options.scene,
            canvas: Canvas::new(ctx, INITIAL_SURFACE),
            status_bar: StatusBar::new(),
            hotkeys: HotkeyHandler::default(),
            immersive_since: None,
            is_fullscreen: options.fullscreen,
            fullscreen_dirty: options.fullscreen,
            last_render_time_ms: 0.0,
        };
        if options.immersive {
            app.set_immersive(true, ctx.input(|i| i.time));
        }
        info!(
            "ScrollApp ready: {} workers, page factor {}",
            app.workers.len(),
            options.page_factor
        );
        app
    }

    pub fn set_immersive(&mut self, immersive: bool, now: f64) {
        if self.presentation.is_immersive() == immersive {
            return;
        }
        self.presentation.set_immersive(immersive);
        self.immersive_since = immersive.then_some(now);
        info!("{} immersive mode", if immersive { "Entering" } else { "Leaving" });
    }

    /// Toggle cinema/fullscreen mode.
    pub fn set_cinema_mode(&mut self, ctx: &egui::Context, enabled: bool) {
        self.is_fullscreen = enabled;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(enabled));
        // Hide window decorations in cinema mode
        ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(!enabled));
        ctx.request_repaint();
    }
}
