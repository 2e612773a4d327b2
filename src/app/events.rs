//! Event handling for ScrollApp.
//!
//! Contains handlers for:
//! - Event bus events (handle_events)
//! - Keyboard input (handle_keyboard_input)
//! - Mouse wheel (handle_wheel)

use super::ScrollApp;
use crate::core::event_bus::downcast_event;
use crate::core::scroll_events::*;
use crate::hotkeys::HotkeyAction;

use eframe::egui;
use log::{debug, trace};

impl ScrollApp {
    /// Handle events from event bus.
    ///
    /// Progress and resize events reach the presentation through its own
    /// subscriptions; here they are only traced.
    pub fn handle_events(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        for event in self.event_bus.poll() {
            if let Some(e) = downcast_event::<ScrollByEvent>(&event) {
                self.tracker.scroll_by(e.0);
                continue;
            }
            if let Some(e) = downcast_event::<ScrollPageEvent>(&event) {
                if e.down {
                    self.tracker.page_down();
                } else {
                    self.tracker.page_up();
                }
                continue;
            }
            if let Some(e) = downcast_event::<ScrollToEdgeEvent>(&event) {
                if e.bottom {
                    self.tracker.end();
                } else {
                    self.tracker.home();
                }
                continue;
            }
            if downcast_event::<EnterImmersiveEvent>(&event).is_some() {
                self.set_immersive(true, now);
                continue;
            }
            if downcast_event::<ExitImmersiveEvent>(&event).is_some() {
                self.set_immersive(false, now);
                continue;
            }
            if downcast_event::<ToggleFullscreenEvent>(&event).is_some() {
                self.is_fullscreen = !self.is_fullscreen;
                self.fullscreen_dirty = true;
                continue;
            }
            if downcast_event::<ToggleHelpEvent>(&event).is_some() {
                self.settings.show_help = !self.settings.show_help;
                continue;
            }
            if let Some(e) = downcast_event::<ProgressChangedEvent>(&event) {
                trace!("Progress -> {:.4}", e.0);
                continue;
            }
            if let Some(e) = downcast_event::<SurfaceResizedEvent>(&event) {
                debug!("Surface resized to {:.0}x{:.0}", e.width, e.height);
                continue;
            }
            trace!("Unhandled event: {}", (*event).type_name());
        }
    }

    /// Translate key presses into bus events.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        // Don't process hotkeys when text input is active (typing in fields)
        if ctx.wants_keyboard_input() {
            return;
        }

        let actions = ctx.input(|i| self.hotkeys.handle_input(i));
        let line = self.tracker.viewport_height() * self.settings.arrow_step;

        for action in actions {
            match action {
                HotkeyAction::LineDown => self.event_bus.emit(ScrollByEvent(line)),
                HotkeyAction::LineUp => self.event_bus.emit(ScrollByEvent(-line)),
                HotkeyAction::PageDown => self.event_bus.emit(ScrollPageEvent { down: true }),
                HotkeyAction::PageUp => self.event_bus.emit(ScrollPageEvent { down: false }),
                HotkeyAction::Top => self.event_bus.emit(ScrollToEdgeEvent { bottom: false }),
                HotkeyAction::Bottom => self.event_bus.emit(ScrollToEdgeEvent { bottom: true }),
                HotkeyAction::EnterImmersive => self.event_bus.emit(EnterImmersiveEvent),
                HotkeyAction::ExitImmersive => {
                    if self.presentation.is_immersive() {
                        self.event_bus.emit(ExitImmersiveEvent);
                    } else if self.is_fullscreen {
                        self.event_bus.emit(ToggleFullscreenEvent);
                    }
                }
                HotkeyAction::ToggleFullscreen => self.event_bus.emit(ToggleFullscreenEvent),
                HotkeyAction::ToggleHelp => self.event_bus.emit(ToggleHelpEvent),
                HotkeyAction::ToggleSettings => self.settings.show_settings = !self.settings.show_settings,
            }
        }
    }

    /// Mouse wheel over the canvas scrolls the virtual page.
    pub fn handle_wheel(&mut self, ctx: &egui::Context, hovered: bool) {
        if !hovered {
            return;
        }
        let dy = ctx.input(|i| i.smooth_scroll_delta.y);
        if dy != 0.0 {
            // egui reports +y when content should move down (scrolling up)
            self.event_bus.emit(ScrollByEvent(-dy * self.settings.wheel_speed));
        }
    }
}
