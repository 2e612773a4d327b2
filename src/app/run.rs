//! Main application loop - eframe::App implementation.
//!
//! Contains the core update() method that runs each frame:
//! - Input handling (keys, wheel, window resize)
//! - Event processing
//! - Presentation tick (at most one draw per refresh)
//! - Canvas, overlays, captions and status rendering
//! - Settings persistence

use std::time::Instant;

use eframe::{egui, glow};
use log::{info, trace};

use super::ScrollApp;
use crate::core::scroll_events::{EnterImmersiveEvent, ExitImmersiveEvent, SurfaceResizedEvent};
use crate::entities::keyframes::ease_in_out;
use crate::entities::sequence::Readiness;
use crate::help::render_help_overlay;
use crate::settings::render_settings_window;
use crate::widgets::canvas::{SurfaceTransform, IMMERSIVE_SCALE, IMMERSIVE_ZOOM_TIME};
use crate::widgets::{captions, overlays, status};

/// Caption layer fade when entering/leaving immersive mode (seconds)
const CAPTION_LAYER_FADE: f32 = 0.5;

impl eframe::App for ScrollApp {
    /// Main frame update - called every frame by eframe.
    ///
    /// Flow:
    /// 1. Apply theme and pending fullscreen changes
    /// 2. Translate keys into bus events
    /// 3. Track canvas size, wheel, process events
    /// 4. Tick the presentation (drain progress/resize, poll loads, draw)
    /// 5. Paint canvas and overlays for the current readiness
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let started = Instant::now();

        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        if self.fullscreen_dirty {
            self.set_cinema_mode(ctx, self.is_fullscreen);
            self.fullscreen_dirty = false;
        }

        self.handle_keyboard_input(ctx);

        if self.settings.show_status && !self.is_fullscreen {
            self.status_bar.render(ctx, &self.presentation, self.last_render_time_ms);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let response = ui.allocate_rect(rect, egui::Sense::hover());

                let size = (rect.width(), rect.height());
                if self.canvas.set_size(size) {
                    self.tracker.set_viewport_height(size.1);
                    self.event_bus.emit(SurfaceResizedEvent { width: size.0, height: size.1 });
                }
                self.handle_wheel(ctx, response.hovered());
                self.handle_events(ctx);

                if let Some(index) = self.presentation.tick(Instant::now(), &mut self.canvas) {
                    trace!("Drew frame {}", index);
                }

                self.render_canvas(ctx, ui, rect);
            });

        if self.settings.show_help {
            egui::Area::new(egui::Id::new("help_overlay"))
                .anchor(egui::Align2::LEFT_TOP, egui::vec2(16.0, 16.0))
                .order(egui::Order::Foreground)
                .interactable(false)
                .show(ctx, render_help_overlay);
        }

        render_settings_window(ctx, &mut self.settings);

        self.last_render_time_ms = started.elapsed().as_secs_f32() * 1000.0;
    }

    /// Save settings to persistent storage.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(&self.settings) {
            Ok(json) => {
                storage.set_string(eframe::APP_KEY, json);
                trace!("Settings saved");
            }
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }

    /// Cleanup on application exit.
    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        // Queued decodes are skipped once the epoch moves
        self.presentation.deactivate(&self.workers);
        info!("Presentation closed");
    }
}

impl ScrollApp {
    fn render_canvas(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, rect: egui::Rect) {
        let now = ctx.input(|i| i.time);
        let immersive = self.presentation.is_immersive();
        let progress = self.presentation.progress();

        let zoom = ctx.animate_bool_with_time(egui::Id::new("immersive_zoom"), immersive, IMMERSIVE_ZOOM_TIME);
        let transform = SurfaceTransform::new(rect, 1.0 + (IMMERSIVE_SCALE - 1.0) * ease_in_out(zoom));
        let painter = ui.painter_at(rect);
        self.canvas.paint(&painter, &transform);

        match self.presentation.readiness() {
            Some(Readiness::Loading { .. }) => {
                status::render_loading(ui, rect, &self.presentation);
                ctx.request_repaint();
                return;
            }
            Some(Readiness::Failed { .. }) => {
                status::render_failure(ctx, &self.presentation);
                return;
            }
            Some(Readiness::Ready) => {}
            None => return,
        }

        if let Some(bounds) = self.presentation.bounds() {
            if immersive {
                let elapsed = self.immersive_since.map_or(0.0, |since| now - since);
                let alpha = overlays::hotspot_alpha(elapsed);
                overlays::paint_hotspots(ctx, &painter, &transform, &self.scene, &bounds, alpha);
            } else {
                overlays::paint_accents(&painter, &transform, &self.scene, &bounds, progress);
            }
        }

        if !immersive {
            overlays::paint_scroll_hint(&painter, rect, &self.scene, progress);
        }

        let layer_alpha =
            ctx.animate_bool_with_time(egui::Id::new("caption_layer"), !immersive, CAPTION_LAYER_FADE);
        if self.settings.show_captions && captions::render(ctx, rect, &self.scene, progress, layer_alpha) {
            self.event_bus.emit(EnterImmersiveEvent);
        }

        if immersive && overlays::exit_button(ctx, rect) {
            self.event_bus.emit(ExitImmersiveEvent);
        }
    }
}
