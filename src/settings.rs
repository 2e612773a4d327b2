//! Persisted user settings and the preferences window.

use eframe::egui;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::entities::sequence::MissingFramePolicy;

/// Default loading timeout
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // UI
    pub show_help: bool,
    pub show_status: bool,
    pub show_captions: bool,
    pub dark_mode: bool,

    // Scrolling
    pub wheel_speed: f32, // Multiplier on mouse wheel delta
    pub arrow_step: f32,  // Arrow key step as a fraction of the viewport

    // Loading (applies on restart)
    pub on_missing: MissingFramePolicy,
    pub load_timeout_ms: u64, // 0 = wait forever
    pub workers_override: u32, // 0 = auto

    // Internal
    pub show_settings: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            show_help: false,
            show_status: true,
            show_captions: true,
            dark_mode: true,
            wheel_speed: 1.0,
            arrow_step: 0.1,
            on_missing: MissingFramePolicy::Error,
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
            workers_override: 0,
            show_settings: false,
        }
    }
}

impl AppSettings {
    pub fn load_timeout(&self) -> Option<Duration> {
        (self.load_timeout_ms > 0).then(|| Duration::from_millis(self.load_timeout_ms))
    }

    /// Worker threads to spawn
    pub fn worker_count(&self) -> usize {
        if self.workers_override > 0 {
            self.workers_override as usize
        } else {
            num_cpus::get().max(1)
        }
    }
}

/// Render the preferences window
pub fn render_settings_window(ctx: &egui::Context, settings: &mut AppSettings) {
    let mut open = settings.show_settings;
    egui::Window::new("Preferences")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.heading("Display");
            ui.checkbox(&mut settings.show_captions, "Show captions");
            ui.checkbox(&mut settings.show_status, "Show status bar");
            ui.checkbox(&mut settings.dark_mode, "Dark theme");
            ui.add_space(8.0);

            ui.heading("Scrolling");
            ui.add(egui::Slider::new(&mut settings.wheel_speed, 0.25..=4.0).text("Wheel speed"));
            ui.add(egui::Slider::new(&mut settings.arrow_step, 0.02..=0.5).text("Arrow step"));
            ui.add_space(8.0);

            ui.heading("Loading (applies on restart)");
            egui::ComboBox::from_label("Missing frames")
                .selected_text(match settings.on_missing {
                    MissingFramePolicy::Error => "Show error",
                    MissingFramePolicy::Skip => "Skip",
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut settings.on_missing, MissingFramePolicy::Error, "Show error");
                    ui.selectable_value(&mut settings.on_missing, MissingFramePolicy::Skip, "Skip");
                });
            ui.horizontal(|ui| {
                ui.label("Timeout (ms, 0 = none):");
                ui.add(egui::DragValue::new(&mut settings.load_timeout_ms).speed(100.0));
            });
            ui.horizontal(|ui| {
                ui.label("Workers (0 = auto):");
                ui.add(egui::DragValue::new(&mut settings.workers_override).range(0..=64));
            });

            ui.add_space(8.0);
            if ui.button("Reset to defaults").clicked() {
                *settings = AppSettings {
                    show_settings: true,
                    ..AppSettings::default()
                };
            }
        });
    settings.show_settings = open;
}
