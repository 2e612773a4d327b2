//! Help overlay: key bindings shown on F1.

use eframe::egui;

/// Single help entry (key binding + description)
#[derive(Clone, Debug)]
pub struct HelpEntry {
    pub key: &'static str,
    pub desc: &'static str,
}

impl HelpEntry {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

/// Scrolling through the presentation
pub const SCROLL_HELP: &[HelpEntry] = &[
    HelpEntry::new("Mouse Wheel", "Scroll"),
    HelpEntry::new("Up / Down", "Scroll a little"),
    HelpEntry::new("PgUp / PgDn", "Scroll one screen"),
    HelpEntry::new("Space / Shift+Space", "Scroll one screen"),
    HelpEntry::new("Home / End", "Jump to Start/End"),
];

/// Immersive mode
pub const IMMERSIVE_HELP: &[HelpEntry] = &[
    HelpEntry::new("Enter", "Experience Now"),
    HelpEntry::new("ESC", "Exit Experience"),
    HelpEntry::new("Hover", "Show hotspot details"),
];

/// Window
pub const GLOBAL_HELP: &[HelpEntry] = &[
    HelpEntry::new("F1", "Toggle help"),
    HelpEntry::new("F11 / Z", "Toggle Fullscreen"),
    HelpEntry::new("F12", "Toggle Preferences"),
];

pub fn all_help_sections() -> Vec<(&'static str, &'static [HelpEntry])> {
    vec![
        ("Scroll", SCROLL_HELP),
        ("Immersive", IMMERSIVE_HELP),
        ("Global", GLOBAL_HELP),
    ]
}

/// Render help overlay with every section
pub fn render_help_overlay(ui: &mut egui::Ui) {
    let font_id = egui::FontId::proportional(13.0);
    let text_color = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200);
    let key_color = egui::Color32::from_rgb(255, 200, 100);

    let sections = all_help_sections();

    // Estimate key column width from char count
    let max_key_len = sections
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|e| e.key.len())
        .max()
        .unwrap_or(10);
    let max_key_width = (max_key_len as f32) * 8.0 + 20.0;

    egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180))
        .inner_margin(12.0)
        .corner_radius(4.0)
        .show(ui, |ui| {
            for (i, (title, entries)) in sections.iter().enumerate() {
                if i > 0 {
                    ui.add_space(6.0);
                    ui.separator();
                }
                ui.label(egui::RichText::new(*title).font(font_id.clone()).color(egui::Color32::GRAY));
                ui.add_space(4.0);
                for entry in entries.iter() {
                    ui.horizontal(|ui| {
                        ui.add_sized(
                            [max_key_width, 18.0],
                            egui::Label::new(egui::RichText::new(entry.key).font(font_id.clone()).color(key_color)),
                        );
                        ui.label(egui::RichText::new(entry.desc).font(font_id.clone()).color(text_color));
                    });
                }
            }
        });
}
