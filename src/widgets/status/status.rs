use eframe::egui;

use super::progress_bar::ProgressBar;
use crate::entities::presentation::Presentation;
use crate::entities::sequence::Readiness;

/// Status bar at the bottom of the window
#[derive(Default)]
pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, ctx: &egui::Context, presentation: &Presentation, render_time_ms: f32) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.monospace(readiness_text(presentation.readiness()));
                ui.separator();

                ui.monospace(format!("{:>5.1}%", presentation.progress() * 100.0));
                ui.separator();

                let total = presentation.sequence().map_or(0, |s| s.len());
                match presentation.last_drawn() {
                    Some(index) => ui.monospace(format!("frame {:>4}/{}", index, total)),
                    None => ui.monospace(format!("frame    -/{}", total)),
                };
                ui.separator();

                match presentation.bounds() {
                    Some(b) => ui.monospace(format!("{:.0}x{:.0} @ {:.0},{:.0}", b.w, b.h, b.x, b.y)),
                    None => ui.monospace("no bounds"),
                };
                ui.separator();

                let redraw = presentation.redraw();
                ui.monospace(format!("draws {} (coalesced {})", redraw.drawn(), redraw.coalesced()));
                ui.separator();

                ui.monospace(format!("{:.1}ms", render_time_ms));

                if presentation.is_immersive() {
                    ui.separator();
                    ui.monospace("IMMERSIVE");
                }
            });
        });
    }
}

pub fn readiness_text(readiness: Option<&Readiness>) -> String {
    match readiness {
        None => "inactive".to_string(),
        Some(Readiness::Loading { settled, total }) => format!("loading {}/{}", settled, total),
        Some(Readiness::Ready) => "ready".to_string(),
        Some(Readiness::Failed { missing }) => format!("failed ({} missing)", missing.len()),
    }
}

/// Centered spinner with a progress bar while frames load
pub fn render_loading(ui: &mut egui::Ui, canvas: egui::Rect, presentation: &Presentation) {
    let Some(sequence) = presentation.sequence() else { return };
    let mut bar = ProgressBar::new(240.0, 12.0);
    bar.set_progress(sequence.settled(), sequence.missing().len(), sequence.len());

    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(egui::Rect::from_center_size(canvas.center(), egui::vec2(260.0, 120.0)))
            .layout(egui::Layout::top_down(egui::Align::Center)),
    );
    child.add(egui::Spinner::new().size(32.0).color(egui::Color32::from_gray(200)));
    child.add_space(12.0);
    child.label(egui::RichText::new("Loading frames").color(egui::Color32::from_gray(180)));
    child.add_space(6.0);
    bar.render(&mut child);
}

/// Visible error listing the frames that failed to load
pub fn render_failure(ctx: &egui::Context, presentation: &Presentation) {
    let Some(sequence) = presentation.sequence() else { return };
    let failures = sequence.failures();
    let source = presentation.source();

    egui::Window::new("Frames failed to load")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(format!(
                "{} of {} frames from {} could not be loaded.",
                failures.len(),
                sequence.len(),
                source.dir.display()
            ));
            ui.label(
                egui::RichText::new("Restart with --on-missing skip to present without them.")
                    .weak(),
            );
            ui.add_space(8.0);
            egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                for (index, reason) in &failures {
                    ui.monospace(format!("#{:<4} {}", index, reason));
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_text() {
        assert_eq!(readiness_text(None), "inactive");
        assert_eq!(readiness_text(Some(&Readiness::Loading { settled: 3, total: 9 })), "loading 3/9");
        assert_eq!(readiness_text(Some(&Readiness::Failed { missing: vec![1, 2] })), "failed (2 missing)");
    }
}
