use eframe::egui;

/// Progress bar for frame loading: settled frames fill the bar, failed ones
/// are marked in a warning color at the end of the fill.
pub struct ProgressBar {
    settled: usize,
    failed: usize,
    total: usize,
    width: f32,
    height: f32,
    fill_color: egui::Color32,
    fail_color: egui::Color32,
}

impl ProgressBar {
    /// Light gray fill, red failures
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_color(width, height, egui::Color32::from_rgb(178, 178, 178))
    }

    pub fn with_color(width: f32, height: f32, fill_color: egui::Color32) -> Self {
        Self {
            settled: 0,
            failed: 0,
            total: 0,
            width,
            height,
            fill_color,
            fail_color: egui::Color32::from_rgb(220, 80, 60),
        }
    }

    /// Update progress values
    pub fn set_progress(&mut self, settled: usize, failed: usize, total: usize) {
        self.settled = settled.min(total);
        self.failed = failed.min(self.settled);
        self.total = total;
    }

    /// Filled fraction in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.total > 0 {
            (self.settled as f32 / self.total as f32).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn label(&self) -> String {
        if self.failed > 0 {
            format!("{}/{} ({} failed)", self.settled, self.total, self.failed)
        } else {
            format!("{}/{}", self.settled, self.total)
        }
    }

    pub fn render(&self, ui: &mut egui::Ui) {
        let (rect, _response) = ui.allocate_exact_size(egui::vec2(self.width, self.height), egui::Sense::hover());
        let painter = ui.painter();

        painter.rect_filled(rect, 2.0, egui::Color32::from_gray(40));

        let fraction = self.fraction();
        if fraction > 0.0 {
            let fill_width = rect.width() * fraction;
            let fill_rect = egui::Rect::from_min_size(rect.min, egui::vec2(fill_width, rect.height()));
            painter.rect_filled(fill_rect, 2.0, self.fill_color);

            if self.failed > 0 {
                let fail_width = rect.width() * self.failed as f32 / self.total as f32;
                let fail_rect = egui::Rect::from_min_max(
                    egui::pos2(fill_rect.right() - fail_width, rect.top()),
                    fill_rect.right_bottom(),
                );
                painter.rect_filled(fail_rect, 2.0, self.fail_color);
            }
        }

        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            self.label(),
            egui::FontId::monospace(9.0),
            egui::Color32::from_gray(220),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_and_label() {
        let mut bar = ProgressBar::new(200.0, 12.0);
        assert_eq!(bar.fraction(), 0.0);
        assert_eq!(bar.label(), "0/0");

        bar.set_progress(96, 0, 192);
        assert_eq!(bar.fraction(), 0.5);
        assert_eq!(bar.label(), "96/192");

        bar.set_progress(500, 3, 192);
        assert_eq!(bar.fraction(), 1.0);
        assert_eq!(bar.label(), "192/192 (3 failed)");
    }
}
