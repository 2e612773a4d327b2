//! Caption layer - text blocks that fade and slide with scroll progress.

use eframe::egui;

use crate::entities::scene::{Align, Caption, Scene};

/// Render visible captions over `canvas`.
///
/// `layer_alpha` fades the whole layer (0 in immersive mode).
/// Returns true if a caption's action button was clicked.
pub fn render(ctx: &egui::Context, canvas: egui::Rect, scene: &Scene, progress: f32, layer_alpha: f32) -> bool {
    if layer_alpha <= 0.0 {
        return false;
    }
    let mut clicked = false;
    for (i, (caption, opacity, offset_y)) in scene.visible_captions(progress).enumerate() {
        let (pivot, pos) = anchor(canvas, caption.align);
        egui::Area::new(egui::Id::new(("caption", i, caption.title.as_str())))
            .order(egui::Order::Middle)
            .fixed_pos(pos + egui::vec2(0.0, offset_y))
            .pivot(pivot)
            .interactable(caption.action.is_some())
            .show(ctx, |ui| {
                ui.set_opacity(opacity * layer_alpha);
                clicked |= caption_body(ui, caption, canvas.width());
            });
    }
    clicked
}

/// Pivot and screen anchor for an alignment
fn anchor(canvas: egui::Rect, align: Align) -> (egui::Align2, egui::Pos2) {
    let y = canvas.center().y;
    match align {
        Align::Left => (egui::Align2::LEFT_CENTER, egui::pos2(canvas.left() + canvas.width() * 0.1, y)),
        Align::Center => (egui::Align2::CENTER_CENTER, egui::pos2(canvas.center().x, y)),
        Align::Right => (egui::Align2::RIGHT_CENTER, egui::pos2(canvas.right() - canvas.width() * 0.1, y)),
    }
}

fn caption_body(ui: &mut egui::Ui, caption: &Caption, canvas_width: f32) -> bool {
    let (title_size, max_width) = if caption.emphasis { (56.0, canvas_width * 0.8) } else { (40.0, 420.0) };
    let layout = match caption.align {
        Align::Left => egui::Layout::top_down(egui::Align::Min),
        Align::Center => egui::Layout::top_down(egui::Align::Center),
        Align::Right => egui::Layout::top_down(egui::Align::Max),
    };

    let mut clicked = false;
    ui.set_max_width(max_width);
    ui.with_layout(layout, |ui| {
        ui.label(
            egui::RichText::new(&caption.title)
                .size(title_size)
                .strong()
                .color(egui::Color32::from_white_alpha(230)),
        );
        if !caption.body.is_empty() {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(&caption.body)
                    .size(if caption.emphasis { 22.0 } else { 16.0 })
                    .color(egui::Color32::from_white_alpha(150)),
            );
        }
        if let Some(action) = &caption.action {
            ui.add_space(24.0);
            let button = egui::Button::new(egui::RichText::new(action).size(16.0).color(egui::Color32::BLACK))
                .fill(egui::Color32::WHITE)
                .corner_radius(20.0)
                .min_size(egui::vec2(180.0, 40.0));
            clicked = ui.add(button).clicked();
        }
    });
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors_follow_alignment() {
        let canvas = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1000.0, 600.0));
        let (pivot, pos) = anchor(canvas, Align::Left);
        assert_eq!(pivot, egui::Align2::LEFT_CENTER);
        assert_eq!(pos, egui::pos2(100.0, 300.0));

        let (_, pos) = anchor(canvas, Align::Right);
        assert_eq!(pos, egui::pos2(900.0, 300.0));

        let (pivot, pos) = anchor(canvas, Align::Center);
        assert_eq!(pivot, egui::Align2::CENTER_CENTER);
        assert_eq!(pos, canvas.center());
    }
}
