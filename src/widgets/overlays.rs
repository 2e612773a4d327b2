//! Overlays drawn over the canvas: accents, scroll hint, hotspots and the
//! immersive exit button.
//!
//! Accents and hotspots are positioned from the layout bounds so they stay
//! attached to the fitted image.

use eframe::egui;

use super::canvas::SurfaceTransform;
use crate::entities::keyframes::ease_in_out;
use crate::entities::layout::LayoutBounds;
use crate::entities::scene::{Accent, AccentKind, Scene, TooltipSide, HOTSPOT_RADIUS};

/// Hotspots start fading in this long after entering immersive mode (seconds)
pub const HOTSPOT_DELAY: f64 = 0.5;

/// Hotspot fade-in duration (seconds)
pub const HOTSPOT_FADE: f64 = 0.5;

/// Hotspot opacity `elapsed` seconds after entering immersive mode
pub fn hotspot_alpha(elapsed: f64) -> f32 {
    ease_in_out(((elapsed - HOTSPOT_DELAY) / HOTSPOT_FADE) as f32)
}

/// Gap between the "Exit Experience" button and the bottom edge
pub const EXIT_BUTTON_MARGIN: f32 = 40.0;

/// Bottom-center anchor of the "Exit Experience" button
pub fn exit_button_anchor(rect: egui::Rect) -> egui::Pos2 {
    rect.center_bottom() - egui::vec2(0.0, EXIT_BUTTON_MARGIN)
}

/// "Exit Experience" button centered at the bottom. True when clicked.
pub fn exit_button(ctx: &egui::Context, rect: egui::Rect) -> bool {
    egui::Area::new(egui::Id::new("exit_immersive"))
        .fixed_pos(exit_button_anchor(rect))
        .pivot(egui::Align2::CENTER_BOTTOM)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let button = egui::Button::new(egui::RichText::new("Exit Experience").color(egui::Color32::WHITE))
                .fill(egui::Color32::from_white_alpha(25))
                .corner_radius(16.0);
            ui.add(button).clicked()
        })
        .inner
}

fn rgba(color: [u8; 4], alpha: f32) -> egui::Color32 {
    let a = (color[3] as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
    egui::Color32::from_rgba_unmultiplied(color[0], color[1], color[2], a)
}

/// Paint every accent visible at `progress`
pub fn paint_accents(
    painter: &egui::Painter,
    transform: &SurfaceTransform,
    scene: &Scene,
    bounds: &LayoutBounds,
    progress: f32,
) {
    for accent in &scene.accents {
        let alpha = accent.opacity(progress);
        if alpha <= 0.0 {
            continue;
        }
        let rect = transform.rect_to_screen(&accent.rect_in(bounds, progress));
        paint_accent(painter, accent, rect, alpha);
    }
}

fn paint_accent(painter: &egui::Painter, accent: &Accent, rect: egui::Rect, alpha: f32) {
    match accent.kind {
        AccentKind::Glow => {
            // Radial falloff from concentric discs
            let radius = rect.width().min(rect.height()) / 2.0;
            const RINGS: usize = 8;
            for ring in 0..RINGS {
                let t = 1.0 - ring as f32 / RINGS as f32;
                painter.circle_filled(rect.center(), radius * t, rgba(accent.color, alpha / RINGS as f32 * 2.0));
            }
        }
        AccentKind::Heat => {
            let rounding = rect.height() * 0.25;
            painter.rect_filled(rect, rounding, rgba(accent.color, alpha));
            painter.rect_filled(rect.shrink(rect.height() * 0.15), rounding, rgba(accent.color, alpha * 0.5));
        }
        AccentKind::Outline => {
            painter.rect_filled(rect.expand(6.0), 6.0, rgba(accent.color, alpha * 0.15));
            painter.rect_stroke(
                rect,
                4.0,
                egui::Stroke::new(1.0, rgba(accent.color, alpha)),
                egui::StrokeKind::Inside,
            );
        }
    }
}

/// "Scroll to explore" prompt at the bottom of the canvas
pub fn paint_scroll_hint(painter: &egui::Painter, canvas: egui::Rect, scene: &Scene, progress: f32) {
    let Some(hint) = &scene.hint else { return };
    let alpha = scene.hint_opacity(progress);
    if alpha <= 0.0 {
        return;
    }
    let color = egui::Color32::from_white_alpha((alpha * 150.0) as u8);
    let anchor = egui::pos2(canvas.center().x, canvas.bottom() - 48.0);
    painter.text(
        anchor,
        egui::Align2::CENTER_BOTTOM,
        hint.text.to_uppercase(),
        egui::FontId::proportional(11.0),
        color,
    );
    // Thin line under the label
    painter.line_segment(
        [anchor + egui::vec2(0.0, 6.0), anchor + egui::vec2(0.0, 30.0)],
        egui::Stroke::new(1.0, color),
    );
}

/// Paint hotspots and the tooltip of the hovered one.
///
/// Returns the index of the hovered hotspot.
pub fn paint_hotspots(
    ctx: &egui::Context,
    painter: &egui::Painter,
    transform: &SurfaceTransform,
    scene: &Scene,
    bounds: &LayoutBounds,
    alpha: f32,
) -> Option<usize> {
    if alpha <= 0.0 {
        return None;
    }

    let hovered = ctx
        .pointer_hover_pos()
        .map(|pos| transform.to_local(pos))
        .and_then(|local| scene.hotspot_at(bounds, local, HOTSPOT_RADIUS / transform.scale));

    let time = ctx.input(|i| i.time);
    let accent = [6, 182, 212, 255];
    for (i, hotspot) in scene.hotspots.iter().enumerate() {
        let (x, y) = hotspot.center(bounds);
        let center = transform.to_screen(x, y);

        // Ping ring
        let phase = ((time * 0.8 + i as f64 * 0.3) % 1.0) as f32;
        painter.circle_stroke(
            center,
            6.0 + phase * 14.0,
            egui::Stroke::new(1.5, rgba(accent, alpha * (1.0 - phase))),
        );
        let fill = if hovered == Some(i) { rgba([255, 255, 255, 255], alpha) } else { rgba(accent, alpha) };
        painter.circle_filled(center, 6.0, fill);
        painter.circle_stroke(center, 6.0, egui::Stroke::new(2.0, rgba([255, 255, 255, 255], alpha)));
    }

    if let Some(i) = hovered {
        let hotspot = &scene.hotspots[i];
        let (x, y) = hotspot.center(bounds);
        let center = transform.to_screen(x, y);
        let (pivot, offset) = match hotspot.side {
            TooltipSide::Right => (egui::Align2::LEFT_CENTER, egui::vec2(24.0, 0.0)),
            TooltipSide::Left => (egui::Align2::RIGHT_CENTER, egui::vec2(-24.0, 0.0)),
        };
        egui::Area::new(egui::Id::new(("hotspot_tooltip", i)))
            .order(egui::Order::Tooltip)
            .fixed_pos(center + offset)
            .pivot(pivot)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(220.0);
                    ui.label(egui::RichText::new(&hotspot.title).strong());
                    ui.label(egui::RichText::new(&hotspot.description).small().weak());
                });
            });
    }

    // Keep the ping animating
    ctx.request_repaint();
    hovered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotspot_fade_timing() {
        assert_eq!(hotspot_alpha(0.0), 0.0);
        assert_eq!(hotspot_alpha(HOTSPOT_DELAY), 0.0);
        assert!((hotspot_alpha(HOTSPOT_DELAY + HOTSPOT_FADE / 2.0) - 0.5).abs() < 1e-6);
        assert_eq!(hotspot_alpha(HOTSPOT_DELAY + HOTSPOT_FADE), 1.0);
        assert_eq!(hotspot_alpha(10.0), 1.0);
    }

    #[test]
    fn test_exit_button_bottom_center() {
        let rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(800.0, 600.0));
        assert_eq!(exit_button_anchor(rect), egui::pos2(500.0, 610.0));
    }

    #[test]
    fn test_rgba_scales_alpha() {
        assert_eq!(rgba([10, 20, 30, 255], 0.0).a(), 0);
        let c = rgba([255, 255, 255, 200], 0.5);
        assert_eq!(c, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 100));
    }
}
