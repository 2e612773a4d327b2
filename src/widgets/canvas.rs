//! Presentation canvas - egui texture implementing [`Surface`].
//!
//! The presentation blits into the canvas on redraw; the canvas keeps the
//! uploaded texture and the fitted rectangle and paints them on every UI pass.
//! Surface coordinates are local to the canvas rect. In immersive mode the
//! whole canvas (image and overlays) is scaled about its center.

use eframe::egui;
use log::trace;

use crate::entities::frame::Frame;
use crate::entities::layout::LayoutBounds;
use crate::entities::surface::Surface;

/// Scale reached in immersive mode
pub const IMMERSIVE_SCALE: f32 = 1.1;

/// Duration of the immersive zoom (seconds)
pub const IMMERSIVE_ZOOM_TIME: f32 = 0.8;

/// Maps surface-local coordinates to screen positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    pub rect: egui::Rect,
    pub scale: f32,
}

impl SurfaceTransform {
    pub fn new(rect: egui::Rect, scale: f32) -> Self {
        Self { rect, scale }
    }

    /// Surface-local point to screen
    pub fn to_screen(&self, x: f32, y: f32) -> egui::Pos2 {
        let c = self.rect.center();
        let p = self.rect.min + egui::vec2(x, y);
        c + (p - c) * self.scale
    }

    /// Screen point to surface-local
    pub fn to_local(&self, pos: egui::Pos2) -> (f32, f32) {
        let c = self.rect.center();
        let p = c + (pos - c) / self.scale;
        let v = p - self.rect.min;
        (v.x, v.y)
    }

    pub fn rect_to_screen(&self, b: &LayoutBounds) -> egui::Rect {
        egui::Rect::from_min_max(self.to_screen(b.x, b.y), self.to_screen(b.x + b.w, b.y + b.h))
    }
}

/// Drawing surface backed by an egui texture
pub struct Canvas {
    ctx: egui::Context,
    texture: Option<egui::TextureHandle>,
    /// Frame currently shown and where (None after clear)
    shown: Option<(usize, LayoutBounds)>,
    size: (f32, f32),
}

impl Canvas {
    pub fn new(ctx: &egui::Context, initial_size: (f32, f32)) -> Self {
        Self {
            ctx: ctx.clone(),
            texture: None,
            shown: None,
            size: initial_size,
        }
    }

    /// Canvas rect changed. Returns true if the size differs from before.
    pub fn set_size(&mut self, size: (f32, f32)) -> bool {
        if (size.0 - self.size.0).abs() < 0.5 && (size.1 - self.size.1).abs() < 0.5 {
            return false;
        }
        self.size = size;
        true
    }

    pub fn shown(&self) -> Option<(usize, LayoutBounds)> {
        self.shown
    }

    /// Paint the current frame
    pub fn paint(&self, painter: &egui::Painter, transform: &SurfaceTransform) {
        painter.rect_filled(painter.clip_rect(), 0.0, egui::Color32::BLACK);
        let (Some(texture), Some((_, bounds))) = (&self.texture, self.shown) else {
            return;
        };
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        painter.image(texture.id(), transform.rect_to_screen(&bounds), uv, egui::Color32::WHITE);
    }
}

impl Surface for Canvas {
    fn size(&self) -> (f32, f32) {
        self.size
    }

    fn clear(&mut self) {
        self.shown = None;
    }

    fn blit(&mut self, index: usize, frame: &Frame, bounds: LayoutBounds) {
        let image = egui::ColorImage::from_rgba_unmultiplied([frame.width(), frame.height()], frame.pixels());
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(self.ctx.load_texture("presentation_frame", image, egui::TextureOptions::LINEAR));
            }
        }
        trace!("Canvas: frame {} at {:?}", index, bounds);
        self.shown = Some((index, bounds));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: egui::Pos2, b: egui::Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_identity_transform() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(800.0, 600.0));
        let t = SurfaceTransform::new(rect, 1.0);
        assert!(approx(t.to_screen(0.0, 0.0), egui::pos2(10.0, 20.0)));
        assert_eq!(t.to_local(egui::pos2(110.0, 220.0)), (100.0, 200.0));
    }

    #[test]
    fn test_scaled_about_center() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1000.0, 500.0));
        let t = SurfaceTransform::new(rect, IMMERSIVE_SCALE);
        // Center is fixed
        assert!(approx(t.to_screen(500.0, 250.0), egui::pos2(500.0, 250.0)));
        // Corners move outwards
        assert!(approx(t.to_screen(0.0, 0.0), egui::pos2(-50.0, -25.0)));

        let screen = t.to_screen(123.0, 45.0);
        let (x, y) = t.to_local(screen);
        assert!((x - 123.0).abs() < 1e-3 && (y - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_canvas_surface_records_blit() {
        let ctx = egui::Context::default();
        let mut canvas = Canvas::new(&ctx, (1920.0, 1080.0));
        assert!(!canvas.set_size((1920.2, 1080.0)));
        assert!(canvas.set_size((800.0, 600.0)));

        let bounds = LayoutBounds { x: 100.0, y: 0.0, w: 600.0, h: 600.0 };
        canvas.blit(4, &Frame::solid(2, 2, [255, 0, 0, 255]), bounds);
        assert_eq!(canvas.shown(), Some((4, bounds)));
        canvas.clear();
        assert_eq!(canvas.shown(), None);
    }
}
