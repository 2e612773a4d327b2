//! Contain-fit (letterbox) layout of a frame inside the drawing surface.

use log::trace;

/// Where the fitted image sits inside the surface (surface-local logical px)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl LayoutBounds {
    /// Point at fractional position (fx, fy) of the bounds
    pub fn point_at(&self, fx: f32, fy: f32) -> (f32, f32) {
        (self.x + self.w * fx, self.y + self.h * fy)
    }

    /// Sub-rectangle given in fractions of the bounds
    pub fn sub_rect(&self, fx: f32, fy: f32, fw: f32, fh: f32) -> LayoutBounds {
        LayoutBounds {
            x: self.x + self.w * fx,
            y: self.y + self.h * fy,
            w: self.w * fw,
            h: self.h * fh,
        }
    }
}

/// Aspect-preserving "contain" fit of an `image` into a `surface`, centered.
///
/// Returns None if either size is empty or not finite.
pub fn contain_fit(surface: (f32, f32), image: (f32, f32)) -> Option<LayoutBounds> {
    let (cw, ch) = surface;
    let (iw, ih) = image;
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !(valid(cw) && valid(ch) && valid(iw) && valid(ih)) {
        return None;
    }

    let scale = (cw / iw).min(ch / ih);
    Some(LayoutBounds {
        x: cw / 2.0 - (iw / 2.0) * scale,
        y: ch / 2.0 - (ih / 2.0) * scale,
        w: iw * scale,
        h: ih * scale,
    })
}

/// Holds the bounds used by overlays and filters out sub-pixel updates.
///
/// New bounds replace the stored ones only when x or width moved by more
/// than one logical pixel, so overlays don't re-layout on rounding noise.
#[derive(Debug, Clone, Default)]
pub struct BoundsTracker {
    current: Option<LayoutBounds>,
}

impl BoundsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<LayoutBounds> {
        self.current
    }

    /// Offer new bounds. Returns true if they were accepted.
    pub fn update(&mut self, next: LayoutBounds) -> bool {
        match self.current {
            Some(prev) if (next.x - prev.x).abs() <= 1.0 && (next.w - prev.w).abs() <= 1.0 => false,
            _ => {
                trace!("Layout bounds -> {:?}", next);
                self.current = Some(next);
                true
            }
        }
    }

    /// Recompute from surface and image sizes. Returns true if bounds changed.
    pub fn refit(&mut self, surface: (f32, f32), image: (f32, f32)) -> bool {
        match contain_fit(surface, image) {
            Some(bounds) => self.update(bounds),
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_square_into_full_hd() {
        let b = contain_fit((1920.0, 1080.0), (100.0, 100.0)).unwrap();
        assert!(approx(b.w, 1080.0) && approx(b.h, 1080.0), "{:?}", b);
        assert!(approx(b.x, 420.0) && approx(b.y, 0.0), "{:?}", b);
    }

    #[test]
    fn test_wide_image_letterboxed_vertically() {
        let b = contain_fit((1000.0, 1000.0), (200.0, 100.0)).unwrap();
        assert!(approx(b.w, 1000.0) && approx(b.h, 500.0));
        assert!(approx(b.x, 0.0) && approx(b.y, 250.0));
    }

    #[test]
    fn test_upscale_and_aspect_preserved() {
        let b = contain_fit((1920.0, 1080.0), (16.0, 9.0)).unwrap();
        assert!(approx(b.w / b.h, 16.0 / 9.0));
        assert!(approx(b.w, 1920.0) && approx(b.x, 0.0) && approx(b.y, 0.0));
    }

    #[test]
    fn test_empty_sizes() {
        assert!(contain_fit((0.0, 1080.0), (100.0, 100.0)).is_none());
        assert!(contain_fit((1920.0, 1080.0), (0.0, 100.0)).is_none());
        assert!(contain_fit((f32::NAN, 1.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_subpixel_updates_suppressed() {
        let mut tracker = BoundsTracker::new();
        let base = LayoutBounds { x: 420.0, y: 0.0, w: 1080.0, h: 1080.0 };
        assert!(tracker.update(base));

        let jitter = LayoutBounds { x: 420.5, y: 3.0, w: 1080.6, h: 1081.0 };
        assert!(!tracker.update(jitter));
        assert_eq!(tracker.current(), Some(base));

        let moved = LayoutBounds { x: 425.0, ..base };
        assert!(tracker.update(moved));
        assert_eq!(tracker.current(), Some(moved));

        let wider = LayoutBounds { w: 1090.0, ..moved };
        assert!(tracker.update(wider));
    }

    #[test]
    fn test_refit_and_helpers() {
        let mut tracker = BoundsTracker::new();
        assert!(tracker.refit((1920.0, 1080.0), (100.0, 100.0)));
        assert!(!tracker.refit((1920.4, 1080.0), (100.0, 100.0)));
        assert!(!tracker.refit((0.0, 0.0), (100.0, 100.0)));

        let b = tracker.current().unwrap();
        let (cx, cy) = b.point_at(0.5, 0.5);
        assert!(approx(cx, 960.0) && approx(cy, 540.0));
        let sub = b.sub_rect(0.25, 0.4, 0.5, 0.35);
        assert!(approx(sub.w, 540.0) && approx(sub.x, 420.0 + 270.0));

        tracker.reset();
        assert!(tracker.current().is_none());
    }
}
