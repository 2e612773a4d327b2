//! Scroll tracker - turns a virtual page offset into normalized progress.
//!
//! The presentation lives on a page `page_factor` viewports tall. Progress is
//! the offset of the viewport's top edge divided by the scrollable range
//! (`page_height - viewport_height`), so the very top is 0 and the very
//! bottom is 1.
//!
//! Every change of progress is published as [`ProgressChangedEvent`]; the
//! tracker stays silent when an input doesn't move it (e.g. scrolling past
//! the bottom).

use log::trace;

use super::event_bus::OptionalEmitter;
use super::scroll_events::ProgressChangedEvent;

/// Page height in viewports
pub const DEFAULT_PAGE_FACTOR: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct ScrollTracker {
    offset: f32,
    viewport_height: f32,
    page_factor: f32,
    progress: f32,
    emitter: OptionalEmitter,
}

impl ScrollTracker {
    pub fn new(page_factor: f32, viewport_height: f32) -> Self {
        let page_factor = if page_factor.is_finite() { page_factor.max(1.0) } else { DEFAULT_PAGE_FACTOR };
        Self {
            offset: 0.0,
            viewport_height: sanitize(viewport_height),
            page_factor,
            progress: 0.0,
            emitter: OptionalEmitter::dummy(),
        }
    }

    /// Attach the emitter used to publish progress changes
    pub fn set_emitter(&mut self, emitter: OptionalEmitter) {
        self.emitter = emitter;
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn page_height(&self) -> f32 {
        self.viewport_height * self.page_factor
    }

    /// Scrollable distance; zero when the page fits into the viewport.
    pub fn range(&self) -> f32 {
        (self.page_height() - self.viewport_height).max(0.0)
    }

    /// Scroll by a signed delta (+down). Returns true if progress changed.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        if !delta.is_finite() || delta == 0.0 {
            return false;
        }
        self.offset += delta;
        self.update()
    }

    /// Scroll to an absolute offset. Returns true if progress changed.
    pub fn scroll_to(&mut self, offset: f32) -> bool {
        if !offset.is_finite() {
            return false;
        }
        self.offset = offset;
        self.update()
    }

    pub fn page_down(&mut self) -> bool {
        self.scroll_by(self.viewport_height)
    }

    pub fn page_up(&mut self) -> bool {
        self.scroll_by(-self.viewport_height)
    }

    pub fn home(&mut self) -> bool {
        self.scroll_to(0.0)
    }

    pub fn end(&mut self) -> bool {
        self.scroll_to(self.range())
    }

    /// Viewport resized. Offset is rescaled so progress stays where it was,
    /// including across a collapse to zero height.
    pub fn set_viewport_height(&mut self, height: f32) -> bool {
        let height = sanitize(height);
        if (height - self.viewport_height).abs() < f32::EPSILON {
            return false;
        }
        let progress = self.progress;
        self.viewport_height = height;
        self.offset = progress * self.range();
        self.update()
    }

    fn update(&mut self) -> bool {
        let range = self.range();
        self.offset = self.offset.clamp(0.0, range);
        // Nothing to scroll: hold the last progress until the page has a range again
        if range <= 0.0 {
            return false;
        }
        let progress = (self.offset / range).clamp(0.0, 1.0);

        if progress == self.progress {
            return false;
        }

        trace!("Scroll progress {:.4} -> {:.4} (offset {:.1}/{:.1})", self.progress, progress, self.offset, range);
        self.progress = progress;
        self.emitter.emit(ProgressChangedEvent(progress));
        true
    }
}

fn sanitize(height: f32) -> f32 {
    if height.is_finite() { height.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::{downcast_event, EventBus};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_top_and_bottom() {
        let mut tracker = ScrollTracker::new(4.0, 1000.0);
        assert_eq!(tracker.range(), 3000.0);
        assert_eq!(tracker.progress(), 0.0);

        assert!(tracker.end());
        assert_eq!(tracker.progress(), 1.0);

        // Past the bottom: clamped, no change
        assert!(!tracker.scroll_by(500.0));
        assert_eq!(tracker.offset(), 3000.0);

        assert!(tracker.home());
        assert_eq!(tracker.progress(), 0.0);
        assert!(!tracker.scroll_by(-10.0));
    }

    #[test]
    fn test_progress_monotonic_in_offset() {
        let mut tracker = ScrollTracker::new(4.0, 720.0);
        let mut last = tracker.progress();
        for _ in 0..100 {
            tracker.scroll_by(37.0);
            assert!(tracker.progress() >= last);
            last = tracker.progress();
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_resize_keeps_progress() {
        let mut tracker = ScrollTracker::new(4.0, 1000.0);
        tracker.scroll_to(1500.0);
        assert!((tracker.progress() - 0.5).abs() < 1e-6);

        tracker.set_viewport_height(600.0);
        assert!((tracker.progress() - 0.5).abs() < 1e-6);
        assert!((tracker.offset() - 900.0).abs() < 1e-3);
    }

    #[test]
    fn test_collapsed_viewport_keeps_progress() {
        let mut tracker = ScrollTracker::new(4.0, 1000.0);
        tracker.scroll_to(1500.0);
        assert!((tracker.progress() - 0.5).abs() < 1e-6);

        // Minimized window
        assert!(!tracker.set_viewport_height(0.0));
        assert!((tracker.progress() - 0.5).abs() < 1e-6);
        assert!(!tracker.scroll_by(100.0));

        tracker.set_viewport_height(1000.0);
        assert!((tracker.progress() - 0.5).abs() < 1e-6);
        assert!((tracker.offset() - 1500.0).abs() < 1e-3);
    }

    #[test]
    fn test_page_up_down() {
        let mut tracker = ScrollTracker::new(4.0, 1000.0);
        assert!(tracker.page_down());
        assert!((tracker.offset() - 1000.0).abs() < 1e-3);
        assert!(tracker.page_down());
        assert!(tracker.page_down());
        assert_eq!(tracker.progress(), 1.0);
        assert!(!tracker.page_down());
        assert!(tracker.page_up());
        assert!((tracker.offset() - 2000.0).abs() < 1e-3);
    }

    #[test]
    fn test_page_fits_viewport() {
        let mut tracker = ScrollTracker::new(1.0, 800.0);
        assert_eq!(tracker.range(), 0.0);
        assert!(!tracker.scroll_by(200.0));
        assert_eq!(tracker.progress(), 0.0);
    }

    #[test]
    fn test_emits_only_on_change() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = bus.subscribe::<ProgressChangedEvent, _>(move |e| {
            sink.lock().unwrap().push(e.0);
        });

        let mut tracker = ScrollTracker::new(2.0, 100.0);
        tracker.set_emitter(OptionalEmitter::from_emitter(bus.emitter()));
        tracker.scroll_by(50.0);
        tracker.scroll_by(100.0);
        tracker.scroll_by(100.0); // already at bottom

        assert_eq!(*seen.lock().unwrap(), vec![0.5, 1.0]);

        bus.unsubscribe(id);
        tracker.home();
        assert_eq!(seen.lock().unwrap().len(), 2);

        // Deferred copies are still queued for the app loop
        let queued: Vec<f32> = bus
            .poll()
            .iter()
            .filter_map(|e| downcast_event::<ProgressChangedEvent>(e).map(|p| p.0))
            .collect();
        assert_eq!(queued, vec![0.5, 1.0, 0.0]);
    }
}
