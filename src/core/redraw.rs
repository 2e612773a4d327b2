//! Single-slot redraw request.
//!
//! Scroll events can arrive many times per display refresh. Instead of drawing
//! on every one of them we remember only the latest target frame:
//! 1. `request(frame)` overwrites the pending target (never queues a second)
//! 2. The next display refresh calls `take()` and performs at most one draw
//!
//! At most one redraw is outstanding at any time.

/// Pending redraw bookkeeping for one drawing surface.
///
/// # Usage
/// ```ignore
/// // On progress update:
/// scheduler.request(target_frame);
///
/// // On display refresh:
/// if let Some(frame) = scheduler.take() {
///     draw(frame);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RedrawScheduler {
    /// Target frame of the outstanding redraw
    pending: Option<usize>,
    /// Requests that replaced an earlier, not yet drawn one
    coalesced: u64,
    /// Redraws handed out by take()
    drawn: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a redraw of `frame` on the next refresh.
    /// If one is already pending its target is replaced.
    pub fn request(&mut self, frame: usize) {
        if let Some(prev) = self.pending.replace(frame) {
            self.coalesced += 1;
            log::trace!("RedrawScheduler: coalesced {} -> {}", prev, frame);
        }
    }

    /// Drop the outstanding request, if any
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            log::trace!("RedrawScheduler: cancelled pending redraw");
        }
    }

    /// Consume the outstanding request. Called once per display refresh.
    pub fn take(&mut self) -> Option<usize> {
        let frame = self.pending.take()?;
        self.drawn += 1;
        Some(frame)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Target frame of the outstanding request (if any)
    pub fn pending_frame(&self) -> Option<usize> {
        self.pending
    }

    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }

    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_pending_initially() {
        let mut scheduler = RedrawScheduler::new();
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.take(), None);
    }

    #[test]
    fn test_latest_request_wins() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.request(3);
        scheduler.request(9);
        scheduler.request(12);

        assert_eq!(scheduler.pending_frame(), Some(12));
        assert_eq!(scheduler.take(), Some(12));
        // One draw per refresh: nothing left
        assert_eq!(scheduler.take(), None);
        assert_eq!(scheduler.coalesced(), 2);
        assert_eq!(scheduler.drawn(), 1);
    }

    #[test]
    fn test_cancel_clears_slot() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.request(1);
        scheduler.cancel();
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.take(), None);
    }
}
