//! Presentation - ties frames, scroll progress and the drawing surface together.
//!
//! Lifecycle:
//! 1. `activate()` subscribes to progress/resize events and starts decoding
//! 2. Every display refresh calls `tick()`: drain events, poll loading,
//!    perform at most one draw
//! 3. `deactivate()` detaches every observer and cancels outstanding decodes
//!
//! Nothing is drawn before the whole sequence has settled. Progress that
//! arrives while loading is remembered and shown once the sequence is ready.

use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::frame_index::target_frame;
use super::layout::{contain_fit, BoundsTracker, LayoutBounds};
use super::sequence::{FrameSequence, MissingFramePolicy, Readiness};
use super::surface::Surface;
use crate::core::event_bus::{EventBus, SubscriptionId};
use crate::core::redraw::RedrawScheduler;
use crate::core::scroll_events::{ProgressChangedEvent, SurfaceResizedEvent};
use crate::core::workers::Workers;

/// Where frames come from and how loading failures are handled
#[derive(Debug, Clone)]
pub struct SequenceSource {
    pub dir: PathBuf,
    pub pattern: String,
    pub count: usize,
    pub policy: MissingFramePolicy,
    pub timeout: Option<Duration>,
}

/// Notifications collected by bus callbacks until the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
enum Signal {
    Progress(f32),
    Resized(f32, f32),
}

type Inbox = Arc<Mutex<Vec<Signal>>>;

pub struct Presentation {
    source: SequenceSource,
    sequence: Option<FrameSequence>,
    bounds: BoundsTracker,
    redraw: RedrawScheduler,
    progress: f32,
    immersive: bool,
    surface_size: Option<(f32, f32)>,
    inbox: Inbox,
    bus: Option<EventBus>,
    subscriptions: Vec<SubscriptionId>,
    last_drawn: Option<usize>,
}

impl Presentation {
    pub fn new(source: SequenceSource) -> Self {
        Self {
            source,
            sequence: None,
            bounds: BoundsTracker::new(),
            redraw: RedrawScheduler::new(),
            progress: 0.0,
            immersive: false,
            surface_size: None,
            inbox: Arc::new(Mutex::new(Vec::new())),
            bus: None,
            subscriptions: Vec::new(),
            last_drawn: None,
        }
    }

    /// Subscribe to the bus and start decoding every frame. No-op if active.
    pub fn activate(&mut self, workers: &Workers, bus: &EventBus) {
        if self.is_active() {
            debug!("Presentation already active");
            return;
        }
        let sequence = FrameSequence::load(
            &self.source.dir,
            &self.source.pattern,
            self.source.count,
            workers,
            self.source.policy,
            self.source.timeout,
        );
        self.attach(sequence, bus);
    }

    fn attach(&mut self, sequence: FrameSequence, bus: &EventBus) {
        let inbox = Arc::clone(&self.inbox);
        let progress_id = bus.subscribe::<ProgressChangedEvent, _>(move |e| {
            inbox.lock().unwrap_or_else(|e| e.into_inner()).push(Signal::Progress(e.0));
        });
        let inbox = Arc::clone(&self.inbox);
        let resize_id = bus.subscribe::<SurfaceResizedEvent, _>(move |e| {
            inbox
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(Signal::Resized(e.width, e.height));
        });

        self.subscriptions = vec![progress_id, resize_id];
        self.bus = Some(bus.clone());
        self.sequence = Some(sequence);
        info!("Presentation activated ({} frames)", self.source.count);
    }

    /// Detach observers and drop queued decodes. Frames are released.
    pub fn deactivate(&mut self, workers: &Workers) {
        if !self.is_active() {
            return;
        }
        self.detach();
        workers.bump_epoch();
        self.sequence = None;
        self.redraw.cancel();
        self.bounds.reset();
        self.last_drawn = None;
        self.inbox.lock().unwrap_or_else(|e| e.into_inner()).clear();
        info!("Presentation deactivated");
    }

    fn detach(&mut self) {
        if let Some(bus) = self.bus.take() {
            for id in self.subscriptions.drain(..) {
                bus.unsubscribe(id);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.sequence.is_some()
    }

    /// New scroll progress. Requests a redraw once frames are ready.
    pub fn on_progress(&mut self, progress: f32) {
        if !progress.is_finite() {
            return;
        }
        self.progress = progress.clamp(0.0, 1.0);
        if self.immersive {
            return;
        }
        self.request_target();
    }

    /// Surface resized: refit bounds and redraw what should be visible.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.surface_size = Some((width, height));
        if let Some(image) = self.reference_size() {
            self.bounds.refit((width, height), image);
        }
        self.request_target();
    }

    /// Immersive mode pins frame 0; leaving it returns to the progress frame.
    pub fn set_immersive(&mut self, immersive: bool) {
        if self.immersive == immersive {
            return;
        }
        self.immersive = immersive;
        debug!("Immersive mode {}", if immersive { "on" } else { "off" });
        self.request_target();
    }

    fn request_target(&mut self) {
        let Some(sequence) = self.sequence.as_ref().filter(|s| s.is_ready()) else {
            return;
        };
        if let Some(index) = target_frame(self.progress, sequence.len(), self.immersive) {
            self.redraw.request(index);
        }
    }

    /// Size of the first decoded frame; all frames share one size.
    fn reference_size(&self) -> Option<(f32, f32)> {
        let sequence = self.sequence.as_ref()?;
        (0..sequence.len()).find_map(|i| sequence.frame(i)).map(|f| f.size())
    }

    fn drain_inbox(&mut self) {
        let signals = std::mem::take(&mut *self.inbox.lock().unwrap_or_else(|e| e.into_inner()));
        for signal in signals {
            match signal {
                Signal::Progress(p) => self.on_progress(p),
                Signal::Resized(w, h) => self.on_resize(w, h),
            }
        }
    }

    /// One display refresh. Returns the index of the frame drawn, if any.
    pub fn tick(&mut self, now: Instant, surface: &mut dyn Surface) -> Option<usize> {
        if self.surface_size.is_none() {
            self.surface_size = Some(surface.size());
        }
        self.drain_inbox();

        let became_ready = match self.sequence.as_mut() {
            Some(sequence) => sequence.poll_at(now) && sequence.is_ready(),
            None => return None,
        };
        if became_ready {
            if let (Some(size), Some(image)) = (self.surface_size, self.reference_size()) {
                self.bounds.refit(size, image);
            }
            self.request_target();
        }

        let index = self.redraw.take()?;
        self.draw(index, surface);
        Some(index)
    }

    fn draw(&mut self, index: usize, surface: &mut dyn Surface) {
        surface.clear();
        self.last_drawn = Some(index);

        let Some(frame) = self.sequence.as_ref().and_then(|s| s.frame(index)) else {
            warn!("Frame {} not loaded, surface left blank", index);
            return;
        };
        let Some(fit) = contain_fit(surface.size(), frame.size()) else {
            return;
        };
        // Stored bounds only move on ready and resize
        surface.blit(index, frame, fit);
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_immersive(&self) -> bool {
        self.immersive
    }

    /// Bounds of the drawn image for overlay positioning
    pub fn bounds(&self) -> Option<LayoutBounds> {
        self.bounds.current()
    }

    pub fn readiness(&self) -> Option<&Readiness> {
        self.sequence.as_ref().map(|s| s.readiness())
    }

    pub fn sequence(&self) -> Option<&FrameSequence> {
        self.sequence.as_ref()
    }

    pub fn source(&self) -> &SequenceSource {
        &self.source
    }

    pub fn last_drawn(&self) -> Option<usize> {
        self.last_drawn
    }

    pub fn redraw(&self) -> &RedrawScheduler {
        &self.redraw
    }
}

impl Drop for Presentation {
    fn drop(&mut self) {
        self.detach();
    }
}
