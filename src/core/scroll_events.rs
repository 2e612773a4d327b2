//! Presentation events carried by the event bus.

/// Normalized scroll progress changed (value in [0, 1]).
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressChangedEvent(pub f32);

/// Drawing surface changed size (logical pixels).
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceResizedEvent {
    pub width: f32,
    pub height: f32,
}

/// "Experience Now" pressed.
#[derive(Clone, Debug)]
pub struct EnterImmersiveEvent;

/// "Exit Experience" pressed.
#[derive(Clone, Debug)]
pub struct ExitImmersiveEvent;

/// Scroll the virtual page by a signed amount (logical pixels, +down).
#[derive(Clone, Debug)]
pub struct ScrollByEvent(pub f32);

/// Scroll one viewport height down (true) or up (false).
#[derive(Clone, Debug)]
pub struct ScrollPageEvent {
    pub down: bool,
}

/// Jump to the top (false) or bottom (true) of the page.
#[derive(Clone, Debug)]
pub struct ScrollToEdgeEvent {
    pub bottom: bool,
}

/// Toggle borderless fullscreen.
#[derive(Clone, Debug)]
pub struct ToggleFullscreenEvent;

/// Toggle the help overlay.
#[derive(Clone, Debug)]
pub struct ToggleHelpEvent;
