//! Drawing surface abstraction used by the presentation.

use super::frame::Frame;
use super::layout::LayoutBounds;

/// Anything a frame can be painted onto.
///
/// The egui canvas implements this over a texture; tests use a recorder.
pub trait Surface {
    /// Drawable size in logical pixels
    fn size(&self) -> (f32, f32);

    /// Erase the previous frame
    fn clear(&mut self);

    /// Paint frame `index` into `bounds`
    fn blit(&mut self, index: usize, frame: &Frame, bounds: LayoutBounds);
}
