//! Entities module - presentation model independent of the GUI toolkit
//!
//! - `frame`, `loader`, `sequence`: decoding and holding the image sequence
//! - `frame_index`, `layout`, `keyframes`: pure mapping math
//! - `scene`: captions, accents and hotspots drawn over the frames
//! - `presentation`: wires all of the above to the event bus and a [`Surface`]

pub mod frame;
pub mod frame_index;
pub mod keyframes;
pub mod layout;
pub mod loader;
pub mod presentation;
pub mod scene;
pub mod sequence;
pub mod surface;

pub use frame::{Frame, FrameError, FrameStatus};
pub use frame_index::{frame_index, target_frame};
pub use layout::{contain_fit, BoundsTracker, LayoutBounds};
pub use loader::Loader;
pub use presentation::{Presentation, SequenceSource};
pub use scene::Scene;
pub use sequence::{FrameSequence, MissingFramePolicy, Readiness};
pub use surface::Surface;
