//! Scroll progress to frame index mapping.
//!
//! The mapping is a triangle wave over one scroll gesture:
//!
//! ```text
//! index
//!  N-1 |        /\
//!      |      /    \
//!      |    /        \
//!    0 |__/____________\__
//!      0            0.85  1.0   progress
//! ```
//!
//! `[0, 0.85]` plays the sequence forward ("explode"), `(0.85, 1.0]` plays
//! it backwards ("reassemble"). Immersive mode pins the frame to 0.

/// Progress at which playback reverses
pub const EXPLODE_SPLIT: f32 = 0.85;

/// Length of the reassemble phase
pub const REASSEMBLE_SPAN: f32 = 1.0 - EXPLODE_SPLIT;

/// Frame index for `progress` in a sequence of `frame_count` frames.
///
/// Progress outside [0, 1] is clamped, non-finite progress counts as 0.
/// Returns None for an empty sequence.
pub fn frame_index(progress: f32, frame_count: usize) -> Option<usize> {
    if frame_count == 0 {
        return None;
    }
    let p = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 0.0 };
    let last = (frame_count - 1) as f32;

    let raw = if p <= EXPLODE_SPLIT {
        ((p / EXPLODE_SPLIT) * last).floor()
    } else {
        let r = (p - EXPLODE_SPLIT) / REASSEMBLE_SPAN;
        ((1.0 - r) * last).floor()
    };

    // Floating point can overshoot at the exact boundaries
    Some(raw.clamp(0.0, last) as usize)
}

/// Frame to display, taking immersive mode into account.
pub fn target_frame(progress: f32, frame_count: usize, immersive: bool) -> Option<usize> {
    if immersive {
        return if frame_count == 0 { None } else { Some(0) };
    }
    frame_index(progress, frame_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 192;

    fn steps(from: f32, to: f32, count: usize) -> impl Iterator<Item = f32> {
        (0..=count).map(move |i| from + (to - from) * i as f32 / count as f32)
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(frame_index(0.0, N), Some(0));
        assert_eq!(frame_index(0.85, N), Some(N - 1));
        assert_eq!(frame_index(1.0, N), Some(0));
    }

    #[test]
    fn test_explode_phase_formula_and_monotonic() {
        let mut last = 0;
        for p in steps(0.0, 0.85, 1000).filter(|p| *p <= EXPLODE_SPLIT) {
            let expected = ((p / EXPLODE_SPLIT) * (N - 1) as f32).floor() as usize;
            let idx = frame_index(p, N).unwrap();
            assert_eq!(idx, expected.min(N - 1), "p = {}", p);
            assert!(idx >= last, "not monotonic at p = {}", p);
            last = idx;
        }
        assert_eq!(last, N - 1);
    }

    #[test]
    fn test_reassemble_phase_formula_and_monotonic() {
        let mut last = N - 1;
        for p in steps(0.851, 1.0, 1000) {
            let r = (p - EXPLODE_SPLIT) / REASSEMBLE_SPAN;
            let expected = ((1.0 - r) * (N - 1) as f32).floor().clamp(0.0, (N - 1) as f32) as usize;
            let idx = frame_index(p, N).unwrap();
            assert_eq!(idx, expected, "p = {}", p);
            assert!(idx <= last, "not monotonic at p = {}", p);
            last = idx;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn test_always_in_range() {
        for p in steps(-0.5, 1.5, 4000) {
            let idx = frame_index(p, N).unwrap();
            assert!(idx < N);
        }
        assert_eq!(frame_index(f32::NAN, N), Some(0));
        assert_eq!(frame_index(f32::INFINITY, N), Some(0));
    }

    #[test]
    fn test_direction_reverses_at_split() {
        let before = frame_index(0.84, N).unwrap();
        let peak = frame_index(0.85, N).unwrap();
        let after = frame_index(0.86, N).unwrap();
        assert!(before < peak);
        assert!(after < peak);
    }

    #[test]
    fn test_immersive_forces_first_frame() {
        for p in steps(0.0, 1.0, 50) {
            assert_eq!(target_frame(p, N, true), Some(0));
        }
        assert_eq!(target_frame(0.5, N, false), frame_index(0.5, N));
    }

    #[test]
    fn test_empty_and_single_frame() {
        assert_eq!(frame_index(0.5, 0), None);
        assert_eq!(target_frame(0.5, 0, true), None);
        assert_eq!(frame_index(0.85, 1), Some(0));
        assert_eq!(frame_index(0.3, 1), Some(0));
    }
}
