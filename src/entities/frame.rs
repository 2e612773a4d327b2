//! Decoded animation frame and per-frame load status.

use std::sync::Arc;

/// Frame loading status within a sequence
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    Pending,        // Decode queued or running
    Loaded,         // Pixels available
    Failed(String), // Decode failed or timed out (reason)
}

/// Frame loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    Io(String),
    Image(String),
    UnsupportedFormat(String),
    TimedOut,
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::Io(e) => write!(f, "I/O error: {}", e),
            FrameError::Image(e) => write!(f, "Image error: {}", e),
            FrameError::UnsupportedFormat(e) => write!(f, "Unsupported format: {}", e),
            FrameError::TimedOut => write!(f, "Timed out waiting for decode"),
        }
    }
}

impl std::error::Error for FrameError {}

/// Decoded RGBA8 image, cheap to clone (pixels are shared).
#[derive(Clone)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Arc<Vec<u8>>,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Frame {
    /// Wrap an RGBA8 buffer. Fails if the buffer doesn't match the dimensions.
    pub fn from_rgba8(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, FrameError> {
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(FrameError::Image(format!(
                "RGBA buffer is {} bytes, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: Arc::new(pixels),
        })
    }

    /// Solid-color frame (tests and placeholders)
    pub fn solid(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let mut pixels = vec![0u8; width * height * 4];
        for px in pixels.chunks_mut(4) {
            px.copy_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Intrinsic size as floats, for layout math
    pub fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba8_checks_length() {
        assert!(Frame::from_rgba8(2, 2, vec![0; 16]).is_ok());
        let err = Frame::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, FrameError::Image(_)));
    }

    #[test]
    fn test_solid_fills_every_pixel() {
        let frame = Frame::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(frame.size(), (3.0, 2.0));
        assert!(frame.pixels().chunks(4).all(|px| px == [1, 2, 3, 4]));
    }
}
