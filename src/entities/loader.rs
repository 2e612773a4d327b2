//! Image loader for animation frames
//!
//! Decodes any format the `image` crate was built with (WebP, PNG, JPEG) into
//! an RGBA8 [`Frame`]. Format is detected from content, not extension, so a
//! JPEG saved under a `.webp` name still loads.

use std::path::Path;
use log::trace;

use super::frame::{Frame, FrameError};

/// Frame decoder
pub struct Loader;

impl Loader {
    /// Decode complete image file into Frame
    pub fn load(path: &Path) -> Result<Frame, FrameError> {
        trace!("Decoding {}", path.display());

        let reader = image::ImageReader::open(path)
            .map_err(|e| FrameError::Io(format!("{}: {}", path.display(), e)))?
            .with_guessed_format()
            .map_err(|e| FrameError::Io(format!("{}: {}", path.display(), e)))?;

        if reader.format().is_none() {
            return Err(FrameError::UnsupportedFormat(format!(
                "{}: unknown image format",
                path.display()
            )));
        }

        let img = reader.decode().map_err(|e| Self::map_error(path, e))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Frame::from_rgba8(width as usize, height as usize, rgba.into_raw())
    }

    fn map_error(path: &Path, e: image::ImageError) -> FrameError {
        match e {
            image::ImageError::IoError(io) => FrameError::Io(format!("{}: {}", path.display(), io)),
            image::ImageError::Unsupported(u) => {
                FrameError::UnsupportedFormat(format!("{}: {}", path.display(), u))
            }
            other => FrameError::Image(format!("{}: {}", path.display(), other)),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

    /// Fresh, empty directory under the system temp dir
    pub fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "scrollreel_{}_{}_{}",
            tag,
            std::process::id(),
            NEXT_DIR.fetch_add(1, Ordering::SeqCst)
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    /// Write a solid-color PNG (the content, not the name, decides the format)
    pub fn write_png(path: &std::path::Path, width: u32, height: u32, rgba: [u8; 4]) {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        img.save_with_format(path, image::ImageFormat::Png).expect("write png");
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{temp_dir, write_png};
    use super::*;

    #[test]
    fn test_load_png() {
        let dir = temp_dir("loader_png");
        let path = dir.join("frame.png");
        write_png(&path, 4, 3, [10, 20, 30, 255]);

        let frame = Loader::load(&path).unwrap();
        assert_eq!((frame.width(), frame.height()), (4, 3));
        assert_eq!(&frame.pixels()[..4], &[10, 20, 30, 255]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_format_detected_from_content() {
        let dir = temp_dir("loader_guess");
        let path = dir.join("frame_0_delay-0.04s.webp");
        write_png(&path, 2, 2, [255, 0, 0, 255]);

        let frame = Loader::load(&path).unwrap();
        assert_eq!(frame.size(), (2.0, 2.0));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = temp_dir("loader_missing");
        let err = Loader::load(&dir.join("nope.webp")).unwrap_err();
        assert!(matches!(err, FrameError::Io(_)), "got {:?}", err);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let dir = temp_dir("loader_garbage");
        let path = dir.join("frame.webp");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = Loader::load(&path).unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedFormat(_) | FrameError::Image(_)), "got {:?}", err);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
