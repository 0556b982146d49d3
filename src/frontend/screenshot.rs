// Screenshots - Composed frames saved as PNG
//
// The scene target is written as 8-bit RGB; alpha is dropped since a
// presented frame is always opaque.

use crate::display::RenderTarget;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while saving a screenshot
#[derive(Debug)]
pub enum ScreenshotError {
    /// Creating the directory or file failed
    Io(io::Error),

    /// The PNG encoder rejected the image
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "Cannot write screenshot: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "Cannot encode screenshot: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreenshotError::Io(e) => Some(e),
            ScreenshotError::PngEncoding(e) => Some(e),
        }
    }
}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save `target` as a timestamped PNG in `directory`
///
/// The directory is created if needed. Millisecond timestamps keep
/// screenshots taken in quick succession apart.
///
/// # Returns
/// Path of the written file
pub fn save_screenshot(target: &RenderTarget, directory: &Path) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(directory)?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
    let path = directory.join(format!("ufo_{}.png", stamp));
    write_png(&path, target)?;

    Ok(path)
}

fn write_png(path: &Path, target: &RenderTarget) -> Result<(), ScreenshotError> {
    let out = io::BufWriter::new(fs::File::create(path)?);

    let mut encoder = png::Encoder::new(out, target.width() as u32, target.height() as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder
        .write_header()?
        .write_image_data(&target.to_rgb_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Rgba;

    #[test]
    fn test_save_screenshot() {
        let dir = tempfile::tempdir().unwrap();
        let shots = dir.path().join("shots");

        let mut target = RenderTarget::new(4, 3);
        target.set_pixel(0, 0, Rgba::WHITE);

        let path = save_screenshot(&target, &shots).unwrap();
        assert!(path.starts_with(&shots));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
