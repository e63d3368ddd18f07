//! Offscreen export: record the render into a [`Picture`], rasterize, and
//! hand the pixels to the `image` crate's encoders.

use crate::grid::EncodeFailure;
use crate::render::QrRenderer;
use crate::surface::{Picture, Size};
use std::fmt;
use std::io::Cursor;

/// Output byte format of [`QrRenderer::to_image_data`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Tightly packed RGBA8 pixels, row-major, no header.
    RawRgba,
    /// PNG-encoded image.
    Png,
}

#[derive(Debug)]
pub enum ExportError {
    /// The renderer never became ready; carries the original encoder failure.
    Encode(EncodeFailure),
    /// The external image encoder rejected the raster.
    Image(image::ImageError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Encode(e) => write!(f, "cannot export a failed QR render: {e}"),
            ExportError::Image(e) => write!(f, "image encoding failed: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Encode(e) => Some(e),
            ExportError::Image(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

impl QrRenderer {
    /// Record the same draw sequence as [`QrRenderer::render`] into a
    /// resolution-independent picture. A failed renderer yields an empty one.
    pub fn to_picture(&self, size: Size) -> Picture {
        let mut picture = Picture::new(size);
        self.render(&mut picture, size);
        picture
    }

    /// Render offscreen at `size` and encode. Drawing is synchronous; only
    /// the encode step is external. The output is deterministic for a given
    /// configuration and size, and a failed call leaves nothing behind; just
    /// call again to retry.
    pub fn to_image_data(&self, size: Size, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
        if let Some(failure) = self.failure() {
            return Err(ExportError::Encode(*failure));
        }

        let picture = self.to_picture(size);
        let raster = picture.rasterize(size.width.round() as u32, size.height.round() as u32);

        match format {
            ImageFormat::RawRgba => Ok(raster.into_raw()),
            ImageFormat::Png => {
                let mut bytes = Vec::new();
                raster.write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)?;
                Ok(bytes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::VersionSpec;
    use crate::render::QrOptions;
    use image::Rgba;

    fn renderer() -> QrRenderer {
        let mut options = QrOptions::new("HELLO");
        options.version = VersionSpec::Fixed(1);
        options.background = Some(Rgba([255, 255, 255, 255]));
        QrRenderer::try_new(options).unwrap()
    }

    #[test]
    fn raw_rgba_has_exact_length() {
        let bytes = renderer()
            .to_image_data(Size::square(210.0), ImageFormat::RawRgba)
            .unwrap();
        assert_eq!(bytes.len(), 210 * 210 * 4);
    }

    #[test]
    fn png_output_carries_the_signature() {
        let bytes = renderer()
            .to_image_data(Size::square(64.0), ImageFormat::Png)
            .unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn export_is_deterministic() {
        let renderer = renderer();
        let a = renderer
            .to_image_data(Size::square(210.0), ImageFormat::Png)
            .unwrap();
        let b = renderer
            .to_image_data(Size::square(210.0), ImageFormat::Png)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn failed_renderer_exports_the_encode_failure() {
        let mut options = QrOptions::new("A".repeat(10_000));
        options.version = VersionSpec::Fixed(1);
        let renderer = QrRenderer::new(options, None);
        let err = renderer
            .to_image_data(Size::square(64.0), ImageFormat::Png)
            .unwrap_err();
        assert!(matches!(err, ExportError::Encode(EncodeFailure::DataTooLong)));
        assert!(renderer.to_picture(Size::square(64.0)).commands().is_empty());
    }
}
