//! Stylized QR rendering: dark modules drawn as filled circles and the three
//! finder patterns replaced with ring-and-dot eyes.
//!
//! Encoding is delegated to the `qrcode` crate; this crate turns the module
//! grid into geometry against a minimal [`RenderSurface`] and can rasterize
//! offscreen through [`Picture`].
//!
//! ```
//! use dot_qr::{ImageFormat, QrOptions, QrRenderer, Size};
//!
//! let renderer = QrRenderer::try_new(QrOptions::new("HELLO"))?;
//! let png = renderer.to_image_data(Size::square(512.0), ImageFormat::Png)?;
//! # assert!(!png.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod export;
pub mod finder;
pub mod grid;
pub mod render;
pub mod surface;

pub use export::{ExportError, ImageFormat};
pub use finder::{is_finder_module, FinderCorner, FINDER_SIZE};
pub use grid::{EncodeFailure, ModuleGrid, VersionSpec, MAX_VERSION, MIN_VERSION};
pub use render::{module_size, ErrorCallback, QrOptions, QrRenderer, RenderFingerprint};
pub use surface::{DrawCommand, Picture, RenderSurface, Size};

pub use qrcode::EcLevel;
