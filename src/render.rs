//! The render entry point: grid construction, the module pass, and the
//! finder-eye pass.

use crate::finder::{is_finder_module, FinderCorner, FINDER_SIZE};
use crate::grid::{EncodeFailure, ModuleGrid, VersionSpec};
use crate::surface::{RenderSurface, Size};
use image::Rgba;
use ndarray::Array2;
use qrcode::EcLevel;

/// Everything needed to construct a renderer.
#[derive(Clone, Debug)]
pub struct QrOptions {
    pub data: String,
    pub version: VersionSpec,
    pub ec_level: EcLevel,
    pub dark: Rgba<u8>,
    pub background: Option<Rgba<u8>>,
    pub gapless: bool,
}

impl QrOptions {
    /// Options with the usual defaults: auto version, level L, opaque black
    /// foreground, no background fill, gapless off.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            version: VersionSpec::Auto,
            ec_level: EcLevel::L,
            dark: Rgba([0, 0, 0, 255]),
            background: None,
            gapless: false,
        }
    }
}

/// Invoked at most once, synchronously during construction, with the
/// encoder's failure reason.
pub type ErrorCallback<'a> = Box<dyn FnOnce(&EncodeFailure) + 'a>;

enum RenderState {
    Ready(ModuleGrid),
    Failed(EncodeFailure),
}

/// Appearance-relevant inputs of one render. Two renders with equal
/// fingerprints produce the same image and the second can be skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFingerprint {
    dark: Rgba<u8>,
    ec_level: EcLevel,
    version: i16,
    modules: Array2<bool>,
}

/// Renders one QR code: dark modules as filled circles, finder patterns as
/// ring-and-dot eyes.
///
/// Construction drives the encoder. If the encoder rejects the input the
/// renderer is permanently failed: every later `render` is a no-op that
/// issues no primitives at all, background fill included.
pub struct QrRenderer {
    state: RenderState,
    ec_level: EcLevel,
    dark: Rgba<u8>,
    background: Option<Rgba<u8>>,
    gapless: bool,
}

impl QrRenderer {
    /// Build a ready renderer or report why encoding failed.
    pub fn try_new(options: QrOptions) -> Result<Self, EncodeFailure> {
        let grid = ModuleGrid::build(&options.data, options.version, options.ec_level)?;
        Ok(Self {
            state: RenderState::Ready(grid),
            ec_level: options.ec_level,
            dark: options.dark,
            background: options.background,
            gapless: options.gapless,
        })
    }

    /// Fire-and-forget construction. On encoder rejection the failure is
    /// delivered to `on_error` (if any) exactly once and the renderer is
    /// returned in the failed state; nothing propagates further.
    pub fn new(options: QrOptions, on_error: Option<ErrorCallback<'_>>) -> Self {
        let ec_level = options.ec_level;
        let dark = options.dark;
        let background = options.background;
        let gapless = options.gapless;
        match Self::try_new(options) {
            Ok(renderer) => renderer,
            Err(failure) => {
                if let Some(callback) = on_error {
                    callback(&failure);
                }
                Self {
                    state: RenderState::Failed(failure),
                    ec_level,
                    dark,
                    background,
                    gapless,
                }
            }
        }
    }

    pub fn has_failed(&self) -> bool {
        matches!(self.state, RenderState::Failed(_))
    }

    pub fn failure(&self) -> Option<&EncodeFailure> {
        match &self.state {
            RenderState::Failed(failure) => Some(failure),
            RenderState::Ready(_) => None,
        }
    }

    pub fn grid(&self) -> Option<&ModuleGrid> {
        match &self.state {
            RenderState::Ready(grid) => Some(grid),
            RenderState::Failed(_) => None,
        }
    }

    /// Draw the full image onto `surface`: background fill (if configured),
    /// then the module pass, then the eye pass on top.
    pub fn render(&self, surface: &mut impl RenderSurface, size: Size) {
        let grid = match &self.state {
            RenderState::Ready(grid) => grid,
            RenderState::Failed(failure) => {
                log::debug!("skipping render of failed QR ({failure})");
                return;
            }
        };

        if size.shortest_side() <= 0.0 {
            log::warn!(
                "render target has a zero-sized shortest side ({} x {})",
                size.width,
                size.height
            );
        }

        if let Some(background) = self.background {
            surface.fill_background(background);
        }

        let module_size = module_size(size, grid.size(), self.gapless);
        log::debug!(
            "rendering {n} x {n} grid at module size {module_size:.2}",
            n = grid.size()
        );

        draw_modules(grid, module_size, self.dark, surface);
        draw_finder_eyes(grid.size(), module_size, self.dark, surface);
    }

    /// None when the renderer is failed (a failed renderer never paints).
    pub fn fingerprint(&self) -> Option<RenderFingerprint> {
        self.grid().map(|grid| RenderFingerprint {
            dark: self.dark,
            ec_level: self.ec_level,
            version: grid.version(),
            modules: grid.modules().clone(),
        })
    }

    /// True unless `previous` captures an identical foreground color, EC
    /// level, version, and module grid.
    pub fn needs_repaint(&self, previous: Option<&RenderFingerprint>) -> bool {
        match (self.fingerprint(), previous) {
            (Some(current), Some(previous)) => current != *previous,
            _ => true,
        }
    }
}

/// Side length of one module in pixels. Gapless mode widens every module by
/// one pixel so adjacent dots overlap instead of leaving seams.
pub fn module_size(target: Size, module_count: usize, gapless: bool) -> f32 {
    target.shortest_side() / module_count as f32 + if gapless { 1.0 } else { 0.0 }
}

fn draw_modules(
    grid: &ModuleGrid,
    module_size: f32,
    color: Rgba<u8>,
    surface: &mut impl RenderSurface,
) {
    let n = grid.size();
    for y in 0..n {
        for x in 0..n {
            if !grid.is_dark(y, x) || is_finder_module(x, y, n) {
                continue;
            }
            // Dots anchor at the module's top-left corner, not its center.
            surface.fill_circle(
                (x as f32 * module_size, y as f32 * module_size),
                module_size / 3.0,
                color,
            );
        }
    }
}

fn draw_finder_eyes(
    module_count: usize,
    module_size: f32,
    color: Rgba<u8>,
    surface: &mut impl RenderSurface,
) {
    // The ring is inscribed in a square of (FINDER_SIZE - 1) modules; the dot
    // is half its diameter, centered inside it.
    let ring_radius = (FINDER_SIZE - 1) as f32 / 2.0 * module_size;
    let dot_radius = ring_radius / 2.0;

    for corner in FinderCorner::ALL {
        let (ox, oy) = corner.origin(module_count);
        let center = (
            ox as f32 * module_size + ring_radius,
            oy as f32 * module_size + ring_radius,
        );
        surface.draw_ring(center, ring_radius, module_size, color);
        surface.fill_circle(center, dot_radius, color);
    }
}
