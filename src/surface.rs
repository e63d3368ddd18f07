//! Abstract drawing surface and the recording/rasterizing implementation.

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

/// A render target dimension in pixels. The module grid is mapped onto the
/// shortest side; the grid itself is always square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn square(side: f32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    pub fn shortest_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// Minimal capability surface the renderer draws against. Concrete backends
/// implement these three primitives; everything else is engine-side geometry.
pub trait RenderSurface {
    /// Fill the whole surface with one color.
    fn fill_background(&mut self, color: Rgba<u8>);

    /// Fill a solid circle.
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgba<u8>);

    /// Stroke a circle outline. `radius` is the stroke centerline; ink covers
    /// `radius - stroke_width / 2 ..= radius + stroke_width / 2`.
    fn draw_ring(&mut self, center: (f32, f32), radius: f32, stroke_width: f32, color: Rgba<u8>);
}

/// One recorded draw primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Background {
        color: Rgba<u8>,
    },
    Circle {
        center: (f32, f32),
        radius: f32,
        color: Rgba<u8>,
    },
    Ring {
        center: (f32, f32),
        radius: f32,
        stroke_width: f32,
        color: Rgba<u8>,
    },
}

impl DrawCommand {
    /// Color this command deposits at logical point (x, y), if any.
    fn color_at(&self, x: f32, y: f32) -> Option<Rgba<u8>> {
        match *self {
            DrawCommand::Background { color } => Some(color),
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                let (dx, dy) = (x - center.0, y - center.1);
                (dx * dx + dy * dy <= radius * radius).then_some(color)
            }
            DrawCommand::Ring {
                center,
                radius,
                stroke_width,
                color,
            } => {
                let (dx, dy) = (x - center.0, y - center.1);
                let dist = (dx * dx + dy * dy).sqrt();
                ((dist - radius).abs() <= stroke_width / 2.0).then_some(color)
            }
        }
    }
}

/// A resolution-independent recording of a draw sequence. Acts as a
/// `RenderSurface` while recording, and can later be replayed onto another
/// surface or rasterized at any pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct Picture {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl Picture {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Logical size the commands were recorded against.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Re-issue the recorded sequence onto another surface.
    pub fn replay(&self, surface: &mut dyn RenderSurface) {
        for cmd in &self.commands {
            match *cmd {
                DrawCommand::Background { color } => surface.fill_background(color),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => surface.fill_circle(center, radius, color),
                DrawCommand::Ring {
                    center,
                    radius,
                    stroke_width,
                    color,
                } => surface.draw_ring(center, radius, stroke_width, color),
            }
        }
    }

    /// Rasterize at the given pixel dimensions.
    ///
    /// Each pixel is sampled at its center and takes the color of the last
    /// command covering it, so per-pixel evaluation is equivalent to a
    /// sequential replay: the drawing model has no order-dependent blending.
    /// Pixels covered by no command stay fully transparent.
    pub fn rasterize(&self, width: u32, height: u32) -> RgbaImage {
        let sx = if self.size.width > 0.0 {
            width as f32 / self.size.width
        } else {
            1.0
        };
        let sy = if self.size.height > 0.0 {
            height as f32 / self.size.height
        } else {
            1.0
        };

        let pixels: Vec<u8> = (0..(width as usize) * (height as usize))
            .into_par_iter()
            .flat_map_iter(|i| {
                let px = (i % width as usize) as f32;
                let py = (i / width as usize) as f32;
                let lx = (px + 0.5) / sx;
                let ly = (py + 0.5) / sy;

                let mut color = Rgba([0u8, 0, 0, 0]);
                for cmd in &self.commands {
                    if let Some(c) = cmd.color_at(lx, ly) {
                        color = c;
                    }
                }
                color.0
            })
            .collect();

        RgbaImage::from_raw(width, height, pixels)
            .unwrap_or_else(|| RgbaImage::new(width, height))
    }
}

impl RenderSurface for Picture {
    fn fill_background(&mut self, color: Rgba<u8>) {
        self.commands.push(DrawCommand::Background { color });
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgba<u8>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_ring(&mut self, center: (f32, f32), radius: f32, stroke_width: f32, color: Rgba<u8>) {
        self.commands.push(DrawCommand::Ring {
            center,
            radius,
            stroke_width,
            color,
        });
    }
}
