//! CPU-side drawing surface.
//!
//! The particle engine only ever talks to [`Surface`]. [`Canvas`] is the
//! concrete raster, a `tiny_skia::Pixmap` that gets uploaded to the GPU once
//! per frame. Coordinates are in pixels with the origin at the top-left, y down.

use bevy::color::{ColorToPacked, Srgba};
use bevy::math::{UVec2, Vec2};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

/// Minimal 2D drawing API needed by the particle clock
pub trait Surface {
    fn size(&self) -> UVec2;

    /// Blend `color` at `alpha` over the whole surface
    fn fade(&mut self, color: Srgba, alpha: f32);

    /// Filled circle blended at `alpha`
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Srgba, alpha: f32);
}

/// Opaque RGBA8 frame buffer.
///
/// Everything drawn keeps alpha at 255, so the premultiplied bytes tiny-skia
/// stores are also valid straight-alpha texture data.
pub struct Canvas {
    pixmap: Pixmap,
}

fn black_pixmap(size: UVec2) -> Result<Pixmap, String> {
    let mut pixmap = Pixmap::new(size.x, size.y)
        .ok_or_else(|| format!("Failed to allocate a {}x{} canvas", size.x, size.y))?;
    pixmap.fill(Color::BLACK);
    Ok(pixmap)
}

impl Canvas {
    pub fn new(size: UVec2) -> Result<Self, String> {
        Ok(Self {
            pixmap: black_pixmap(size)?,
        })
    }

    /// Reallocate to `size` and clear to opaque black. Keeps the old buffer on error.
    pub fn resize(&mut self, size: UVec2) -> Result<(), String> {
        self.pixmap = black_pixmap(size)?;
        Ok(())
    }

    pub fn bytes(&self) -> &[u8] {
        self.pixmap.data()
    }
}

fn paint(color: Srgba, alpha: f32) -> Paint<'static> {
    let [r, g, b, _] = color.to_u8_array();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, (alpha * 255.0).round() as u8);
    paint.anti_alias = true;
    paint
}

impl Surface for Canvas {
    fn size(&self) -> UVec2 {
        UVec2::new(self.pixmap.width(), self.pixmap.height())
    }

    fn fade(&mut self, color: Srgba, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        let size = self.size();
        if let Some(rect) = Rect::from_xywh(0.0, 0.0, size.x as f32, size.y as f32) {
            self.pixmap
                .fill_rect(rect, &paint(color, alpha), Transform::identity(), None);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Srgba, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        // None for a non-positive radius
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color, alpha),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}
