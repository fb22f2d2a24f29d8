//! Procedural textures sampled by materials.

use crate::Color;
use lumen_math::Point3;
use std::sync::Arc;

/// A color that varies over a surface.
pub trait Texture: Send + Sync {
    /// Evaluate at surface coordinates `(u, v)` and world point `p`.
    fn value(&self, u: f32, v: f32, p: Point3) -> Color;
}

/// A constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn from_rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Point3) -> Color {
        self.color
    }
}

/// 3-D checker pattern alternating between two textures.
///
/// The sign of `sin(fx) * sin(fy) * sin(fz)` picks the cell, so the pattern
/// is solid through space rather than painted on in uv.
pub struct CheckerTexture {
    frequency: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(frequency: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            frequency,
            even,
            odd,
        }
    }

    pub fn from_colors(frequency: f32, even: Color, odd: Color) -> Self {
        Self::new(
            frequency,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color {
        let f = self.frequency;
        let sines = (f * p.x).sin() * (f * p.y).sin() * (f * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}
