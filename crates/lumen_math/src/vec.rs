//! Vector helpers the shading code needs on top of `glam::Vec3`.

use glam::Vec3;

/// Positions share the vector type; the alias only documents intent.
pub type Point3 = Vec3;

/// Components below this magnitude count as zero for scatter directions.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Extra operations used by materials.
///
/// Reflection and refraction come from `glam::Vec3` itself.
pub trait Vec3Ext {
    /// True if every component is below [`NEAR_ZERO_EPSILON`] in magnitude.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }
}
