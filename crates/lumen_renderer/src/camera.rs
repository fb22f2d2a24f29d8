//! Pinhole camera for ray generation.

use lumen_math::{Point3, Ray, Vec3};

/// Pinhole camera with a vertical field of view and fixed focal length 1.
///
/// Immutable once built; `get_ray` takes `&self`, so one camera can be
/// shared across render threads.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Camera at the world origin looking down -Z with +Y up.
    ///
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect_ratio`: image width / height
    pub fn new(vfov: f32, aspect_ratio: f32) -> Self {
        Self::looking_at(
            Point3::ZERO,
            Point3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            vfov,
            aspect_ratio,
        )
    }

    /// Camera placed at `look_from`, aimed at `look_at`, rolled so `vup`
    /// projects to image-up.
    pub fn looking_at(
        look_from: Point3,
        look_at: Point3,
        vup: Vec3,
        vfov: f32,
        aspect_ratio: f32,
    ) -> Self {
        let theta = vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = aspect_ratio * viewport_height;

        // Orthonormal camera basis
        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner = look_from - horizontal / 2.0 - vertical / 2.0 - w;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Ray through normalized image-plane coordinates `(u, v)`.
    ///
    /// `(0, 0)` is the lower-left corner, `(1, 1)` the upper-right.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        Ray::new_simple(
            self.origin,
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(90.0, 16.0 / 9.0)
    }
}
