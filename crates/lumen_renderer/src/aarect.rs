//! Axis-aligned rectangle primitives.
//!
//! Each rectangle lies in a plane where one axis is fixed at `k`, and spans
//! a closed range along the other two axes.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use lumen_math::{Aabb, Interval, Ray, Vec3};
use std::sync::Arc;

/// Half-thickness added along the fixed axis so the slab test never sees a
/// zero-width box.
pub const RECT_PADDING: f32 = 1e-4;

/// Intersect the plane `axis[fixed] = k`, then clip to the two spans.
///
/// `free` holds the two in-plane axes in (u, v) order.
fn hit_axis_rect<'a>(
    ray: &Ray,
    ray_t: Interval,
    k: f32,
    fixed: usize,
    free: [(usize, Interval); 2],
    material: &'a dyn Material,
) -> Option<HitRecord<'a>> {
    let t = (k - ray.origin[fixed]) / ray.direction[fixed];
    if !ray_t.surrounds(t) {
        return None;
    }

    let mut uv = [0.0; 2];
    for (slot, (axis, span)) in free.iter().enumerate() {
        let coord = ray.origin[*axis] + t * ray.direction[*axis];
        if !span.contains(coord) {
            return None;
        }
        uv[slot] = (coord - span.min) / span.size();
    }

    let mut outward_normal = Vec3::ZERO;
    outward_normal[fixed] = 1.0;

    Some(HitRecord::new(ray, t, outward_normal, (uv[0], uv[1]), material))
}

fn padded(k: f32) -> Interval {
    Interval::new(k, k).expand(2.0 * RECT_PADDING)
}

/// Rectangle in the plane `z = k`.
pub struct XyRect {
    x: Interval,
    y: Interval,
    k: f32,
    material: Arc<dyn Material>,
}

impl XyRect {
    pub fn new(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self {
            x: Interval::new(x0, x1),
            y: Interval::new(y0, y1),
            k,
            material,
        }
    }
}

impl Hittable for XyRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_axis_rect(
            ray,
            ray_t,
            self.k,
            2,
            [(0, self.x), (1, self.y)],
            self.material.as_ref(),
        )
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(Aabb::new(self.x, self.y, padded(self.k)))
    }
}

/// Rectangle in the plane `y = k`.
pub struct XzRect {
    x: Interval,
    z: Interval,
    k: f32,
    material: Arc<dyn Material>,
}

impl XzRect {
    pub fn new(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self {
            x: Interval::new(x0, x1),
            z: Interval::new(z0, z1),
            k,
            material,
        }
    }
}

impl Hittable for XzRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_axis_rect(
            ray,
            ray_t,
            self.k,
            1,
            [(0, self.x), (2, self.z)],
            self.material.as_ref(),
        )
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(Aabb::new(self.x, padded(self.k), self.z))
    }
}

/// Rectangle in the plane `x = k`.
pub struct YzRect {
    y: Interval,
    z: Interval,
    k: f32,
    material: Arc<dyn Material>,
}

impl YzRect {
    pub fn new(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self {
            y: Interval::new(y0, y1),
            z: Interval::new(z0, z1),
            k,
            material,
        }
    }
}

impl Hittable for YzRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_axis_rect(
            ray,
            ray_t,
            self.k,
            0,
            [(1, self.y), (2, self.z)],
            self.material.as_ref(),
        )
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(Aabb::new(padded(self.k), self.y, self.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    fn window() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_xy_rect_hit_and_uv() {
        let rect = XyRect::new(-1.0, 1.0, -1.0, 1.0, -2.0, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.25, -0.25, -1.0));

        let rec = rect.hit(&ray, window()).expect("ray should hit");
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((rec.u - 0.75).abs() < 1e-5);
        assert!((rec.v - 0.25).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::Z);
        assert!(rec.front_face);
    }

    #[test]
    fn test_xy_rect_back_face() {
        let rect = XyRect::new(-1.0, 1.0, -1.0, 1.0, -2.0, grey());
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let rec = rect.hit(&ray, window()).expect("ray should hit");
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
    }

    #[test]
    fn test_xy_rect_miss_outside_bounds() {
        let rect = XyRect::new(-1.0, 1.0, -1.0, 1.0, -2.0, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(1.0, 0.0, -1.0));
        assert!(rect.hit(&ray, window()).is_none());
    }

    #[test]
    fn test_rect_parallel_ray_misses() {
        let rect = XzRect::new(-1.0, 1.0, -1.0, 1.0, 0.0, grey());
        let ray = Ray::new_simple(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(rect.hit(&ray, window()).is_none());
    }

    #[test]
    fn test_xz_rect_hit_from_below() {
        let rect = XzRect::new(-1.0, 1.0, -3.0, -1.0, 2.0, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 1.0, -1.0));

        let rec = rect.hit(&ray, window()).expect("ray should hit");
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert_eq!(rec.normal, -Vec3::Y);
        assert!((rec.u - 0.5).abs() < 1e-5);
        assert!((rec.v - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_yz_rect_hit() {
        let rect = YzRect::new(0.0, 2.0, -2.0, 0.0, 3.0, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(1.0, 0.5, -0.5));

        let rec = rect.hit(&ray, window()).expect("ray should hit");
        assert!((rec.t - 3.0).abs() < 1e-5);
        assert_eq!(rec.normal, -Vec3::X);
        assert!((rec.p - Vec3::new(3.0, 1.5, -1.5)).length() < 1e-5);
    }

    #[test]
    fn test_rect_respects_window() {
        let rect = XyRect::new(-1.0, 1.0, -1.0, 1.0, -2.0, grey());
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        assert!(rect.hit(&ray, Interval::new(0.001, 1.5)).is_none());
    }

    #[test]
    fn test_rect_bounding_boxes_are_padded() {
        let xy = XyRect::new(0.0, 1.0, 2.0, 3.0, 5.0, grey())
            .bounding_box(0.0, 1.0)
            .expect("bounded");
        assert_eq!(xy.z, Interval::new(5.0 - RECT_PADDING, 5.0 + RECT_PADDING));
        assert_eq!(xy.x, Interval::new(0.0, 1.0));

        let xz = XzRect::new(0.0, 1.0, 2.0, 3.0, 5.0, grey())
            .bounding_box(0.0, 1.0)
            .expect("bounded");
        assert!(xz.y.size() > 0.0);
        assert_eq!(xz.z, Interval::new(2.0, 3.0));

        let yz = YzRect::new(0.0, 1.0, 2.0, 3.0, 5.0, grey())
            .bounding_box(0.0, 1.0)
            .expect("bounded");
        assert!(yz.x.size() > 0.0);
        assert_eq!(yz.y, Interval::new(0.0, 1.0));
    }
}
