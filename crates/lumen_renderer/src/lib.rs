//! Lumen renderer - CPU path tracing core.
//!
//! A Monte Carlo path tracer over spheres and axis-aligned rectangles,
//! accelerated by a bounding volume hierarchy.
//!
//! The surrounding driver talks to this crate through two calls:
//! [`build_scene`] to get a traceable root surface, and [`ray_color`] to
//! shade one camera ray against it.

mod aarect;
mod bucket;
mod bvh;
mod camera;
mod hittable;
mod material;
mod output;
mod random;
mod renderer;
mod scene;
mod sphere;
mod texture;

pub use aarect::{XyRect, XzRect, YzRect, RECT_PADDING};
pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    reflectance, Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult,
    AMBIENT_EMISSION,
};
pub use output::{save_ppm, write_ppm, OutputError};
pub use random::{gen_f32, random_in_unit_sphere, random_unit_vector};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer, RenderConfig,
    HIT_EPSILON,
};
pub use scene::{build_scene, Acceleration, SceneError, Shape};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, SolidColor, Texture};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Aabb, Interval, Point3, Ray, Vec3, Vec3Ext};
