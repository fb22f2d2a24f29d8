//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard depth cutoff
//! - Gamma correction
//! - Anti-aliasing via jittered multi-sampling

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::random::gen_f32;
use crate::{Camera, Color, Hittable, Ray};
use lumen_math::Interval;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Lower bound of the hit window; keeps scattered rays from re-hitting
/// their own origin (shadow acne).
pub const HIT_EPSILON: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub image_width: u32,
    /// Output image height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Tile edge length for bucket rendering
    pub bucket_size: u32,
    /// Base seed for every random stream used while rendering
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            bucket_size: 64,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Image width / height.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height.max(1) as f32
    }

    /// Clamp values that would make rendering meaningless, logging each fix.
    pub fn normalized(mut self) -> Self {
        if self.image_width == 0 || self.image_height == 0 {
            log::warn!(
                "Image size {}x{} is empty, using 1x1",
                self.image_width,
                self.image_height
            );
            self.image_width = self.image_width.max(1);
            self.image_height = self.image_height.max(1);
        }
        if self.samples_per_pixel == 0 {
            log::warn!("samples_per_pixel is 0, using 1");
            self.samples_per_pixel = 1;
        }
        if self.bucket_size == 0 {
            log::warn!("bucket_size is 0, using 64");
            self.bucket_size = 64;
        }
        self
    }
}

/// Compute the color seen along a ray.
///
/// Traces `ray` into `world`, lets the hit material emit and scatter, and
/// recurses on the scattered ray until `depth` runs out.
pub fn ray_color(
    ray: &Ray,
    background: Color,
    world: &dyn Hittable,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // Bounce budget exhausted: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(HIT_EPSILON, f32::INFINITY)) else {
        return background;
    };

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            emitted
                + result.attenuation
                    * ray_color(&result.scattered, background, world, depth - 1, rng)
        }
        None => emitted,
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` is in image space with row 0 at the top; the camera's `v` runs
/// bottom to top.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let u_span = config.image_width.saturating_sub(1).max(1) as f32;
    let v_span = config.image_height.saturating_sub(1).max(1) as f32;
    let row_from_bottom = config.image_height.saturating_sub(1).saturating_sub(y) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        let u = (x as f32 + gen_f32(rng)) / u_span;
        let v = (row_from_bottom + gen_f32(rng)) / v_span;
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, config.background, world, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Linear-color image, row-major with the top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Offset of (x, y) in `pixels`.
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered tile into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Gamma-corrected 8-bit RGB triples in storage order.
    pub fn to_rgb(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().copied().map(color_to_rgb).collect()
    }
}

/// Render the entire scene to an image buffer on the calling thread.
///
/// Produces exactly the same pixels as [`crate::render_parallel`] for the
/// same config, since both seed each tile identically.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let config = config.clone().normalized();
    let start = Instant::now();
    let mut image = ImageBuffer::new(config.image_width, config.image_height);

    for bucket in generate_buckets(config.image_width, config.image_height, config.bucket_size) {
        let result = render_bucket(&bucket, camera, world, &config);
        image.write_bucket(&result);
    }

    log::info!(
        "Rendered {}x{} @ {} spp in {:?}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        start.elapsed()
    );
    image
}
