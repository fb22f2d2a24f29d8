//! Scene construction: turn shape descriptions into a traceable root surface.

use crate::{BvhNode, Hittable, HittableList, Material, Sphere, XyRect, XzRect, YzRect};
use lumen_math::Point3;
use rand::RngCore;
use std::sync::Arc;
use thiserror::Error;

/// Time window used when bounding a static scene.
const SHUTTER: (f32, f32) = (0.0, 1.0);

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Cannot build a bounding volume hierarchy over an empty scene")]
    EmptyScene,

    #[error("Surface has no bounding box over time [{time0}, {time1}]")]
    MissingBoundingBox { time0: f32, time1: f32 },
}

/// Geometric description of one scene primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { center: Point3, radius: f32 },
    XyRect { x0: f32, x1: f32, y0: f32, y1: f32, k: f32 },
    XzRect { x0: f32, x1: f32, z0: f32, z1: f32, k: f32 },
    YzRect { y0: f32, y1: f32, z0: f32, z1: f32, k: f32 },
}

impl Shape {
    /// Pair the geometry with a shared material.
    pub fn into_hittable(self, material: Arc<dyn Material>) -> Arc<dyn Hittable> {
        match self {
            Shape::Sphere { center, radius } => Arc::new(Sphere::new(center, radius, material)),
            Shape::XyRect { x0, x1, y0, y1, k } => {
                Arc::new(XyRect::new(x0, x1, y0, y1, k, material))
            }
            Shape::XzRect { x0, x1, z0, z1, k } => {
                Arc::new(XzRect::new(x0, x1, z0, z1, k, material))
            }
            Shape::YzRect { y0, y1, z0, z1, k } => {
                Arc::new(YzRect::new(y0, y1, z0, z1, k, material))
            }
        }
    }
}

/// How the root surface organises its primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acceleration {
    /// Linear scan over every primitive.
    List,
    /// Bounding volume hierarchy.
    #[default]
    Bvh,
}

/// Build the root surface for a scene.
///
/// `rng` only drives BVH split-axis selection.
pub fn build_scene<I>(
    items: I,
    acceleration: Acceleration,
    rng: &mut dyn RngCore,
) -> Result<Arc<dyn Hittable>, SceneError>
where
    I: IntoIterator<Item = (Shape, Arc<dyn Material>)>,
{
    let list: HittableList = items
        .into_iter()
        .map(|(shape, material)| shape.into_hittable(material))
        .collect();

    log::info!(
        "Building scene: {} surfaces, {:?} acceleration",
        list.len(),
        acceleration
    );

    match acceleration {
        Acceleration::List => Ok(Arc::new(list)),
        Acceleration::Bvh => {
            let (time0, time1) = SHUTTER;
            Ok(Arc::new(BvhNode::from_list(&list, time0, time1, rng)?))
        }
    }
}
