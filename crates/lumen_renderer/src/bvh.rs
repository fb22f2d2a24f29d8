//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree of bounding boxes over shared surfaces. Each node picks a
//! random axis, sorts its span by box minimum on that axis and splits at the
//! median. The axis comes from the caller's RNG, so a seeded RNG builds the
//! same tree every time.

use crate::{HitRecord, Hittable, HittableList, SceneError};
use lumen_math::{Aabb, Interval, Ray};
use rand::{Rng, RngCore};
use std::cmp::Ordering;
use std::sync::Arc;

/// One side of a BVH node.
enum BvhChild {
    /// A scene surface, shared with whoever else holds it.
    Leaf(Arc<dyn Hittable>),
    /// A nested subtree.
    Node(Box<BvhNode>),
}

impl BvhChild {
    #[inline]
    fn as_hittable(&self) -> &dyn Hittable {
        match self {
            BvhChild::Leaf(object) => object.as_ref(),
            BvhChild::Node(node) => node.as_ref(),
        }
    }
}

/// BVH node. Both children are always present; a span of one surface makes
/// both sides alias the same leaf.
pub struct BvhNode {
    left: BvhChild,
    right: BvhChild,
    bbox: Aabb,
}

impl BvhNode {
    /// Build a BVH over `objects` for the time window `[time0, time1]`.
    ///
    /// Fails on an empty slice, or if any surface cannot be bounded.
    pub fn new(
        objects: &[Arc<dyn Hittable>],
        time0: f32,
        time1: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Self, SceneError> {
        if objects.is_empty() {
            return Err(SceneError::EmptyScene);
        }

        let node = Self::build(objects.to_vec(), time0, time1, rng)?;
        log::info!(
            "Built BVH over {} surfaces (depth {})",
            objects.len(),
            node.depth()
        );
        Ok(node)
    }

    /// Build a BVH over the children of a list.
    pub fn from_list(
        list: &HittableList,
        time0: f32,
        time1: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Self, SceneError> {
        Self::new(list.objects(), time0, time1, rng)
    }

    /// Recursive median-split construction.
    fn build(
        objects: Vec<Arc<dyn Hittable>>,
        time0: f32,
        time1: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Self, SceneError> {
        let axis = rng.gen_range(0..3);

        // Sort key is the box minimum on the chosen axis. Computing it once
        // up front also surfaces unbounded children before any recursion.
        let mut keyed = objects
            .into_iter()
            .map(|object| -> Result<(f32, Arc<dyn Hittable>), SceneError> {
                let bbox = object
                    .bounding_box(time0, time1)
                    .ok_or(SceneError::MissingBoundingBox { time0, time1 })?;
                Ok((bbox.axis_interval(axis).min, object))
            })
            .collect::<Result<Vec<_>, _>>()?;

        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        let mut objects: Vec<Arc<dyn Hittable>> =
            keyed.into_iter().map(|(_, object)| object).collect();

        let (left, right) = match objects.len() {
            1 => (
                BvhChild::Leaf(Arc::clone(&objects[0])),
                BvhChild::Leaf(Arc::clone(&objects[0])),
            ),
            2 => (
                BvhChild::Leaf(Arc::clone(&objects[0])),
                BvhChild::Leaf(Arc::clone(&objects[1])),
            ),
            n => {
                let right_objects = objects.split_off(n / 2);
                (
                    BvhChild::Node(Box::new(Self::build(objects, time0, time1, rng)?)),
                    BvhChild::Node(Box::new(Self::build(right_objects, time0, time1, rng)?)),
                )
            }
        };

        let box_left = left
            .as_hittable()
            .bounding_box(time0, time1)
            .ok_or(SceneError::MissingBoundingBox { time0, time1 })?;
        let box_right = right
            .as_hittable()
            .bounding_box(time0, time1)
            .ok_or(SceneError::MissingBoundingBox { time0, time1 })?;

        Ok(Self {
            left,
            right,
            bbox: Aabb::surrounding(&box_left, &box_right),
        })
    }

    /// Number of node levels from this node down to the deepest leaf pair.
    pub fn depth(&self) -> usize {
        let side = |child: &BvhChild| match child {
            BvhChild::Leaf(_) => 0,
            BvhChild::Node(node) => node.depth(),
        };
        1 + side(&self.left).max(side(&self.right))
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let hit_left = self.left.as_hittable().hit(ray, ray_t);

        // Only check right up to closest hit
        let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
        let hit_right = self.right.as_hittable().hit(ray, ray_t.with_max(right_max));

        hit_right.or(hit_left)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(self.bbox)
    }
}
