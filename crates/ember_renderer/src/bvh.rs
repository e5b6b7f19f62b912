//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree of bounding boxes over the scene's primitives, built once
//! for a shutter interval.

use crate::{HitRecord, Hittable, HittableList};
use ember_math::{Aabb, Interval, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with primitives.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf {
        objects: Vec<Box<dyn Hittable>>,
        bbox: Aabb,
    },
    /// Empty scene.
    Empty,
}

impl BvhNode {
    /// Build a BVH over `objects` with boxes for the shutter `[time0, time1]`.
    pub fn new(objects: Vec<Box<dyn Hittable>>, time0: f32, time1: f32) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }

        let count = objects.len();
        let node = Self::build(objects, time0, time1);
        log::debug!("Built BVH over {} primitives (depth {})", count, node.depth());
        node
    }

    /// Build a BVH from everything in a [`HittableList`].
    pub fn from_list(list: HittableList, time0: f32, time1: f32) -> Self {
        Self::new(list.into_objects(), time0, time1)
    }

    /// Median split on the longest centroid axis.
    fn build(mut objects: Vec<Box<dyn Hittable>>, time0: f32, time1: f32) -> Self {
        let boxes: Vec<Aabb> = objects
            .iter()
            .map(|o| o.bounding_box(time0, time1))
            .collect();
        let bbox = boxes
            .iter()
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, b));

        if objects.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf { objects, bbox };
        }

        let centroid_bounds = boxes.iter().fold(Aabb::EMPTY, |acc, b| {
            let c = b.centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        // Sort objects together with their cached boxes
        let mut keyed: Vec<(f32, Box<dyn Hittable>)> = boxes
            .iter()
            .map(|b| b.centroid().to_array()[axis])
            .zip(objects.drain(..))
            .collect();
        keyed.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        let mut sorted: Vec<Box<dyn Hittable>> = keyed.into_iter().map(|(_, o)| o).collect();
        let right_objects = sorted.split_off(sorted.len() / 2);

        BvhNode::Branch {
            left: Box::new(Self::build(sorted, time0, time1)),
            right: Box::new(Self::build(right_objects, time0, time1)),
            bbox,
        }
    }

    fn depth(&self) -> usize {
        match self {
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
            _ => 1,
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let mut closest = None;
                let mut closest_so_far = ray_t.max;
                for obj in objects {
                    if let Some(rec) = obj.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                        closest_so_far = rec.t;
                        closest = Some(rec);
                    }
                }
                closest
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let hit_left = left.hit(ray, ray_t);

                // Only check right up to closest hit
                let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max));

                hit_right.or(hit_left)
            }
        }
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
