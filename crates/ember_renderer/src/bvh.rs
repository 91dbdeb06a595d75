//! Bounding volume hierarchy over hittable objects.

use crate::hittable::{HitRecord, Hittable, HittableList};
use ember_math::{Aabb, Interval, Ray};
use rand::{Rng, RngCore};
use std::cmp::Ordering;
use std::sync::Arc;

/// Binary BVH node. Interior nodes store the merged box of their subtree so
/// traversal can reject a whole subtree with one slab test.
pub enum BvhNode {
    Empty,
    Leaf {
        object: Arc<dyn Hittable>,
        bbox: Aabb,
    },
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
}

impl BvhNode {
    /// Build a hierarchy over `objects` by recursive median split.
    ///
    /// At each level a random axis is chosen, the objects are sorted by their
    /// box's minimum corner on that axis, and the list is halved.
    pub fn build(mut objects: Vec<Arc<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        match objects.len() {
            0 => BvhNode::Empty,
            1 => Self::leaf(objects.remove(0)),
            2 => {
                let axis = rng.gen_range(0..3);
                Self::sort_by_axis(&mut objects, axis);
                let right = objects.swap_remove(1);
                let left = objects.swap_remove(0);
                Self::branch(Self::leaf(left), Self::leaf(right))
            }
            _ => {
                let axis = rng.gen_range(0..3);
                Self::sort_by_axis(&mut objects, axis);
                let right_half = objects.split_off(objects.len() / 2);
                Self::branch(Self::build(objects, rng), Self::build(right_half, rng))
            }
        }
    }

    /// Consume a list and build a hierarchy over its objects.
    pub fn from_list(list: HittableList, rng: &mut dyn RngCore) -> Self {
        Self::build(list.into_objects(), rng)
    }

    fn leaf(object: Arc<dyn Hittable>) -> Self {
        let bbox = object.bounding_box();
        BvhNode::Leaf { object, bbox }
    }

    fn branch(left: BvhNode, right: BvhNode) -> Self {
        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    fn sort_by_axis(objects: &mut [Arc<dyn Hittable>], axis: usize) {
        objects.sort_by(|a, b| {
            let a_min = a.bounding_box().axis_interval(axis).min;
            let b_min = b.bounding_box().axis_interval(axis).min;
            a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
        });
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        match self {
            BvhNode::Empty => false,
            BvhNode::Leaf { object, bbox } => {
                bbox.hit(ray, ray_t) && object.hit(ray, ray_t, rng, rec)
            }
            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }
                let hit_left = left.hit(ray, ray_t, rng, rec);
                // A left hit tightens the window for the right subtree
                let right_t = if hit_left {
                    Interval::new(ray_t.min, rec.t)
                } else {
                    ray_t
                };
                let hit_right = right.hit(ray, right_t, rng, rec);
                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
