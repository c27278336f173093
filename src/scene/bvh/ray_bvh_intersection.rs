use crate::{
    geometry::{HitRecord, Interval, Ray, RayIntersectionExt as _, WorldBox, WorldPoint},
    scene::Hittable,
};

use super::{Bvh, NodeIdx, NodeLink};

impl<H: Hittable> Hittable for Bvh<H> {
    fn intersect(&self, ray: &Ray, ray_length: Interval) -> Option<HitRecord> {
        self.intersect_node(NodeIdx::root(), ray, ray_length)
    }

    fn get_bounding_box(&self) -> WorldBox {
        *self.root_bounding_box()
    }

    fn center(&self) -> WorldPoint {
        self.root_bounding_box().center()
    }

    /// Lights are sampled from the flat object list, never through the hierarchy.
    fn is_light(&self) -> bool {
        false
    }
}

impl<H: Hittable> Bvh<H> {
    fn intersect_node(&self, index: NodeIdx, ray: &Ray, ray_length: Interval) -> Option<HitRecord> {
        let node = &self.nodes[index];
        if !node.bounding_box.hit(ray, ray_length) {
            return None;
        }

        let left = self.intersect_link(node.left, ray, ray_length);

        // The right subtree is only interested in hits closer than what the left one found
        let ray_length = match &left {
            Some(hit) => ray_length.with_max(hit.t),
            None => ray_length,
        };

        let right = self.intersect_link(node.right, ray, ray_length);

        right.or(left)
    }

    fn intersect_link(&self, link: NodeLink, ray: &Ray, ray_length: Interval) -> Option<HitRecord> {
        match link {
            NodeLink::Inner(index) => self.intersect_node(index, ray, ray_length),
            NodeLink::Leaf(index) => self.primitives[index].intersect(ray, ray_length),
        }
    }
}
