use crate::geometry::{Interval, Ray, WorldBox};

pub trait RayIntersectionExt {
    /// Calculate the part of `ray_length` where the ray is inside the box.
    /// Returns None if that part is empty.
    fn intersect(&self, ray: &Ray, ray_length: Interval) -> Option<Interval>;

    fn hit(&self, ray: &Ray, ray_length: Interval) -> bool {
        self.intersect(ray, ray_length).is_some()
    }
}

impl RayIntersectionExt for WorldBox {
    /// Slab test.
    /// Touching the box (entry == exit) counts as a miss, so does a ray lying exactly
    /// in one of the bounding planes while parallel to it.
    fn intersect(&self, ray: &Ray, ray_length: Interval) -> Option<Interval> {
        let mut inside = ray_length;

        for axis in 0..3 {
            // Distances along the ray to the two slab planes of this axis.
            // Parallel rays get +-infinity here, or NaN when the origin is exactly on the plane.
            let to_box_min = (self.min[axis] - ray.origin[axis]) * ray.inv_direction[axis];
            let to_box_max = (self.max[axis] - ray.origin[axis]) * ray.inv_direction[axis];

            if to_box_min.is_nan() || to_box_max.is_nan() {
                return None;
            }

            let (near, far) = if to_box_min <= to_box_max {
                (to_box_min, to_box_max)
            } else {
                (to_box_max, to_box_min)
            };

            inside = Interval::new(inside.min.max(near), inside.max.min(far));

            if inside.is_empty() {
                return None;
            }
        }

        Some(inside)
    }
}
