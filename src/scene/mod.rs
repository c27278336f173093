pub mod bvh;
mod list;
pub mod primitives;
mod random;

use std::sync::Arc;

use crate::geometry::{HitRecord, Interval, Ray, WorldBox, WorldPoint};

pub use bvh::{Bvh, BvhError};
pub use list::HittableList;
pub use random::RandomSpheres;

/// Anything a ray can be tested against: primitives, lists and whole BVHs alike.
pub trait Hittable: Send + Sync {
    /// Nearest hit of the ray with ray length inside `ray_length` (inclusive), if any.
    /// See `Bvh` for the one exception at the ends of the range.
    fn intersect(&self, ray: &Ray, ray_length: Interval) -> Option<HitRecord>;

    fn get_bounding_box(&self) -> WorldBox;

    /// Point used to sort the object spatially when building a BVH.
    fn center(&self) -> WorldPoint {
        self.get_bounding_box().center()
    }

    /// Whether the object should be used as a light sampling target.
    fn is_light(&self) -> bool {
        false
    }
}

impl<T: Hittable + ?Sized> Hittable for Arc<T> {
    fn intersect(&self, ray: &Ray, ray_length: Interval) -> Option<HitRecord> {
        (**self).intersect(ray, ray_length)
    }

    fn get_bounding_box(&self) -> WorldBox {
        (**self).get_bounding_box()
    }

    fn center(&self) -> WorldPoint {
        (**self).center()
    }

    fn is_light(&self) -> bool {
        (**self).is_light()
    }
}

impl<T: Hittable + ?Sized> Hittable for Box<T> {
    fn intersect(&self, ray: &Ray, ray_length: Interval) -> Option<HitRecord> {
        (**self).intersect(ray, ray_length)
    }

    fn get_bounding_box(&self) -> WorldBox {
        (**self).get_bounding_box()
    }

    fn center(&self) -> WorldPoint {
        (**self).center()
    }

    fn is_light(&self) -> bool {
        (**self).is_light()
    }
}

impl<T: Hittable + ?Sized> Hittable for &T {
    fn intersect(&self, ray: &Ray, ray_length: Interval) -> Option<HitRecord> {
        (**self).intersect(ray, ray_length)
    }

    fn get_bounding_box(&self) -> WorldBox {
        (**self).get_bounding_box()
    }

    fn center(&self) -> WorldPoint {
        (**self).center()
    }

    fn is_light(&self) -> bool {
        (**self).is_light()
    }
}
