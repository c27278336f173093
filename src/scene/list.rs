use crate::geometry::{HitRecord, Interval, Ray, WorldBox, WorldPoint};

use super::{Bvh, BvhError, Hittable};

/// Flat collection of objects, intersected by testing every member.
#[derive(Clone, Debug)]
pub struct HittableList<H> {
    objects: Vec<H>,
}

impl<H: Hittable> HittableList<H> {
    pub fn new() -> Self {
        HittableList {
            objects: Vec::new(),
        }
    }

    pub fn push(&mut self, object: H) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.objects.iter()
    }

    /// Members that act as light sources.
    pub fn lights(&self) -> impl Iterator<Item = &H> {
        self.objects.iter().filter(|o| o.is_light())
    }

    pub fn into_bvh(self) -> Result<Bvh<H>, BvhError> {
        Bvh::build(self.objects)
    }
}

impl<H: Hittable> Default for HittableList<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> From<Vec<H>> for HittableList<H> {
    fn from(objects: Vec<H>) -> Self {
        HittableList { objects }
    }
}

impl<H> FromIterator<H> for HittableList<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        HittableList {
            objects: iter.into_iter().collect(),
        }
    }
}

impl<H: Hittable> Hittable for HittableList<H> {
    fn intersect(&self, ray: &Ray, ray_length: Interval) -> Option<HitRecord> {
        let mut ray_length = ray_length;
        let mut best = None;

        for object in &self.objects {
            if let Some(hit) = object.intersect(ray, ray_length) {
                ray_length = ray_length.with_max(hit.t);
                best = Some(hit);
            }
        }

        best
    }

    /// Union of the members' boxes, empty box at the origin for an empty list.
    fn get_bounding_box(&self) -> WorldBox {
        WorldBox::union_all(self.objects.iter().map(Hittable::get_bounding_box))
            .unwrap_or_else(|| WorldBox::new(WorldPoint::origin(), WorldPoint::origin()))
    }
}
