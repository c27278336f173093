use crate::geometry::{FloatType, HitRecord, Interval, Ray, WorldBox, WorldPoint, WorldVector};

use super::Hittable;

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: WorldPoint,
    pub radius: FloatType,
    pub material: usize,
    pub light: bool,
}

impl Sphere {
    pub fn new(center: WorldPoint, radius: FloatType) -> Sphere {
        Sphere {
            center,
            radius,
            material: 0,
            light: false,
        }
    }

    pub fn with_material(self, material: usize) -> Sphere {
        Sphere { material, ..self }
    }

    pub fn as_light(self) -> Sphere {
        Sphere {
            light: true,
            ..self
        }
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray, ray_length: Interval) -> Option<HitRecord> {
        let oc = ray.origin - self.center;
        let a = ray.direction.norm_squared();
        let half_b = oc.dot(&ray.direction);
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;

        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-half_b - sqrt_disc) / a;
        let t2 = (-half_b + sqrt_disc) / a;
        let t = if ray_length.contains(t1) {
            t1
        } else if ray_length.contains(t2) {
            t2
        } else {
            return None;
        };

        let point = ray.point_at(t);
        let normal = (point - self.center) / self.radius;

        Some(HitRecord {
            t,
            point,
            normal,
            material: self.material,
        })
    }

    fn get_bounding_box(&self) -> WorldBox {
        let r_vec = WorldVector::repeat(self.radius);
        WorldBox {
            min: self.center - r_vec,
            max: self.center + r_vec,
        }
    }

    fn center(&self) -> WorldPoint {
        self.center
    }

    fn is_light(&self) -> bool {
        self.light
    }
}
