use bon::bon;
use rand::{Rng as _, SeedableRng as _, rngs::SmallRng};
use rand_distr::{Distribution as _, UnitSphere};

use crate::geometry::{FloatType, Ray, WorldPoint, WorldVector};

use super::primitives::Sphere;

/// Reproducible random scene of spheres scattered in a cube around the origin.
#[derive(Clone, Debug)]
pub struct RandomSpheres {
    count: usize,
    seed: u64,
    /// Half of the edge length of the cube containing the sphere centers
    extent: FloatType,
    min_radius: FloatType,
    max_radius: FloatType,
    /// Every n-th sphere is marked as a light, none if zero
    light_every: usize,
    material_count: usize,
}

#[bon]
impl RandomSpheres {
    #[builder]
    pub fn new(
        count: usize,
        #[builder(default)] seed: u64,
        #[builder(default = 100.0)] extent: FloatType,
        #[builder(default = 0.1)] min_radius: FloatType,
        #[builder(default = 2.0)] max_radius: FloatType,
        #[builder(default)] light_every: usize,
        #[builder(default = 1)] material_count: usize,
    ) -> Self {
        assert!(extent > 0.0);
        assert!(min_radius > 0.0);
        assert!(max_radius >= min_radius);
        assert!(material_count > 0);

        RandomSpheres {
            count,
            seed,
            extent,
            min_radius,
            max_radius,
            light_every,
            material_count,
        }
    }

    pub fn spheres(&self) -> Vec<Sphere> {
        let mut rng = SmallRng::seed_from_u64(self.seed);

        (0..self.count)
            .map(|i| {
                let center = self.random_point(&mut rng, self.extent);
                let radius = rng.random_range(self.min_radius..=self.max_radius);
                let sphere = Sphere::new(center, radius).with_material(i % self.material_count);

                if self.light_every > 0 && i % self.light_every == 0 {
                    sphere.as_light()
                } else {
                    sphere
                }
            })
            .collect()
    }

    /// Rays starting anywhere in a cube slightly larger than the scene, with unit directions.
    /// Uses a separate random stream from `spheres()`.
    pub fn rays(&self, count: usize) -> Vec<Ray> {
        let mut rng = SmallRng::seed_from_u64(self.seed.wrapping_add(1));

        (0..count)
            .map(|_| {
                let origin = self.random_point(&mut rng, self.extent * 1.5);
                let direction: [FloatType; 3] = UnitSphere.sample(&mut rng);
                Ray::new(origin, WorldVector::from(direction))
            })
            .collect()
    }

    fn random_point(&self, rng: &mut SmallRng, extent: FloatType) -> WorldPoint {
        WorldPoint::new(
            rng.random_range(-extent..=extent),
            rng.random_range(-extent..=extent),
            rng.random_range(-extent..=extent),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        geometry::{Interval, WorldBox},
        scene::{Bvh, Hittable as _},
    };

    use assert2::{assert, let_assert};
    use test_strategy::proptest;

    #[test]
    fn same_seed_same_scene() {
        let a = RandomSpheres::builder().count(50).seed(7).build();
        let b = RandomSpheres::builder().count(50).seed(7).build();
        let c = RandomSpheres::builder().count(50).seed(8).build();

        assert!(a.spheres() == b.spheres());
        assert!(a.spheres() != c.spheres());
        assert!(a.rays(10).iter().map(|r| r.origin).eq(b.rays(10).iter().map(|r| r.origin)));
    }

    #[test]
    fn lights_and_materials() {
        let spheres = RandomSpheres::builder()
            .count(30)
            .light_every(10)
            .material_count(4)
            .build()
            .spheres();

        assert!(spheres.len() == 30);
        assert!(spheres.iter().filter(|s| s.is_light()).count() == 3);
        assert!(spheres.iter().all(|s| s.material < 4));
    }

    #[proptest]
    fn spheres_stay_inside_the_extent(
        #[strategy(1usize..200)] count: usize,
        seed: u64,
        #[strategy(1.0..1000.0f64)] extent: FloatType,
    ) {
        let generator = RandomSpheres::builder()
            .count(count)
            .seed(seed)
            .extent(extent)
            .build();
        let limit = WorldBox::new(
            WorldPoint::new(-extent, -extent, -extent),
            WorldPoint::new(extent, extent, extent),
        );

        let spheres = generator.spheres();
        assert!(spheres.len() == count);
        for sphere in &spheres {
            assert!(limit.contains_box(&WorldBox::new(sphere.center, sphere.center)));
            assert!(sphere.radius >= 0.1);
            assert!(sphere.radius <= 2.0);
        }

        for ray in generator.rays(20) {
            assert!((ray.direction.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn random_scene_builds() {
        let generator = RandomSpheres::builder().count(500).seed(3).build();
        let_assert!(Ok(bvh) = Bvh::build(generator.spheres()));
        bvh.check_invariants();

        let hits = generator
            .rays(200)
            .iter()
            .filter(|ray| bvh.intersect(ray, Interval::starting_at(0.0)).is_some())
            .count();
        assert!(hits > 0);
    }
}
