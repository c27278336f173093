mod aabb;
mod interval;
mod ray_box_intersection;

pub use aabb::AABB;
pub use interval::Interval;
pub use ray_box_intersection::RayIntersectionExt;

pub type FloatType = f64;

pub type WorldPoint = nalgebra::Point3<FloatType>;
pub type WorldVector = nalgebra::Vector3<FloatType>;
pub type WorldBox = AABB<WorldPoint>;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Direction of the ray, not necessarily normalized.
    /// Ray lengths are measured in multiples of this vector.
    pub direction: WorldVector,

    /// Componentwise inverse of the ray direction
    /// Zeros in direction get turned into positive infinity regardless of the sign of the zero
    pub inv_direction: WorldVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        let inv_direction = direction.map(|x| {
            if x == 0.0 {
                FloatType::INFINITY
            } else {
                1.0 / x
            }
        });

        Ray {
            origin,
            direction,
            inv_direction,
        }
    }

    pub fn point_at(&self, t: FloatType) -> WorldPoint {
        self.origin + self.direction * t
    }
}

/// Result of a successful ray intersection.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRecord {
    /// Ray length of the hit, in multiples of the ray direction.
    pub t: FloatType,
    pub point: WorldPoint,
    /// Outward facing surface normal
    pub normal: WorldVector,
    /// Opaque material handle, interpreted by the shading code.
    pub material: usize,
}

#[cfg(test)]
pub mod test {
    use super::*;
    use assert2::assert;
    use proptest::prelude::*;
    use test_case::test_case;

    /// Helper macro that creates a wrapper arnound a type that implemetns Deref and Arbitary
    macro_rules! arbitrary_wrapper {
        ( $wrapper_name:ident ( $type:ty ) -> $block:block ) => {
            #[derive(Copy, Clone, Debug)]
            pub struct $wrapper_name(pub $type);

            impl std::ops::Deref for $wrapper_name {
                type Target = $type;
                fn deref(&self) -> &$type {
                    &self.0
                }
            }

            impl Arbitrary for $wrapper_name {
                type Parameters = ();
                type Strategy = proptest::strategy::BoxedStrategy<Self>;
                fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
                    $block.prop_map(|x| $wrapper_name(x)).boxed()
                }
            }
        };
    }

    pub fn coordinate() -> BoxedStrategy<FloatType> {
        (-100.0..100.0).boxed()
    }

    pub fn world_point() -> BoxedStrategy<WorldPoint> {
        (coordinate(), coordinate(), coordinate())
            .prop_map(|(x, y, z)| WorldPoint::new(x, y, z))
            .boxed()
    }

    arbitrary_wrapper! {
        NonzeroWorldVectorWrapper(WorldVector) -> {
            (-1.0..1.0, -1.0..1.0, -1.0..1.0)
                .prop_filter_map(
                    "vector is zero",
                    |(x, y, z): (FloatType, FloatType, FloatType)| {
                        let vector = WorldVector::new(x, y, z);
                        if vector.norm() < 1e-6 {
                            None
                        } else {
                            Some(vector)
                        }
                    })
        }
    }

    arbitrary_wrapper! {
        RayWrapper(Ray) -> {
            (world_point(), any::<NonzeroWorldVectorWrapper>())
                .prop_map(|(origin, direction)| Ray::new(origin, *direction))
        }
    }

    #[test_case(WorldVector::new(1.0, 2.0, 4.0), WorldVector::new(1.0, 0.5, 0.25) ; "regular")]
    #[test_case(WorldVector::new(0.0, -2.0, 0.0), WorldVector::new(FloatType::INFINITY, -0.5, FloatType::INFINITY) ; "positive_zeros")]
    #[test_case(WorldVector::new(-0.0, 1.0, -0.0), WorldVector::new(FloatType::INFINITY, 1.0, FloatType::INFINITY) ; "negative_zeros")]
    fn inverse_direction(direction: WorldVector, expected: WorldVector) {
        let ray = Ray::new(WorldPoint::origin(), direction);
        assert!(ray.inv_direction == expected);
    }

    #[test]
    fn direction_is_not_normalized() {
        let ray = Ray::new(
            WorldPoint::new(1.0, 0.0, 0.0),
            WorldVector::new(0.0, 2.0, 0.0),
        );
        assert!(ray.point_at(1.5) == WorldPoint::new(1.0, 3.0, 0.0));
    }
}
