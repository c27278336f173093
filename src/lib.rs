pub mod geometry;
pub mod scene;
mod util;

pub use scene::{
    Bvh, BvhError, Hittable, HittableList, RandomSpheres, bvh::BvhStatistics, primitives::Sphere,
};
pub use util::Stats;
