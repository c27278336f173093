use num_traits::One;

use nalgebra::{ClosedAddAssign, ClosedDivAssign, Point, Scalar, SimdPartialOrd};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABB<Point> {
    pub min: Point,
    pub max: Point,
}

impl<Point> AABB<Point> {
    pub fn new(min: Point, max: Point) -> AABB<Point> {
        AABB { min, max }
    }
}

impl<T: Scalar + ClosedAddAssign + ClosedDivAssign + One, const D: usize> AABB<Point<T, D>> {
    pub fn center(&self) -> Point<T, D> {
        let two = T::one() + T::one();
        let avg_coords = (&self.min.coords + &self.max.coords) / two;
        Point::from(avg_coords)
    }
}

impl<T: Scalar + SimdPartialOrd + Copy, const D: usize> AABB<Point<T, D>> {
    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        AABB {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Union of all boxes in the iterator, None if the iterator is empty.
    pub fn union_all(boxes: impl IntoIterator<Item = Self>) -> Option<Self> {
        boxes.into_iter().reduce(|a, b| a.union(&b))
    }
}

impl<T: Scalar + PartialOrd, const D: usize> AABB<Point<T, D>> {
    /// True if no coordinate is NaN and min <= max on every axis.
    pub fn is_valid(&self) -> bool {
        self.min
            .iter()
            .zip(self.max.iter())
            .all(|(min, max)| min <= max)
    }

    /// True if `other` lies completely inside this box (touching faces count as inside).
    pub fn contains_box(&self, other: &Self) -> bool {
        (0..D).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }
}

#[cfg(test)]
mod tests {
    use assert2::assert;
    use test_case::test_case;

    use crate::geometry::{FloatType, WorldBox, WorldPoint};

    fn world_box(min: [FloatType; 3], max: [FloatType; 3]) -> WorldBox {
        WorldBox::new(min.into(), max.into())
    }

    #[test]
    fn union_is_componentwise() {
        let a = world_box([0.0, 5.0, -1.0], [1.0, 6.0, 0.0]);
        let b = world_box([-2.0, 5.5, 3.0], [0.5, 7.0, 4.0]);

        let u = a.union(&b);

        assert!(u == world_box([-2.0, 5.0, -1.0], [1.0, 7.0, 4.0]));
        assert!(u == b.union(&a));
        assert!(u.contains_box(&a));
        assert!(u.contains_box(&b));
    }

    #[test]
    fn union_all() {
        let boxes = [
            world_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
            world_box([9.0, -1.0, 0.0], [11.0, 1.0, 1.0]),
            world_box([4.0, 0.0, -3.0], [5.0, 0.5, 0.0]),
        ];

        let u = WorldBox::union_all(boxes);

        assert!(u == Some(world_box([0.0, -1.0, -3.0], [11.0, 1.0, 1.0])));
        assert!(WorldBox::union_all([]).is_none());
    }

    #[test]
    fn center() {
        let b = world_box([0.0, 2.0, -4.0], [2.0, 6.0, 4.0]);
        assert!(b.center() == WorldPoint::new(1.0, 4.0, 0.0));
    }

    #[test_case([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], true ; "regular")]
    #[test_case([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], true ; "flat")]
    #[test_case([0.0, 2.0, 0.0], [1.0, 1.0, 1.0], false ; "inverted")]
    #[test_case([0.0, FloatType::NAN, 0.0], [1.0, 1.0, 1.0], false ; "nan_min")]
    #[test_case([0.0, 0.0, 0.0], [1.0, 1.0, FloatType::NAN], false ; "nan_max")]
    #[test_case([FloatType::NEG_INFINITY, 0.0, 0.0], [FloatType::INFINITY, 1.0, 1.0], true ; "infinite")]
    fn validity(min: [FloatType; 3], max: [FloatType; 3], expected: bool) {
        assert!(world_box(min, max).is_valid() == expected);
    }

    #[test]
    fn contains_box_rejects_overhang() {
        let outer = world_box([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let inner = world_box([1.0, 1.0, 1.0], [2.5, 2.0, 2.0]);
        assert!(!outer.contains_box(&inner));
    }
}
