use super::FloatType;

/// Closed range of ray lengths `[min, max]` in which hits are accepted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub min: FloatType,
    pub max: FloatType,
}

impl Interval {
    pub const UNIVERSE: Interval = Interval {
        min: FloatType::NEG_INFINITY,
        max: FloatType::INFINITY,
    };

    pub fn new(min: FloatType, max: FloatType) -> Interval {
        Interval { min, max }
    }

    /// Everything from `min` up to infinity
    pub fn starting_at(min: FloatType) -> Interval {
        Interval {
            min,
            max: FloatType::INFINITY,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, x: FloatType) -> bool {
        self.min <= x && x <= self.max
    }

    /// An interval with no interior. Degenerate single point intervals count as empty.
    pub fn is_empty(&self) -> bool {
        !(self.min < self.max)
    }

    /// Same interval with the upper bound replaced
    pub fn with_max(&self, max: FloatType) -> Interval {
        Interval { min: self.min, max }
    }
}
