use std::fmt::Display;

/// Min / max / mean summary of integer samples, e.g. leaf depths of a tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub avg: f32,
}

impl Stats {
    pub fn new_single(v: usize) -> Self {
        Stats {
            count: 1,
            min: v,
            max: v,
            avg: v as f32,
        }
    }

    /// Summary of both sample sets together.
    pub fn merge(&self, other: &Self) -> Self {
        let count = self.count + other.count;
        let avg = match count {
            0 => 0.0,
            _ => (self.avg * self.count as f32 + other.avg * other.count as f32) / count as f32,
        };

        Stats {
            count,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            avg,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// No samples. Neutral element of `merge`.
impl Default for Stats {
    fn default() -> Self {
        Stats {
            count: 0,
            min: usize::MAX,
            max: 0,
            avg: 0.0,
        }
    }
}

impl FromIterator<usize> for Stats {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        iter.into_iter()
            .map(Stats::new_single)
            .fold(Stats::default(), |acc, s| acc.merge(&s))
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "no samples");
        }
        write!(
            f,
            "{} - {}; avg {:.1}; {} samples",
            self.min, self.max, self.avg, self.count
        )
    }
}
