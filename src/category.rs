//! The three categorical labels carried by every location (and copied onto
//! every row): land cover (`cat_a`), compass bucket (`cat_b`) and tier (`cat_c`).
use super::*;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

/// Primary label, fixed per cluster index.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Cover {
    Mine = 0isize,
    Forest = 1isize,
    Water = 2isize,
    Urban = 3isize,
    Rangeland = 4isize,
    Grassland = 5isize,
    Agriculture = 6isize,
    Wetland = 7isize,
}

impl Cover {
    pub const N: usize = 8;
    pub const fn all() -> &'static [Self; Self::N] {
        &[
            Self::Mine,
            Self::Forest,
            Self::Water,
            Self::Urban,
            Self::Rangeland,
            Self::Grassland,
            Self::Agriculture,
            Self::Wetland,
        ]
    }
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mine => "mine",
            Self::Forest => "forest",
            Self::Water => "water",
            Self::Urban => "urban",
            Self::Rangeland => "rangeland",
            Self::Grassland => "grassland",
            Self::Agriculture => "agriculture",
            Self::Wetland => "wetland",
        }
    }
}

/// Cluster index to label. Indices past the end wrap around.
impl From<usize> for Cover {
    fn from(cluster: usize) -> Self {
        Self::all()[cluster % Self::N]
    }
}

/// Coarse direction of an embedding from the origin.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Compass {
    Center,
    East,
    North,
    West,
    South,
}

impl Compass {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::East => "east",
            Self::North => "north",
            Self::West => "west",
            Self::South => "south",
        }
    }
}

/// 90° buckets centered on the cardinal directions; east spans
/// [315°, 360°) ∪ [0°, 45°). Anything within `CENTER_RADIUS` is `Center`.
impl From<Embedding> for Compass {
    fn from(e: Embedding) -> Self {
        if e.radius() < CENTER_RADIUS {
            return Self::Center;
        }
        match e.degrees() {
            d if d >= 315. || d < 45. => Self::East,
            d if d < 135. => Self::North,
            d if d < 225. => Self::West,
            _ => Self::South,
        }
    }
}

/// Ordinal tier drawn per location from its cluster's distribution.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    One = 0isize,
    Two = 1isize,
    Three = 2isize,
}

impl Tier {
    pub const N: usize = 3;
    /// Weights for cluster 0; other clusters rotate this.
    pub const BASE: [Probability; Self::N] = [0.6, 0.3, 0.1];
    pub const fn all() -> &'static [Self; Self::N] {
        &[Self::One, Self::Two, Self::Three]
    }
    pub const fn label(&self) -> &'static str {
        match self {
            Self::One => "tier1",
            Self::Two => "tier2",
            Self::Three => "tier3",
        }
    }
    /// Draw a tier using the cluster's rotated weights.
    pub fn sample<R: Rng>(cluster: &Cluster, rng: &mut R) -> Self {
        let i = WeightedIndex::new(cluster.tiers().iter())
            .expect("valid weights array")
            .sample(rng);
        Self::all()[i]
    }
}

impl std::fmt::Display for Cover {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
impl std::fmt::Display for Compass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn cover_wraps_past_label_count() {
        assert_eq!(Cover::from(0), Cover::Mine);
        assert_eq!(Cover::from(7), Cover::Wetland);
        assert_eq!(Cover::from(8), Cover::Mine);
        assert_eq!(Cover::from(9), Cover::Forest);
        assert_eq!(Cover::from(9).to_string(), "forest");
    }

    #[test]
    fn compass_center_ignores_angle() {
        assert_eq!(Compass::from(Embedding::from((0.05, 0.02))), Compass::Center);
        assert_eq!(Compass::from(Embedding::from((-0.1, -0.2))), Compass::Center);
    }

    #[test]
    fn compass_cardinal_buckets() {
        let at = |deg: f64| {
            let t = deg.to_radians();
            Compass::from(Embedding::from((0.5 * t.cos(), 0.5 * t.sin())))
        };
        assert_eq!(at(0.), Compass::East);
        assert_eq!(at(44.), Compass::East);
        assert_eq!(at(46.), Compass::North);
        assert_eq!(at(134.), Compass::North);
        assert_eq!(at(136.), Compass::West);
        assert_eq!(at(224.), Compass::West);
        assert_eq!(at(226.), Compass::South);
        assert_eq!(at(314.), Compass::South);
        assert_eq!(at(316.), Compass::East);
        assert_eq!(at(-30.), Compass::East);
    }

    #[test]
    fn tier_frequencies_follow_cluster() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let clusters = Clusters::from(3);
        let cluster = clusters.get(1);
        let n = 20_000;
        let mut counts = [0usize; Tier::N];
        for _ in 0..n {
            counts[Tier::sample(cluster, rng) as usize] += 1;
        }
        let shares = counts.map(|c| c as Probability / n as Probability);
        for (share, expected) in shares.iter().zip(cluster.tiers()) {
            assert!((share - expected).abs() < 0.02);
        }
    }
}
