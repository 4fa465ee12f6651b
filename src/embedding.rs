use super::*;
use rand::Rng;
use rand_distr::Distribution;
use rand_distr::Normal;

/// A point in the 2D latent space.
///
/// Embeddings handed out by [`Embedding::clip`] always lie inside the unit
/// disk. Polar accessors use the east-aligned, counter-clockwise convention
/// of `atan2`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Embedding {
    x: Coordinate,
    y: Coordinate,
}

impl Embedding {
    pub fn x(&self) -> Coordinate {
        self.x
    }
    pub fn y(&self) -> Coordinate {
        self.y
    }
    /// Euclidean distance from the origin.
    pub fn radius(&self) -> Coordinate {
        self.x.hypot(self.y)
    }
    /// Polar angle in radians, in (-π, π].
    pub fn angle(&self) -> Coordinate {
        self.y.atan2(self.x)
    }
    /// Polar angle in degrees, normalised to [0, 360).
    pub fn degrees(&self) -> Coordinate {
        (self.angle().to_degrees() + 360.) % 360.
    }
    /// Unit vector at the given angle.
    pub fn polar(theta: Coordinate) -> Self {
        Self::from((theta.cos(), theta.sin()))
    }
    /// Pull points outside the unit disk back just inside its boundary,
    /// keeping their direction. Points already inside are untouched.
    pub fn clip(self) -> Self {
        let r = self.radius();
        if r <= 1. {
            self
        } else {
            Self::from((self.x / r * CLIP_SCALE, self.y / r * CLIP_SCALE))
        }
    }
    /// Add isotropic Gaussian noise, drawing x before y, then clip.
    pub fn jitter<R: Rng>(self, noise: &Normal<Coordinate>, rng: &mut R) -> Self {
        let dx = noise.sample(rng);
        let dy = noise.sample(rng);
        (self + Self::from((dx, dy))).clip()
    }
}

impl From<(Coordinate, Coordinate)> for Embedding {
    fn from((x, y): (Coordinate, Coordinate)) -> Self {
        Self { x, y }
    }
}
impl From<Embedding> for (Coordinate, Coordinate) {
    fn from(e: Embedding) -> Self {
        (e.x, e.y)
    }
}

impl std::ops::Add for Embedding {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::from((self.x + other.x, self.y + other.y))
    }
}

impl std::fmt::Display for Embedding {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({:+.4}, {:+.4})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn clip_keeps_inner_points() {
        let e = Embedding::from((0.3, -0.4));
        assert_eq!(e, e.clip());
    }

    #[test]
    fn clip_rescales_outer_points() {
        let e = Embedding::from((3., 4.)).clip();
        assert!((e.radius() - CLIP_SCALE).abs() < 1e-12);
        assert!((e.x() - 0.6 * CLIP_SCALE).abs() < 1e-12);
        assert!((e.y() - 0.8 * CLIP_SCALE).abs() < 1e-12);
    }

    #[test]
    fn degrees_are_normalised() {
        assert!((Embedding::from((0., -1.)).degrees() - 270.).abs() < 1e-9);
        assert!((Embedding::from((-1., 0.)).degrees() - 180.).abs() < 1e-9);
        assert!(Embedding::from((1., 0.)).degrees().abs() < 1e-9);
    }

    #[test]
    fn jitter_stays_in_disk() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let ref noise = Normal::new(0., 0.5).unwrap();
        let mut e = Embedding::polar(0.25);
        for _ in 0..1000 {
            e = e.jitter(noise, rng);
            assert!(e.radius() <= 1.);
        }
    }
}
