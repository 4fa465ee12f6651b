use super::*;
use rand::Rng;

/// One latent cluster: an anchor on the unit circle plus the tier
/// distribution its locations draw from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    index: usize,
    centroid: Embedding,
    tiers: [Probability; Tier::N],
}

impl Cluster {
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn centroid(&self) -> Embedding {
        self.centroid
    }
    /// Tier weights, the base distribution rotated right by `index mod 3`.
    pub fn tiers(&self) -> &[Probability; Tier::N] {
        &self.tiers
    }
    /// Land-cover label, wrapping around when K exceeds the label count.
    pub fn cover(&self) -> Cover {
        Cover::from(self.index)
    }
}

/// Cluster `i` of `k`, centered at angle `i·2π/k`.
impl From<(usize, usize)> for Cluster {
    fn from((index, k): (usize, usize)) -> Self {
        let theta = index as Coordinate * std::f64::consts::TAU / k as Coordinate;
        let mut tiers = Tier::BASE;
        tiers.rotate_right(index % Tier::N);
        Self {
            index,
            centroid: Embedding::polar(theta),
            tiers,
        }
    }
}

/// The full, explicitly indexed cluster layout, built once from K.
#[derive(Debug, Clone, PartialEq)]
pub struct Clusters(Vec<Cluster>);

impl Clusters {
    pub fn k(&self) -> usize {
        self.0.len()
    }
    pub fn get(&self, index: usize) -> &Cluster {
        &self.0[index]
    }
    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.0.iter()
    }
    /// Draw a cluster uniformly at random.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> &Cluster {
        self.get(rng.random_range(0..self.k()))
    }
}

impl From<usize> for Clusters {
    fn from(k: usize) -> Self {
        debug_assert!(k > 0);
        Self((0..k).map(|i| Cluster::from((i, k))).collect())
    }
}
