use super::*;
use rand::Rng;
use rand_distr::Normal;

/// A sampled geographic site. Immutable once drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    id: ID<Location>,
    cluster: usize,
    lat: Coordinate,
    lon: Coordinate,
    embedding: Embedding,
    cover: Cover,
    compass: Compass,
    tier: Tier,
}

impl Location {
    pub fn id(&self) -> ID<Location> {
        self.id
    }
    pub fn cluster(&self) -> usize {
        self.cluster
    }
    pub fn lat(&self) -> Coordinate {
        self.lat
    }
    pub fn lon(&self) -> Coordinate {
        self.lon
    }
    pub fn embedding(&self) -> Embedding {
        self.embedding
    }
    pub fn cover(&self) -> Cover {
        self.cover
    }
    pub fn compass(&self) -> Compass {
        self.compass
    }
    pub fn tier(&self) -> Tier {
        self.tier
    }
}

/// Draws locations inside a bounding box, each attached to a uniformly
/// chosen cluster and placed at that cluster's centroid plus Gaussian noise.
pub struct Sampler<'a> {
    clusters: &'a Clusters,
    lat: Bounds,
    lon: Bounds,
    noise: Normal<Coordinate>,
}

impl<'a> Sampler<'a> {
    pub fn new(
        clusters: &'a Clusters,
        lat: Bounds,
        lon: Bounds,
        sigma: Coordinate,
    ) -> anyhow::Result<Self> {
        let noise =
            Normal::new(0., sigma).map_err(|e| anyhow::anyhow!("embedding noise: {}", e))?;
        Ok(Self {
            clusters,
            lat,
            lon,
            noise,
        })
    }

    /// Draw the location at `index`. Random draws happen in a fixed order:
    /// latitude, longitude, cluster, embedding x, embedding y, tier.
    pub fn sample<R: Rng>(&self, index: usize, rng: &mut R) -> Location {
        let lat = self.lat.sample(rng);
        let lon = self.lon.sample(rng);
        let cluster = self.clusters.choose(rng);
        let embedding = cluster.centroid().jitter(&self.noise, rng);
        let tier = Tier::sample(cluster, rng);
        Location {
            id: ID::location(index),
            cluster: cluster.index(),
            lat,
            lon,
            embedding,
            cover: cluster.cover(),
            compass: Compass::from(embedding),
            tier,
        }
    }

    /// Draw `n` locations with indices `0..n`.
    pub fn locations<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Location> {
        log::info!("{:<32}{:<32}", "sampling locations", n);
        let locations = (0..n).map(|i| self.sample(i, rng)).collect::<Vec<Location>>();
        log::debug!("{:<32}{:<32}", "sampled locations", locations.len());
        locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn draw(n: usize, k: usize, seed: u64) -> Vec<Location> {
        let ref clusters = Clusters::from(k);
        let ref mut rng = SmallRng::seed_from_u64(seed);
        Sampler::new(
            clusters,
            Bounds::from((43.5, 44.5)),
            Bounds::from((-103.5, -102.5)),
            0.12,
        )
        .unwrap()
        .locations(n, rng)
    }

    #[test]
    fn locations_fall_inside_bounds() {
        for loc in draw(500, 5, 1) {
            assert!((43.5..=44.5).contains(&loc.lat()));
            assert!((-103.5..=-102.5).contains(&loc.lon()));
            assert!(loc.embedding().radius() <= 1.);
            assert!(loc.cluster() < 5);
        }
    }

    #[test]
    fn labels_follow_cluster_and_geometry() {
        for loc in draw(500, 10, 2) {
            assert_eq!(loc.cover(), Cover::from(loc.cluster()));
            assert_eq!(loc.compass(), Compass::from(loc.embedding()));
        }
    }

    #[test]
    fn ids_follow_index_not_draws() {
        let a = draw(20, 5, 3);
        let b = draw(20, 5, 4);
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            assert_eq!(x.id(), y.id());
            assert_eq!(x.id(), ID::location(i));
        }
    }

    #[test]
    fn same_seed_same_locations() {
        assert_eq!(draw(50, 5, 9), draw(50, 5, 9));
        assert_ne!(draw(50, 5, 9), draw(50, 5, 10));
    }

    #[test]
    fn zero_sigma_lands_on_centroid() {
        let ref clusters = Clusters::from(3);
        let ref mut rng = SmallRng::seed_from_u64(0);
        let sampler = Sampler::new(
            clusters,
            Bounds::from((0., 1.)),
            Bounds::from((0., 1.)),
            0.,
        )
        .unwrap();
        for loc in sampler.locations(30, rng) {
            let centroid = clusters.get(loc.cluster()).centroid();
            let dx = loc.embedding().x() - centroid.x();
            let dy = loc.embedding().y() - centroid.y();
            assert!(dx.hypot(dy) <= 1. - CLIP_SCALE + 1e-12);
        }
    }
}
