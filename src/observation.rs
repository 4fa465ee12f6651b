use super::*;
use rand::Rng;
use rand_distr::Distribution;
use rand_distr::Normal;

/// One row of the output table: a location seen at one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    id: ID<Observation>,
    location: ID<Location>,
    lat: Coordinate,
    lon: Coordinate,
    embedding: Embedding,
    stamp: Stamp,
    cover: Cover,
    compass: Compass,
    tier: Tier,
    num_a: Coordinate,
    num_b: Coordinate,
}

impl Observation {
    pub fn id(&self) -> ID<Observation> {
        self.id
    }
    pub fn location(&self) -> ID<Location> {
        self.location
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
    pub fn stamp(&self) -> Stamp {
        self.stamp
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
    pub fn num_a(&self) -> Coordinate {
        self.num_a
    }
    pub fn num_b(&self) -> Coordinate {
        self.num_b
    }
}

/// Per-cluster offsets added to the numeric features.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bias {
    pub num_a: Coordinate,
    pub num_b: Coordinate,
}

impl Bias {
    /// One bias per cluster index `0..k`, measured against the mean cluster
    /// index of the locations actually drawn (not the midpoint of `0..k`).
    pub fn per_cluster(locations: &[Location], k: usize) -> Vec<Self> {
        let n = locations.len();
        let mean = match n {
            0 => 0.,
            _ => {
                locations
                    .iter()
                    .map(|l| l.cluster() as Coordinate)
                    .sum::<Coordinate>()
                    / n as Coordinate
            }
        };
        (0..k)
            .map(|c| (c as Coordinate - mean) / n.max(1) as Coordinate)
            .map(|center| Self {
                num_a: BIAS_SCALE * center,
                num_b: -BIAS_SCALE * center,
            })
            .collect()
    }
}

/// Expands locations into one observation per timestamp, drifting each
/// embedding and deriving the numeric features from the drifted geometry.
pub struct Expander<'a> {
    timeline: &'a Timeline,
    biases: Vec<Bias>,
    drift: Normal<Coordinate>,
    noise: Normal<Coordinate>,
}

impl<'a> Expander<'a> {
    pub fn new(
        timeline: &'a Timeline,
        locations: &[Location],
        k: usize,
    ) -> anyhow::Result<Self> {
        let drift = Normal::new(0., DRIFT_SIGMA).map_err(|e| anyhow::anyhow!(e))?;
        let noise = Normal::new(0., FEATURE_SIGMA).map_err(|e| anyhow::anyhow!(e))?;
        let biases = Bias::per_cluster(locations, k);
        Ok(Self {
            timeline,
            biases,
            drift,
            noise,
        })
    }

    pub fn bias(&self, cluster: usize) -> Bias {
        self.biases.get(cluster).copied().unwrap_or_default()
    }

    /// Observe one location at one timestamp. Draws, in order: drift x,
    /// drift y, `num_a` noise, `num_b` noise.
    pub fn observe<R: Rng>(
        &self,
        location: &Location,
        stamp: &Stamp,
        rng: &mut R,
    ) -> Observation {
        let bias = self.bias(location.cluster());
        let embedding = location.embedding().jitter(&self.drift, rng);
        let r = embedding.radius();
        let theta = embedding.angle();
        let num_a = 10. * r + self.noise.sample(rng) + bias.num_a;
        let num_b =
            5. * (2. * theta).sin() + 2. * (1. - r) + self.noise.sample(rng) + bias.num_b;
        Observation {
            id: ID::observation(location.id(), stamp),
            location: location.id(),
            lat: location.lat(),
            lon: location.lon(),
            embedding,
            stamp: *stamp,
            cover: location.cover(),
            compass: location.compass(),
            tier: location.tier(),
            num_a,
            num_b,
        }
    }

    /// All observations, location-major then timestamp order.
    pub fn observations<R: Rng>(&self, locations: &[Location], rng: &mut R) -> Vec<Observation> {
        log::info!(
            "{:<32}{:<32}",
            "expanding observations",
            locations.len() * self.timeline.len()
        );
        let mut rows = Vec::with_capacity(locations.len() * self.timeline.len());
        for location in locations {
            for stamp in self.timeline.stamps() {
                rows.push(self.observe(location, stamp, rng));
            }
        }
        rows
    }
}
