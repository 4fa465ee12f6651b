use super::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::path::PathBuf;

/// Everything generated in memory, before serialization.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub locations: Vec<Location>,
    pub observations: Vec<Observation>,
    pub census: Census,
}

/// Outcome of a full run, printed for the operator.
#[derive(Debug, Clone)]
pub struct Report {
    pub rows: usize,
    pub parquet: PathBuf,
    pub sample: Option<(usize, PathBuf)>,
    pub census: Census,
    pub describe: Describe,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Wrote {} rows to {}", self.rows, self.parquet.display())?;
        if let Some((n, ref path)) = self.sample {
            writeln!(f, "Sample ({} rows) written to {}", n, path.display())?;
        }
        write!(f, "{}", self.census)?;
        writeln!(f, "Value ranges:")?;
        write!(f, "{}", self.describe)
    }
}

/// Linear generation pipeline driven by a single seeded generator.
///
/// The generator is created here and lent to the sampler and then the
/// expander, in that order; nothing else draws from it, so a seed and a
/// `Config` fully determine the output.
pub struct Pipeline {
    config: Config,
}

impl From<Config> for Pipeline {
    fn from(config: Config) -> Self {
        Self { config }
    }
}

impl Pipeline {
    /// Sample, validate and expand, without touching the filesystem.
    pub fn generate(&self) -> anyhow::Result<Dataset> {
        let ref config = self.config;
        config.validate()?;
        let ref mut rng = SmallRng::seed_from_u64(config.seed);
        let clusters = Clusters::from(config.k_clusters);
        let locations = Sampler::new(&clusters, config.lat, config.lon, config.sigma)?
            .locations(config.n_locations, rng);
        let census = Census::from(locations.as_slice());
        census.validate();
        let timeline = Timeline::try_from((config.year, config.times))?;
        let observations = Expander::new(&timeline, &locations, clusters.k())?
            .observations(&locations, rng);
        Ok(Dataset {
            locations,
            observations,
            census,
        })
    }

    /// Generate and write every configured artifact.
    pub fn run(&self) -> anyhow::Result<Report> {
        let ref config = self.config;
        config.validate()?;
        config.prepare()?;
        let dataset = self.generate()?;
        let mut table = Table::try_from(dataset.observations.as_slice())?;
        table.save(&config.out_parquet)?;
        let sample = match config.sample() {
            Some(n) => Some((table.sample(&config.out_csv, n)?, config.out_csv.clone())),
            None => None,
        };
        if let Some(ref path) = config.schema_json {
            ColumnTags::default().save(path)?;
        }
        Ok(Report {
            rows: table.height(),
            parquet: config.out_parquet.clone(),
            sample,
            census: dataset.census,
            describe: table.describe()?,
        })
    }
}
