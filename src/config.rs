use super::*;
use anyhow::Context;
use rand::Rng;
use std::path::Path;
use std::path::PathBuf;

/// Closed range of one geographic axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Coordinate,
    max: Coordinate,
}

impl Bounds {
    pub const fn new(min: Coordinate, max: Coordinate) -> Self {
        Self { min, max }
    }
    pub fn min(&self) -> Coordinate {
        self.min
    }
    pub fn max(&self) -> Coordinate {
        self.max
    }
    /// `min + (max − min)·u` with `u` uniform in [0, 1).
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Coordinate {
        self.min + (self.max - self.min) * rng.random::<Coordinate>()
    }
    fn validate(&self, axis: &str) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.min.is_finite() && self.max.is_finite(),
            "{} bounds must be finite",
            axis
        );
        anyhow::ensure!(
            self.min <= self.max,
            "{} bounds inverted: {} > {}",
            axis,
            self.min,
            self.max
        );
        Ok(())
    }
}

impl From<(Coordinate, Coordinate)> for Bounds {
    fn from((min, max): (Coordinate, Coordinate)) -> Self {
        Self::new(min, max)
    }
}

/// Everything a generation run needs. `Default` matches the CLI defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub n_locations: usize,
    pub times: usize,
    pub seed: u64,
    pub lat: Bounds,
    pub lon: Bounds,
    pub year: i32,
    pub k_clusters: usize,
    pub sigma: Coordinate,
    pub out_parquet: PathBuf,
    pub out_csv: PathBuf,
    /// Rows in the CSV sample; zero or negative skips it.
    pub sample_size: i64,
    pub schema_json: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n_locations: 1000,
            times: 5,
            seed: 42,
            lat: Bounds::from((43.5, 44.5)),
            lon: Bounds::from((-103.5, -102.5)),
            year: 2023,
            k_clusters: 5,
            sigma: 0.12,
            out_parquet: PathBuf::from("data/dummy_points.parquet"),
            out_csv: PathBuf::from("data/dummy_points.sample.csv"),
            sample_size: 200,
            schema_json: None,
        }
    }
}

impl Config {
    /// Number of sample rows requested, if any.
    pub fn sample(&self) -> Option<usize> {
        usize::try_from(self.sample_size).ok().filter(|n| *n > 0)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.k_clusters > 0, "k_clusters must be at least 1");
        anyhow::ensure!(
            self.sigma.is_finite() && self.sigma >= 0.,
            "sigma must be a finite non-negative number, got {}",
            self.sigma
        );
        self.lat.validate("latitude")?;
        self.lon.validate("longitude")?;
        Ok(())
    }

    /// Create parent directories for every output this run will write.
    pub fn prepare(&self) -> anyhow::Result<()> {
        std::iter::once(self.out_parquet.as_path())
            .chain(self.sample().map(|_| self.out_csv.as_path()))
            .chain(self.schema_json.as_deref())
            .filter_map(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .try_for_each(|dir| {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("create output directory {}", dir.display()))
            })
    }
}

/// Command line surface of the `generate` binary. Underscored spellings are
/// accepted so older invocation scripts keep working.
#[cfg(feature = "cli")]
#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Generate dummy spatiotemporal point data", long_about = None)]
pub struct Args {
    #[arg(long, alias = "n_locations", default_value_t = 1000)]
    pub n_locations: usize,
    #[arg(long, default_value_t = 5, help = "Number of timestamps per location")]
    pub times: usize,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    #[arg(long, alias = "lat_min", default_value_t = 43.5, allow_negative_numbers = true)]
    pub lat_min: f64,
    #[arg(long, alias = "lat_max", default_value_t = 44.5, allow_negative_numbers = true)]
    pub lat_max: f64,
    #[arg(long, alias = "lon_min", default_value_t = -103.5, allow_negative_numbers = true)]
    pub lon_min: f64,
    #[arg(long, alias = "lon_max", default_value_t = -102.5, allow_negative_numbers = true)]
    pub lon_max: f64,
    #[arg(long, default_value_t = 2023)]
    pub year: i32,
    #[arg(long, alias = "k_clusters", default_value_t = 5)]
    pub k_clusters: usize,
    #[arg(
        long,
        default_value_t = 0.12,
        help = "Std dev for cluster Gaussian in embedding space"
    )]
    pub sigma: f64,
    #[arg(
        long,
        alias = "out_parquet",
        default_value = "data/dummy_points.parquet",
        help = "Parquet output path"
    )]
    pub out_parquet: PathBuf,
    #[arg(
        long,
        alias = "out_csv",
        default_value = "data/dummy_points.sample.csv",
        help = "CSV output path for the sample rows"
    )]
    pub out_csv: PathBuf,
    #[arg(
        long,
        alias = "sample_size",
        default_value_t = 200,
        allow_negative_numbers = true,
        help = "Number of rows to include in the sample CSV (<=0 to skip)"
    )]
    pub sample_size: i64,
    #[arg(
        long,
        alias = "schema_json",
        help = "Optional path to write schema JSON description"
    )]
    pub schema_json: Option<PathBuf>,
}

#[cfg(feature = "cli")]
impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            n_locations: args.n_locations,
            times: args.times,
            seed: args.seed,
            lat: Bounds::from((args.lat_min, args.lat_max)),
            lon: Bounds::from((args.lon_min, args.lon_max)),
            year: args.year,
            k_clusters: args.k_clusters,
            sigma: args.sigma,
            out_parquet: args.out_parquet,
            out_csv: args.out_csv,
            sample_size: args.sample_size,
            schema_json: args.schema_json,
        }
    }
}
