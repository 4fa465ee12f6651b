//! Dummy spatiotemporal point data for the Black Hills MCP prototype.
//!
//! A fixed number of geographic locations are each assigned to one of K latent
//! clusters, placed in a 2D embedding near their cluster's centroid, and then
//! observed once per month with a slightly drifting embedding and two derived
//! numeric features. Everything is driven by one seeded generator, so a seed
//! fully determines the output.
//!
//! ## Pipeline
//!
//! 1. **Layout** — [`Clusters`] places K centroids evenly on the unit circle
//! 2. **Sampling** — [`Sampler`] draws coordinates, a cluster and an [`Embedding`]
//! 3. **Categories** — [`Cover`], [`Compass`] and [`Tier`] labels per location
//! 4. **Expansion** — [`Expander`] emits one [`Observation`] per [`Timeline`] entry
//! 5. **Validation** — [`Census`] warns about underpopulated clusters
//! 6. **Serialization** — [`Table`] writes Parquet, a CSV sample and a schema
//!
//! [`Pipeline`] runs all of the above from a [`Config`].
mod calendar;
mod category;
mod census;
mod cluster;
mod config;
mod embedding;
mod identity;
mod location;
mod observation;
mod pipeline;
mod summary;
mod table;

pub use calendar::*;
pub use category::*;
pub use census::*;
pub use cluster::*;
pub use config::*;
pub use embedding::*;
pub use identity::*;
pub use location::*;
pub use observation::*;
pub use pipeline::*;
pub use summary::*;
pub use table::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Geographic degrees and embedding-space coordinates.
pub type Coordinate = f64;
/// Down-cast numeric columns as they land in the table.
pub type Feature = f32;
/// Tier sampling weights and cluster population shares.
pub type Probability = f64;

// ============================================================================
// EMBEDDING GEOMETRY
// ============================================================================
/// Scale applied when an embedding escapes the unit disk.
pub const CLIP_SCALE: Coordinate = 0.999;
/// Radius under which an embedding is labelled `center` regardless of angle.
pub const CENTER_RADIUS: Coordinate = 0.25;
/// Standard deviation of the per-timestamp embedding drift.
pub const DRIFT_SIGMA: Coordinate = 0.01;

// ============================================================================
// NUMERIC FEATURES
// num_a = 10·r + ε + bias_a
// num_b = 5·sin(2θ) + 2·(1 − r) + ε + bias_b
// ============================================================================
/// Standard deviation of the additive noise on both numeric features.
pub const FEATURE_SIGMA: Coordinate = 0.3;
/// Scale of the cluster bias for `num_a` (negated for `num_b`).
pub const BIAS_SCALE: Coordinate = 0.5;

// ============================================================================
// VALIDATION
// ============================================================================
/// Minimum share of locations a cluster should hold before we warn.
pub const MIN_CLUSTER_SHARE: Probability = 0.1;

// ============================================================================
// IDENTITY
// ============================================================================
/// Prefix of the name hashed into every location identifier.
pub const LOCATION_PREFIX: &str = "bhmcp-loc";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}
