//! Dummy Point Generator
//!
//! Writes the synthetic spatiotemporal table as Parquet, plus an optional
//! CSV sample and JSON schema, then prints a short report.

use bhmcp::*;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    log()?;
    let config = Config::from(Args::parse());
    log::info!("{:<32}{:<32}", "seed", config.seed);
    let report = Pipeline::from(config).run()?;
    println!("{}", report);
    Ok(())
}
