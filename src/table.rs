//! Columnar serialization of observations.
//!
//! Rows are pivoted into a polars `DataFrame` once, then written as a full
//! Parquet file, an optional CSV head sample and an optional JSON schema
//! description. The three writes are independent: a failure in a later one
//! leaves earlier files in place.
use super::*;
use anyhow::Context;
use polars::prelude::Column;
use polars::prelude::CsvWriter;
use polars::prelude::DataFrame;
use polars::prelude::DataType;
use polars::prelude::NamedFrom;
use polars::prelude::ParquetWriter;
use polars::prelude::SerWriter;
use polars::prelude::Series;
use polars::prelude::TimeUnit;
use std::path::Path;

/// Semantic type tag per column, in column order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ColumnTags {
    pub id: String,
    pub loc_id: String,
    pub geo_lat: String,
    pub geo_lon: String,
    pub emb_x: String,
    pub emb_y: String,
    pub timestamp: String,
    pub cat_a: String,
    pub cat_b: String,
    pub cat_c: String,
    pub num_a: String,
    pub num_b: String,
}

impl Default for ColumnTags {
    fn default() -> Self {
        Self {
            id: "string".into(),
            loc_id: "string".into(),
            geo_lat: "float64".into(),
            geo_lon: "float64".into(),
            emb_x: "float32".into(),
            emb_y: "float32".into(),
            timestamp: "datetime64[ns]".into(),
            cat_a: "category".into(),
            cat_b: "category".into(),
            cat_c: "category".into(),
            num_a: "float32".into(),
            num_b: "float32".into(),
        }
    }
}

impl ColumnTags {
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        log::info!("{:<32}{:<32}", "saving schema", path.display());
        let json = serde_json::to_string_pretty(self).context("serialize schema")?;
        std::fs::write(path, json).with_context(|| format!("write schema {}", path.display()))
    }
}

/// The full observation table.
pub struct Table(DataFrame);

impl Table {
    pub const COLUMNS: [&'static str; 12] = [
        "id",
        "loc_id",
        "geo_lat",
        "geo_lon",
        "emb_x",
        "emb_y",
        "timestamp",
        "cat_a",
        "cat_b",
        "cat_c",
        "num_a",
        "num_b",
    ];

    pub fn height(&self) -> usize {
        self.0.height()
    }
    pub fn frame(&self) -> &DataFrame {
        &self.0
    }

    /// Summary statistics of the two numeric features.
    pub fn describe(&self) -> anyhow::Result<Describe> {
        let summary = |name: &str| -> anyhow::Result<Summary> {
            Summary::try_from(self.0.column(name)?.as_materialized_series())
        };
        Ok(Describe::from(vec![
            ("num_a", summary("num_a")?),
            ("num_b", summary("num_b")?),
        ]))
    }

    /// Write every row to `path` as Parquet.
    pub fn save(&mut self, path: &Path) -> anyhow::Result<()> {
        log::info!("{:<32}{:<32}", "saving parquet", path.display());
        let file = std::fs::File::create(path)
            .with_context(|| format!("create parquet {}", path.display()))?;
        ParquetWriter::new(file)
            .finish(&mut self.0)
            .with_context(|| format!("write parquet {}", path.display()))?;
        Ok(())
    }

    /// Write the first `n` rows to `path` as CSV with a header.
    /// Returns how many rows were written.
    pub fn sample(&self, path: &Path, n: usize) -> anyhow::Result<usize> {
        log::info!("{:<32}{:<32}", "saving sample", path.display());
        let mut head = self.0.head(Some(n));
        let ref mut file = std::fs::File::create(path)
            .with_context(|| format!("create sample {}", path.display()))?;
        CsvWriter::new(file)
            .include_header(true)
            .with_datetime_format(Some("%Y-%m-%d".into()))
            .finish(&mut head)
            .with_context(|| format!("write sample {}", path.display()))?;
        Ok(head.height())
    }
}

impl TryFrom<&[Observation]> for Table {
    type Error = anyhow::Error;
    fn try_from(rows: &[Observation]) -> Result<Self, Self::Error> {
        log::info!("{:<32}{:<32}", "building table", rows.len());
        let strings = |f: fn(&Observation) -> String| {
            rows.iter()
                .map(f)
                .collect::<Vec<String>>()
        };
        let doubles = |f: fn(&Observation) -> f64| rows.iter().map(f).collect::<Vec<f64>>();
        let singles = |f: fn(&Observation) -> f64| {
            rows.iter()
                .map(f)
                .map(|x| x as Feature)
                .collect::<Vec<Feature>>()
        };
        let stamps = rows
            .iter()
            .map(|r| r.stamp().nanos())
            .collect::<anyhow::Result<Vec<i64>>>()?;
        let stamps = Series::new("timestamp".into(), stamps)
            .cast(&DataType::Datetime(TimeUnit::Nanoseconds, None))?;
        let frame = DataFrame::new(vec![
            Column::new("id".into(), strings(|r| r.id().to_string())),
            Column::new("loc_id".into(), strings(|r| r.location().to_string())),
            Column::new("geo_lat".into(), doubles(|r| r.lat())),
            Column::new("geo_lon".into(), doubles(|r| r.lon())),
            Column::new("emb_x".into(), singles(|r| r.embedding().x())),
            Column::new("emb_y".into(), singles(|r| r.embedding().y())),
            Column::from(stamps),
            Column::new("cat_a".into(), strings(|r| r.cover().to_string())),
            Column::new("cat_b".into(), strings(|r| r.compass().to_string())),
            Column::new("cat_c".into(), strings(|r| r.tier().to_string())),
            Column::new("num_a".into(), singles(|r| r.num_a())),
            Column::new("num_b".into(), singles(|r| r.num_b())),
        ])?;
        Ok(Self(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::ParquetReader;
    use polars::prelude::SerReader;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rows(n: usize, times: usize) -> Vec<Observation> {
        let ref clusters = Clusters::from(5);
        let ref timeline = Timeline::try_from((2023, times)).unwrap();
        let ref mut rng = SmallRng::seed_from_u64(42);
        let sampler = Sampler::new(
            clusters,
            Bounds::from((43.5, 44.5)),
            Bounds::from((-103.5, -102.5)),
            0.12,
        )
        .unwrap();
        let locations = sampler.locations(n, rng);
        Expander::new(timeline, &locations, 5)
            .unwrap()
            .observations(&locations, rng)
    }

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("bhmcp-table-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn columns_in_order_with_downcasts() {
        let table = Table::try_from(rows(4, 3).as_slice()).unwrap();
        assert_eq!(table.height(), 12);
        let names = table
            .frame()
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect::<Vec<String>>();
        assert_eq!(names, Table::COLUMNS);
        let schema = table.frame().schema();
        assert_eq!(schema.get("geo_lat"), Some(&DataType::Float64));
        assert_eq!(schema.get("emb_x"), Some(&DataType::Float32));
        assert_eq!(schema.get("num_b"), Some(&DataType::Float32));
        assert_eq!(schema.get("id"), Some(&DataType::String));
        assert_eq!(
            schema.get("timestamp"),
            Some(&DataType::Datetime(TimeUnit::Nanoseconds, None))
        );
    }

    #[test]
    fn features_match_rows() {
        let rows = rows(3, 2);
        let table = Table::try_from(rows.as_slice()).unwrap();
        let num_a = table
            .frame()
            .column("num_a")
            .unwrap()
            .as_materialized_series()
            .f32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect::<Vec<Feature>>();
        for (row, value) in rows.iter().zip(num_a.iter()) {
            assert_eq!(row.num_a() as Feature, *value);
        }
        let describe = table.describe().unwrap();
        let summary = describe.get("num_a").unwrap();
        assert_eq!(summary.count, 6);
        let lowest = num_a.iter().copied().fold(Feature::INFINITY, Feature::min);
        let highest = num_a.iter().copied().fold(Feature::NEG_INFINITY, Feature::max);
        assert_eq!(summary.min, lowest as f64);
        assert_eq!(summary.max, highest as f64);
        assert!(summary.min <= summary.q25 && summary.q25 <= summary.q50);
        assert!(summary.q50 <= summary.q75 && summary.q75 <= summary.max);
    }

    #[test]
    fn sample_is_truncated_head() {
        let dir = scratch("sample");
        let table = Table::try_from(rows(5, 2).as_slice()).unwrap();
        let ref path = dir.join("sample.csv");
        assert_eq!(table.sample(path, 4).unwrap(), 4);
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("id,loc_id,geo_lat,geo_lon,emb_x,emb_y,timestamp,cat_a"));
        assert!(text.lines().skip(1).all(|line| line.contains(",2023-0")));
        assert!(text.lines().nth(1).unwrap().contains(",2023-01-01,"));
        assert!(!text.contains("T00:00:00"));
        assert_eq!(table.sample(path, 100).unwrap(), 10);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn parquet_round_trips_height() {
        let dir = scratch("parquet");
        let mut table = Table::try_from(rows(6, 2).as_slice()).unwrap();
        let ref path = dir.join("points.parquet");
        table.save(path).unwrap();
        let file = std::fs::File::open(path).unwrap();
        let back = ParquetReader::new(file).finish().unwrap();
        assert_eq!(back.height(), 12);
        assert_eq!(back.width(), Table::COLUMNS.len());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn schema_lists_columns_in_order() {
        let json = serde_json::to_string(&ColumnTags::default()).unwrap();
        let positions = Table::COLUMNS
            .iter()
            .map(|c| json.find(&format!("\"{}\"", c)).unwrap())
            .collect::<Vec<usize>>();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("\"timestamp\":\"datetime64[ns]\""));
    }

    #[test]
    fn empty_table_is_fine() {
        let table = Table::try_from(&[] as &[Observation]).unwrap();
        assert_eq!(table.height(), 0);
        assert!(table.describe().unwrap().get("num_b").unwrap().mean.is_nan());
    }
}
