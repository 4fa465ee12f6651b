use polars::prelude::ChunkAgg;
use polars::prelude::ChunkQuantile;
use polars::prelude::ChunkVar;
use polars::prelude::DataType;
use polars::prelude::QuantileMethod;
use polars::prelude::Series;

/// Descriptive statistics of one numeric column.
///
/// `std` is the sample (n − 1) deviation and quantiles interpolate linearly
/// between order statistics. Empty columns report NaN everywhere but `count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl TryFrom<&Series> for Summary {
    type Error = anyhow::Error;
    fn try_from(series: &Series) -> Result<Self, Self::Error> {
        let ref wide = series.cast(&DataType::Float64)?;
        let values = wide.f64()?;
        let quantile = |q: f64| -> anyhow::Result<f64> {
            Ok(values
                .quantile(q, QuantileMethod::Linear)?
                .unwrap_or(f64::NAN))
        };
        Ok(Self {
            count: values.len() - values.null_count(),
            mean: values.mean().unwrap_or(f64::NAN),
            std: values.std(1).unwrap_or(f64::NAN),
            min: values.min().unwrap_or(f64::NAN),
            q25: quantile(0.25)?,
            q50: quantile(0.50)?,
            q75: quantile(0.75)?,
            max: values.max().unwrap_or(f64::NAN),
        })
    }
}

/// Side-by-side summaries of named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Describe(Vec<(&'static str, Summary)>);

impl From<Vec<(&'static str, Summary)>> for Describe {
    fn from(columns: Vec<(&'static str, Summary)>) -> Self {
        Self(columns)
    }
}

impl Describe {
    pub fn get(&self, name: &str) -> Option<&Summary> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
    }
}

impl std::fmt::Display for Describe {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let stats: [(&str, fn(&Summary) -> f64); 8] = [
            ("count", |s| s.count as f64),
            ("mean", |s| s.mean),
            ("std", |s| s.std),
            ("min", |s| s.min),
            ("25%", |s| s.q25),
            ("50%", |s| s.q50),
            ("75%", |s| s.q75),
            ("max", |s| s.max),
        ];
        write!(f, "{:<8}", "")?;
        for (name, _) in self.0.iter() {
            write!(f, "{:>14}", name)?;
        }
        for (label, stat) in stats {
            writeln!(f)?;
            write!(f, "{:<8}", label)?;
            for (_, summary) in self.0.iter() {
                write!(f, "{:>14.6}", stat(summary))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Feature;
    use polars::prelude::NamedFrom;

    fn summary(values: &[Feature]) -> Summary {
        Summary::try_from(&Series::new("x".into(), values)).unwrap()
    }

    #[test]
    fn matches_hand_computed_values() {
        let s = summary(&[4., 1., 3., 2.]);
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        assert!((s.std - (5f64 / 3.).sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 1.);
        assert_eq!(s.q25, 1.75);
        assert_eq!(s.q50, 2.5);
        assert_eq!(s.q75, 3.25);
        assert_eq!(s.max, 4.);
    }

    #[test]
    fn single_value_has_no_spread() {
        let s = summary(&[7.]);
        assert_eq!(s.mean, 7.);
        assert!(s.std.is_nan());
        assert_eq!(s.q75, 7.);
    }

    #[test]
    fn empty_is_nan() {
        let s = summary(&[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
        assert!(s.min.is_nan());
        assert!(s.q50.is_nan());
    }

    #[test]
    fn describe_renders_all_rows() {
        let a = summary(&[1., 2.]);
        let b = summary(&[3., 4.]);
        let table = Describe::from(vec![("num_a", a), ("num_b", b)]);
        let text = table.to_string();
        assert_eq!(text.lines().count(), 9);
        assert!(text.lines().next().unwrap().contains("num_b"));
        assert_eq!(table.get("num_b").unwrap().max, 4.);
        assert!(table.get("num_c").is_none());
    }
}
