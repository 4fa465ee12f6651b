use super::*;
use std::collections::BTreeMap;

/// Location counts per cluster, for balance checks and the final report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Census(BTreeMap<usize, usize>);

impl Census {
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
    pub fn count(&self, cluster: usize) -> usize {
        self.0.get(&cluster).copied().unwrap_or(0)
    }
    /// Fraction of all locations sitting in `cluster`.
    pub fn share(&self, cluster: usize) -> Probability {
        match self.total() {
            0 => 0.,
            n => self.count(cluster) as Probability / n as Probability,
        }
    }
    /// Clusters that occur, in ascending index order, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }
    /// Clusters whose share falls below `MIN_CLUSTER_SHARE`.
    pub fn sparse(&self) -> Vec<usize> {
        self.iter()
            .map(|(c, _)| c)
            .filter(|c| self.share(*c) < MIN_CLUSTER_SHARE)
            .collect()
    }
    /// Log a warning for every underpopulated cluster. Never fails.
    pub fn validate(&self) {
        for cluster in self.sparse() {
            log::warn!(
                "cluster {} share {:.2}% < {:.0}%",
                cluster,
                self.share(cluster) * 100.,
                MIN_CLUSTER_SHARE * 100.
            );
        }
    }
}

impl From<&[Location]> for Census {
    fn from(locations: &[Location]) -> Self {
        let mut counts = BTreeMap::new();
        for location in locations {
            *counts.entry(location.cluster()).or_insert(0) += 1;
        }
        Self(counts)
    }
}

impl std::fmt::Display for Census {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Cluster distribution:")?;
        for (cluster, count) in self.iter() {
            writeln!(
                f,
                "  Cluster {}: {} locations ({:.1}%)",
                cluster,
                count,
                self.share(cluster) * 100.
            )?;
        }
        Ok(())
    }
}
