use chrono::NaiveDate;
use chrono::NaiveDateTime;

/// Midnight on the first day of a month.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stamp(NaiveDateTime);

impl Stamp {
    /// ISO-8601 without fractional seconds, e.g. `2023-01-01T00:00:00`.
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
    /// Nanoseconds since the Unix epoch, as stored in the table.
    pub fn nanos(&self) -> anyhow::Result<i64> {
        self.0
            .and_utc()
            .timestamp_nanos_opt()
            .ok_or_else(|| anyhow::anyhow!("{} outside nanosecond range", self.0))
    }
}

impl std::fmt::Display for Stamp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Month-start timestamps shared by every location, starting at January of
/// the anchor year and rolling into later years as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline(Vec<Stamp>);

impl Timeline {
    pub fn stamps(&self) -> &[Stamp] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<(i32, usize)> for Timeline {
    type Error = anyhow::Error;
    fn try_from((year, times): (i32, usize)) -> Result<Self, Self::Error> {
        (0..times)
            .map(|i| {
                let y = year.saturating_add((i / 12) as i32);
                let m = (i % 12) as u32 + 1;
                NaiveDate::from_ymd_opt(y, m, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(Stamp)
                    .ok_or_else(|| anyhow::anyhow!("no month start for {}-{:02}", y, m))
            })
            .collect::<anyhow::Result<Vec<Stamp>>>()
            .map(Self)
    }
}
