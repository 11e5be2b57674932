//! Level to experience-to-next-level lookup table.
//!
//! Built once from a two-column text resource (`level,experience` rows under
//! a header line) and never mutated afterwards.

use crate::{net, DataError};
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperienceTable {
    levels: BTreeMap<u32, f64>,
}

impl ExperienceTable {
    /// Fetch the table resource at `url` and build it.
    pub async fn load(url: &str) -> Result<Self, DataError> {
        let text = net::fetch_text(url)
            .await
            .map_err(|e| DataError::Fetch(e.to_string()))?;
        Self::from_csv_str(&text)
    }

    /// Parse a header line followed by `level,experience` rows.
    ///
    /// Rows with a missing or unparseable field are logged and skipped. A
    /// later row for an already seen level replaces the earlier value.
    pub fn from_csv_str(text: &str) -> Result<Self, DataError> {
        let trimmed = text.trim();
        let line_count = trimmed.lines().count();
        if line_count < 2 {
            return Err(DataError::TooFewLines(line_count));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(trimmed.as_bytes());

        let mut levels = BTreeMap::new();

        for record in reader.records() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!("Skipping unreadable row: {}", e);
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let level_field = record.get(0).filter(|s| !s.is_empty());
            let exp_field = record.get(1).filter(|s| !s.is_empty());
            let (Some(level_field), Some(exp_field)) = (level_field, exp_field) else {
                warn!("Skipping incomplete row on line {}: {:?}", line, record);
                continue;
            };

            let (level, exp) = match (parse_level(level_field), parse_exp(exp_field)) {
                (Ok(level), Ok(exp)) => (level, exp),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Skipping invalid row on line {}: {}", line, e);
                    continue;
                }
            };

            if levels.insert(level, exp).is_some() {
                debug!("Level {} redefined on line {}, keeping the later value", level, line);
            }
        }

        if levels.is_empty() {
            return Err(DataError::NoValidRows);
        }

        info!("Loaded experience data for {} levels", levels.len());
        Ok(Self { levels })
    }

    /// Experience needed to advance from `level` to the next one.
    pub fn get(&self, level: u32) -> Option<f64> {
        self.levels.get(&level).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn min_level(&self) -> Option<u32> {
        self.levels.keys().next().copied()
    }

    pub fn max_level(&self) -> Option<u32> {
        self.levels.keys().next_back().copied()
    }

    /// `(level, experience)` pairs in ascending level order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.levels.iter().map(|(&lv, &exp)| (lv, exp))
    }
}

impl FromIterator<(u32, f64)> for ExperienceTable {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}

fn parse_level(field: &str) -> Result<u32, String> {
    match field.parse::<u32>() {
        Ok(0) => Err("level must be positive".to_string()),
        Ok(level) => Ok(level),
        Err(_) => Err(format!("level '{}' is not a whole number", field)),
    }
}

fn parse_exp(field: &str) -> Result<f64, String> {
    match field.parse::<f64>() {
        Ok(exp) if exp.is_finite() && exp >= 0.0 => Ok(exp),
        Ok(_) => Err(format!("experience '{}' must be a non-negative number", field)),
        Err(_) => Err(format!("experience '{}' is not a number", field)),
    }
}
