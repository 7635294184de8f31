//! Data structures for extracted perftest measurements

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One (message size, measured value) pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DataPoint {
    /// Message size, as printed in the size column
    pub size: f64,
    /// Measured value for that size
    pub value: f64,
}

impl DataPoint {
    pub fn new(size: f64, value: f64) -> Self {
        Self { size, value }
    }
}

/// All data points extracted from a single perftest output file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkResult {
    /// Path or label of the parsed output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Data points in input line order
    pub data_points: Vec<DataPoint>,
}

impl BenchmarkResult {
    /// Zip two parallel series into a result.
    ///
    /// The caller is responsible for checking that both series have the same
    /// length; extra entries in the longer series are dropped.
    pub fn from_series(sizes: &[f64], values: &[f64]) -> Self {
        let data_points = sizes
            .iter()
            .zip(values)
            .map(|(&size, &value)| DataPoint::new(size, value))
            .collect();

        Self {
            source: None,
            data_points,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }

    pub fn sizes(&self) -> impl Iterator<Item = f64> + '_ {
        self.data_points.iter().map(|d| d.size)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data_points.iter().map(|d| d.value)
    }

    /// Render one `size\t\tvalue` line per data point.
    ///
    /// Floats use the shortest representation that parses back to the same
    /// value, so [`BenchmarkResult::from_tsv`] recovers the points exactly.
    pub fn to_tsv(&self) -> String {
        self.data_points
            .iter()
            .map(|d| format!("{}\t\t{}\n", d.size, d.value))
            .collect()
    }

    /// Rebuild a result from the text produced by [`BenchmarkResult::to_tsv`].
    ///
    /// Blank lines and `#` comment lines are ignored.
    pub fn from_tsv(text: &str) -> Result<Self> {
        let mut sizes = Vec::new();
        let mut values = Vec::new();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            let [size, value] = fields[..] else {
                return Err(Error::ParseError(format!(
                    "line {}: expected 2 fields, found {}",
                    lineno + 1,
                    fields.len()
                )));
            };

            let parse = |field: &str| {
                field.parse::<f64>().map_err(|e| {
                    Error::ParseError(format!("line {}: {}: {}", lineno + 1, field, e))
                })
            };
            sizes.push(parse(size)?);
            values.push(parse(value)?);
        }

        Ok(Self::from_series(&sizes, &values))
    }
}

/// Results for a batch of files, in the order the files were supplied
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkResults {
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkResult> {
        self.results.iter()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a BenchmarkResults {
    type Item = &'a BenchmarkResult;
    type IntoIter = std::slice::Iter<'a, BenchmarkResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
