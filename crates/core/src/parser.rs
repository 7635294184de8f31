//! Parser for ucc_perftest output
//!
//! ucc_perftest prints a short description of the run followed by a table:
//! ```text
//! Collective:             Allreduce
//! Memory type:            host
//!
//!        Count        Size                Time, us
//!                                  avg         min         max
//!            1           4        3.41        3.09        3.83
//!            2           8        3.40        3.07        3.81
//! ```
//!
//! The `Collective:` line identifies the format. Data rows start after the
//! line carrying the `avg`/`min`/`max` column labels; the size and the
//! average value are read from fixed token positions (see [`ColumnLayout`]).

use crate::data::{BenchmarkResult, BenchmarkResults};
use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;
use tracing::{debug, info, warn};

/// Line prefix that marks a file as ucc_perftest output
pub const FORMAT_MARKER: &str = "Collective:";

/// Labels that must all appear on the table header line
pub const HEADER_COLUMNS: [&str; 3] = ["avg", "min", "max"];

// Open MPI forwards "N more processes have sent help message ..." into the
// benchmark output.
const HELP_MESSAGE_PATTERN: &str = r"more process(?:es have| has) sent help message";

/// Positions of the size and value tokens within a data row.
///
/// Indices are 1-based and count only non-empty tokens, so runs of spaces
/// used for column alignment do not shift them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    size_column: usize,
    value_column: usize,
}

impl ColumnLayout {
    pub fn new(size_column: usize, value_column: usize) -> Result<Self> {
        if size_column == 0 {
            return Err(Error::ConfigError(
                "size column index is 1-based and cannot be 0".to_string(),
            ));
        }
        // Scanning a row stops once the value is read.
        if value_column <= size_column {
            return Err(Error::ConfigError(format!(
                "value column ({}) must come after size column ({})",
                value_column, size_column
            )));
        }

        Ok(Self {
            size_column,
            value_column,
        })
    }

    pub fn size_column(&self) -> usize {
        self.size_column
    }

    pub fn value_column(&self) -> usize {
        self.value_column
    }
}

impl Default for ColumnLayout {
    /// `Count Size avg ...`: size is token 2, average value is token 3
    fn default() -> Self {
        Self {
            size_column: 2,
            value_column: 3,
        }
    }
}

/// Check whether the given lines look like ucc_perftest output
pub fn is_perftest_data<S: AsRef<str>>(content: &[S]) -> bool {
    content
        .iter()
        .any(|line| line.as_ref().starts_with(FORMAT_MARKER))
}

fn is_header_line(line: &str) -> bool {
    HEADER_COLUMNS.iter().all(|label| line.contains(label))
}

/// Parser for ucc_perftest output
pub struct PerftestParser {
    layout: ColumnLayout,
    /// Regex for Open MPI help-message warnings
    help_message_regex: Regex,
}

impl PerftestParser {
    /// Create a parser using the default column layout
    pub fn new() -> Result<Self> {
        Self::with_layout(ColumnLayout::default())
    }

    pub fn with_layout(layout: ColumnLayout) -> Result<Self> {
        let help_message_regex = Regex::new(HELP_MESSAGE_PATTERN)?;

        Ok(Self {
            layout,
            help_message_regex,
        })
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Lines inside the table that carry no data and must be skipped
    fn is_noise_line(&self, line: &str) -> bool {
        self.help_message_regex.is_match(line) || line.starts_with('\0')
    }

    /// Extract the size and value series from benchmark output lines.
    ///
    /// Everything up to and including the `avg`/`min`/`max` header is
    /// ignored. After that, every non-empty line that is not a known warning
    /// contributes one size and one value.
    ///
    /// A token that fails to convert is handled asymmetrically. If its series
    /// is still empty the output is considered malformed and an error is
    /// returned. Otherwise the token is assumed to start a trailing summary,
    /// and extraction stops with the points read so far. A corrupted row in
    /// the middle of a table therefore truncates the result silently, apart
    /// from a warning in the log.
    ///
    /// The two series normally have the same length; a row that ends or
    /// fails between the size and value columns leaves one extra size.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Result<(Vec<f64>, Vec<f64>)> {
        let mut sizes = Vec::new();
        let mut values = Vec::new();
        let mut collecting = false;

        'lines: for line in lines {
            let line = line.as_ref();

            if line.is_empty() {
                continue;
            }
            if !collecting {
                if is_header_line(line) {
                    debug!("Found column header: {}", line.trim());
                    collecting = true;
                }
                continue;
            }
            if self.is_noise_line(line) {
                debug!("Skipping warning line");
                continue;
            }

            let tokens = line.split(' ').filter(|t| !t.is_empty());
            for (idx, token) in (1..).zip(tokens) {
                let series = if idx == self.layout.size_column {
                    &mut sizes
                } else if idx == self.layout.value_column {
                    &mut values
                } else {
                    continue;
                };

                match token.parse::<f64>() {
                    Ok(v) => series.push(v),
                    Err(source) if series.is_empty() => {
                        return Err(Error::Conversion {
                            token: token.to_string(),
                            line: line.to_string(),
                            source,
                        });
                    }
                    Err(e) => {
                        warn!(
                            "stop parsing, unable to convert {} (from {}): {}",
                            token, line, e
                        );
                        break 'lines;
                    }
                }

                if idx == self.layout.value_column {
                    break;
                }
            }
        }

        Ok((sizes, values))
    }

    /// Parse in-memory perftest output. `origin` names the output in errors
    /// and in the returned result.
    pub fn parse_content(&self, origin: &str, content: &str) -> Result<BenchmarkResult> {
        let lines: Vec<&str> = content.lines().collect();

        if !is_perftest_data(&lines) {
            return Err(Error::NotRecognizedFormat {
                path: origin.to_string(),
            });
        }

        let (sizes, values) = self
            .extract(&lines)
            .map_err(|e| Error::in_file(origin, e))?;

        if sizes.len() != values.len() {
            return Err(Error::LengthMismatch {
                path: origin.to_string(),
                sizes: sizes.len(),
                values: values.len(),
            });
        }

        debug!("Extracted {} data points from {}", sizes.len(), origin);

        Ok(BenchmarkResult::from_series(&sizes, &values).with_source(origin))
    }

    /// Parse a single perftest output file
    pub fn parse_file(&self, path: &Path) -> Result<BenchmarkResult> {
        info!("Parsing result file {}", path.display());

        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);

        self.parse_content(&path.display().to_string(), &content)
    }

    /// Parse several files in order, stopping at the first failure
    pub fn parse_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<BenchmarkResults> {
        let mut results = BenchmarkResults::new();
        for path in paths {
            results.push(self.parse_file(path.as_ref())?);
        }

        Ok(results)
    }
}

/// Extract the size and value series using the default layout
pub fn extract_data_from_output<S: AsRef<str>>(lines: &[S]) -> Result<(Vec<f64>, Vec<f64>)> {
    PerftestParser::new()?.extract(lines)
}

/// Parse a perftest output file using the default layout
pub fn parse_output_file<P: AsRef<Path>>(path: P) -> Result<BenchmarkResult> {
    PerftestParser::new()?.parse_file(path.as_ref())
}

/// Parse a list of perftest output files using the default layout
pub fn get_results_from_files<P: AsRef<Path>>(paths: &[P]) -> Result<BenchmarkResults> {
    PerftestParser::new()?.parse_files(paths)
}
