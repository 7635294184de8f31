//! perftest-core - Parsing for ucc_perftest benchmark output
//!
//! This crate turns the text printed by `ucc_perftest` runs into
//! (message size, value) data points.
//!
//! # Features
//!
//! - Detect ucc_perftest output by its `Collective:` marker
//! - Extract the size and value columns, skipping Open MPI warning noise
//! - Load one file or a batch of files into result structures
//! - Render results as tab-separated text or JSON
//!
//! # Example
//!
//! ```no_run
//! use perftest_core::parse_output_file;
//!
//! let result = parse_output_file("allreduce.txt").unwrap();
//! for point in &result.data_points {
//!     println!("{}\t{}", point.size, point.value);
//! }
//! ```

pub mod data;
pub mod error;
pub mod parser;

pub use data::{BenchmarkResult, BenchmarkResults, DataPoint};
pub use error::{Error, Result};
pub use parser::{
    extract_data_from_output, get_results_from_files, is_perftest_data, parse_output_file,
    ColumnLayout, PerftestParser,
};
