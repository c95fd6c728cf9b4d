//! Host-side pieces of the `intcode` runner: input-list parsing and the
//! stderr reporting sink.

#[cfg(test)]
use tempfile as _;

/// Parsing of the `--input` value list.
pub mod inputs;
pub use inputs::parse_input_list;

/// Trace sink that renders execution reports to a writer.
pub mod report;
pub use report::{ReportOptions, ReportSink};
