//! Live terminal report.
mod formatting;
mod report;

#[cfg(test)]
mod tests;

pub use formatting::{format_duration, format_rps_x100};
pub use report::{Reporter, report_lines};
