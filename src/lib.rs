//! Core library for the `steadyload` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration files, request admission and execution, outcome
//! sampling, and the live terminal report. The primary user-facing interface
//! is the `steadyload` command-line application.
mod app;
pub mod args;
pub mod config;
mod entry;
pub mod error;
pub mod http;
mod logger;
pub mod metrics;
mod shutdown;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use entry::run;
