//! Feedcheck is a CI health checker for transit data feed sources.
//!
//! It reads configuration-declared feed descriptors (static GTFS
//! datasets and realtime updaters), validates each record against its
//! required-field schema, and probes the declared endpoint with
//! category-specific acceptance rules: ZIP-signature sniffing for
//! static feeds, protobuf/JSON sniffing plus lenient 204/429 handling
//! for realtime feeds. The process exit status feeds the CI gate.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (gtfs, realtime, validate).
//! - [`dataset`] -- Descriptor document loading, environment placeholder
//!   substitution, and pure structural validation.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`probe`] -- Reachability probing: retrying HTTP GET with per-category
//!   acceptance policies and first-kilobyte content sniffing.
//! - [`report`] -- Check results, aggregate statistics, and the colored
//!   console report.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod probe;
pub mod report;
