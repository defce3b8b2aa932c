//! readstat-core — Data model, dataset parsing, and aggregation statistics.
//!
//! This crate defines the assessment and student records, loads datasets
//! from TOML, and computes the summary values that the report crate renders.

pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
