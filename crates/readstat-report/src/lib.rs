//! readstat-report — HTML rendering for readstat reports.
//!
//! Consumes the plain values produced by `readstat-core` and turns them into
//! a self-contained HTML page with tables and inline SVG bar charts.

pub mod chart;
pub mod format;
pub mod html;
