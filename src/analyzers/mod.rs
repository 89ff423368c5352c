//! Roster aggregation and letter grading.
//!
//! This module turns a validated roster into summary statistics, assigns
//! letter grades against the configured thresholds, and raises advisory
//! warnings about unusual grade distributions.

pub mod aggregate;
pub mod grade;
pub mod types;
pub mod utility;
