//! Statistical summaries for calibration diagnostics.
//!
//! This crate provides [`descriptive::DescriptiveStats`], the summary type
//! the search strategies use to report fitness distributions and per-index
//! weight spread across a population. The normalized standard deviation
//! (`std_dev / range`) is the convergence measure: it falls toward zero as
//! a population collapses onto one solution.
//!
//! # Examples
//!
//! ```
//! use evotune_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```

pub use self::descriptive::DescriptiveStats;

pub mod descriptive;
