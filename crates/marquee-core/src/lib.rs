#![forbid(unsafe_code)]

//! Dataset model + chart configuration for the marquee treemap renderer.
//!
//! Design goals:
//! - deterministic, testable outputs (layout and SVG goldens live in
//!   `marquee-render`)
//! - no I/O at this layer; loading/caching is the CLI's job

pub mod config;
pub mod dataset;
pub mod error;

pub use config::ChartConfig;
pub use dataset::{SalesNode, parse_dataset, validate_dataset};
pub use error::{Error, Result};
