// Batsman comparison core: dataset loading, head-to-head comparison at a
// batting position, rank test, and report rendering.

pub mod charts;
pub mod compare;
pub mod config;
pub mod dataset;
pub mod report;
pub mod stats;

pub use compare::{compare, ComparisonOutcome, ComparisonRequest, ComparisonResult, Rejection};
pub use config::{CompareSettings, Config};
pub use dataset::{Dataset, InningsRecord};
