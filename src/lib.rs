pub mod bench;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod format;
pub mod metrics;
pub mod report;
pub mod signals;
pub mod stats;
pub mod style;
pub mod walker;
