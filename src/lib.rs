/// Error types for collectors and configuration
pub mod error;

/// Report data types and JSON serialization
pub mod report;

/// Data collectors for workspace files and git commits
pub mod collectors;

/// Report aggregator combining all collectors
pub mod aggregator;

/// Configuration management
pub mod config;

// Re-export commonly used types
pub use aggregator::ReportAggregator;
pub use error::{CollectorError, ConfigError};
pub use report::{CommitEntry, DateKey, FileEntry, Report};
