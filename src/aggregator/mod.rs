/// Combines the collectors into one report
pub mod report_aggregator;

pub use report_aggregator::ReportAggregator;
