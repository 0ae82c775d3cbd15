/// Dated markdown file collector for workspace folders
pub mod file_collector;

/// Commit collector backed by `git log`
pub mod commit_collector;

pub use commit_collector::{CommitCollector, GitCli, GitLog};
pub use file_collector::FileCollector;
