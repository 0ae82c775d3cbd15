//! Report aggregation
//!
//! Runs the three folder scans and the commit query for one date and merges their
//! results into a single `Report`. Each lookup is best-effort: a lookup that fails
//! contributes an empty section and the rest of the report is still produced.

use crate::collectors::{CommitCollector, FileCollector, GitCli, GitLog};
use crate::config::Config;
use crate::error::CollectorError;
use crate::report::{DateKey, Report};
use log::debug;

/// Builds a `Report` from the configured collectors
pub struct ReportAggregator<G: GitLog> {
    files: FileCollector,
    commits: CommitCollector<G>,
    learnings_folder: String,
    retrospectives_folder: String,
    drafts_folder: String,
}

impl ReportAggregator<GitCli> {
    /// Create an aggregator that scans the configured workspace and runs the real git binary
    pub fn from_config(config: &Config) -> Self {
        Self::with_git(config, GitCli::new(config.git.binary.clone()))
    }
}

impl<G: GitLog> ReportAggregator<G> {
    /// Create an aggregator with a custom git log source
    pub fn with_git(config: &Config, git: G) -> Self {
        Self {
            files: FileCollector::new(config.workspace_dir()),
            commits: CommitCollector::new(git, config.repo_dir(), config.git.message_limit),
            learnings_folder: config.workspace.learnings.clone(),
            retrospectives_folder: config.workspace.retrospectives.clone(),
            drafts_folder: config.workspace.drafts.clone(),
        }
    }

    /// Collect everything recorded on `date`
    ///
    /// Never fails: lookup errors are logged at debug level and leave their section empty.
    pub fn build(&self, date: &DateKey) -> Report {
        let report = Report {
            date: *date,
            learnings: or_empty(
                "learnings",
                self.files.scan(&self.learnings_folder, date),
            ),
            retrospectives: or_empty(
                "retrospectives",
                self.files.scan(&self.retrospectives_folder, date),
            ),
            drafts: or_empty("drafts", self.files.scan(&self.drafts_folder, date)),
            commits: or_empty("commits", self.commits.collect(date)),
        };

        debug!(
            "Report for {} holds {} item(s)",
            report.date,
            report.item_count()
        );
        report
    }
}

/// Degrade a failed lookup to an empty section
fn or_empty<T>(section: &str, result: Result<Vec<T>, CollectorError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        debug!("No {} in report: {}", section, e);
        Vec::new()
    })
}
