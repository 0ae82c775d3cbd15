use crate::error::CollectorError;
use crate::report::{CommitEntry, DateKey};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// `git log` pretty format: abbreviated hash and subject joined by `|`
pub const LOG_FORMAT: &str = "--format=%h|%s";

/// Separator between hash and subject in each log line
const FIELD_SEPARATOR: char = '|';

/// Source of raw `git log` output for one day
#[cfg_attr(test, mockall::automock)]
pub trait GitLog {
    /// Return the raw stdout of a one-line log query for commits made on `date`
    fn log_for_day(&self, repo: &Path, date: &DateKey) -> Result<String, CollectorError>;
}

/// Runs the `git` executable as a subprocess
pub struct GitCli {
    binary: String,
}

impl GitCli {
    /// Create a GitCli that invokes `binary` (usually just `git`)
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments passed to git for a day's log
    fn log_args(repo: &Path, date: &DateKey) -> Vec<String> {
        vec![
            "-C".to_string(),
            repo.to_string_lossy().into_owned(),
            "log".to_string(),
            "--oneline".to_string(),
            "--after".to_string(),
            date.day_start(),
            "--before".to_string(),
            date.day_end(),
            LOG_FORMAT.to_string(),
        ]
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitLog for GitCli {
    fn log_for_day(&self, repo: &Path, date: &DateKey) -> Result<String, CollectorError> {
        let args = Self::log_args(repo, date);
        debug!("Running {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| CollectorError::SubprocessSpawn(format!("{}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CollectorError::SubprocessFailed(format!(
                "{} log ({}): {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Collects the commits made in a repository on a given day
pub struct CommitCollector<G: GitLog> {
    git: G,
    repo: PathBuf,
    message_limit: usize,
}

impl<G: GitLog> CommitCollector<G> {
    /// Create a new CommitCollector
    ///
    /// # Arguments
    ///
    /// * `git` - Source of `git log` output
    /// * `repo` - Repository to query
    /// * `message_limit` - Maximum number of characters kept from each subject
    pub fn new(git: G, repo: impl Into<PathBuf>, message_limit: usize) -> Self {
        Self {
            git,
            repo: repo.into(),
            message_limit,
        }
    }

    /// Query and parse the commits made on `date`
    ///
    /// # Errors
    ///
    /// Returns the underlying `CollectorError` when git cannot be run or exits unsuccessfully.
    pub fn collect(&self, date: &DateKey) -> Result<Vec<CommitEntry>, CollectorError> {
        let stdout = self.git.log_for_day(&self.repo, date)?;
        let commits = parse_log_output(&stdout, self.message_limit);
        info!(
            "Found {} commit(s) for {} in {}",
            commits.len(),
            date,
            self.repo.display()
        );
        Ok(commits)
    }
}

/// Parse `<hash>|<subject>` lines into commit entries
///
/// Lines without a `|` are dropped. The subject is everything after the first `|`,
/// cut to at most `message_limit` characters.
pub fn parse_log_output(stdout: &str, message_limit: usize) -> Vec<CommitEntry> {
    stdout
        .trim()
        .lines()
        .filter_map(|line| parse_log_line(line, message_limit))
        .collect()
}

/// Parse a single log line, `None` if it has no separator
///
/// Only the first `|` separates the fields, so a subject containing `|` is kept
/// whole rather than cut at its own separator.
pub fn parse_log_line(line: &str, message_limit: usize) -> Option<CommitEntry> {
    let (hash, subject) = line.split_once(FIELD_SEPARATOR)?;
    Some(CommitEntry {
        hash: hash.to_string(),
        msg: truncate_chars(subject, message_limit),
    })
}

/// Keep at most `limit` characters of `text`
fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}


// Property-based tests
#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    /// A single line of `git log` output, with or without the separator
    #[derive(Debug, Clone)]
    struct LogLine {
        hash: String,
        subject: String,
        has_separator: bool,
    }

    impl LogLine {
        fn render(&self) -> String {
            if self.has_separator {
                format!("{}|{}", self.hash, self.subject)
            } else {
                format!("{} {}", self.hash, self.subject)
            }
        }
    }

    impl Arbitrary for LogLine {
        fn arbitrary(g: &mut Gen) -> Self {
            let hex = b"0123456789abcdef";
            let hash: String = (0..7)
                .map(|_| *g.choose(hex).unwrap() as char)
                .collect();
            let subject: String = String::arbitrary(g)
                .chars()
                .filter(|c| *c != '\n' && *c != '\r' && *c != '|')
                .collect();
            LogLine {
                hash,
                subject,
                has_separator: bool::arbitrary(g),
            }
        }
    }

    // Every parsed message fits the limit
    #[quickcheck]
    fn prop_messages_never_exceed_limit(lines: Vec<LogLine>, limit: u8) -> bool {
        let limit = usize::from(limit % 120) + 1;
        let stdout: Vec<String> = lines.iter().map(LogLine::render).collect();
        parse_log_output(&stdout.join("\n"), limit)
            .iter()
            .all(|c| c.msg.chars().count() <= limit)
    }

    // Only lines with a separator produce entries, and hashes survive verbatim
    #[quickcheck]
    fn prop_only_separated_lines_produce_entries(lines: Vec<LogLine>) -> bool {
        let stdout: Vec<String> = lines.iter().map(LogLine::render).collect();
        let commits = parse_log_output(&stdout.join("\n"), 60);

        let expected: Vec<&LogLine> = lines.iter().filter(|l| l.has_separator).collect();
        commits.len() == expected.len()
            && commits
                .iter()
                .zip(expected)
                .all(|(c, l)| c.hash == l.hash && l.subject.starts_with(&c.msg))
    }
}
