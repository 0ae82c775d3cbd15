//! Core report types for the activity helper
//!
//! This module defines the data structures emitted on standard output: the date key
//! being collected, the discovered markdown files, the commits of that day, and the
//! combined report that wraps them.

use chrono::{Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Format used for date keys in filenames and in the report
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar date rendered as `YYYY-MM-DD`
///
/// The same string is matched against filenames and used as the day boundary
/// for the commit query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Date key for the current day on the local clock
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse a `YYYY-MM-DD` string
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(value.trim(), DATE_KEY_FORMAT).map(Self)
    }

    /// The underlying calendar date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Lower bound of the commit window, `<date> 00:00`
    pub fn day_start(&self) -> String {
        format!("{} 00:00", self)
    }

    /// Upper bound of the commit window, `<date> 23:59`
    pub fn day_end(&self) -> String {
        format!("{} 23:59", self)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A markdown file whose name contains the date key
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path of the file
    pub path: String,
    /// File size in bytes
    pub size: u64,
    /// Base filename
    pub name: String,
}

/// One commit from the day's `git log`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommitEntry {
    /// Abbreviated commit hash, kept verbatim
    pub hash: String,
    /// Commit subject, truncated
    pub msg: String,
}

/// The single record written to standard output
///
/// Field order here is the key order of the emitted JSON object.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Report {
    pub date: DateKey,
    pub learnings: Vec<FileEntry>,
    pub retrospectives: Vec<FileEntry>,
    pub drafts: Vec<FileEntry>,
    pub commits: Vec<CommitEntry>,
}

impl Report {
    /// A report with every section empty
    pub fn empty(date: DateKey) -> Self {
        Self {
            date,
            learnings: Vec::new(),
            retrospectives: Vec::new(),
            drafts: Vec::new(),
            commits: Vec::new(),
        }
    }

    /// Serialize to a single line of JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to indented, multi-line JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Total number of files and commits in the report
    pub fn item_count(&self) -> usize {
        self.learnings.len() + self.retrospectives.len() + self.drafts.len() + self.commits.len()
    }
}
