use crate::utils::error::{HarvestError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One paper scraped from a proceedings listing. Never mutated after
/// construction. Field names match the published JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Authors")]
    pub authors: Vec<String>,
    #[serde(rename = "Url")]
    pub url: String,
    #[serde(rename = "DOI")]
    pub doi: String,
    #[serde(rename = "Pages")]
    pub pages: String,
}

/// Top-level output record: conference metadata wrapping the paper list.
/// `month` is filled from the first record of the first fetched partition
/// and omitted from the output when never discovered.
#[derive(Debug, Clone, Serialize)]
pub struct ConferenceEnvelope {
    #[serde(rename = "Conference Name")]
    pub conference_name: String,
    #[serde(rename = "Proceeding Name")]
    pub proceeding_name: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Publisher")]
    pub publisher: String,
    #[serde(rename = "Month", skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(rename = "Papers")]
    pub papers: Vec<PaperRecord>,
}

/// Accumulated extraction output, before it is wrapped into an envelope.
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub records: Vec<PaperRecord>,
    pub month: Option<String>,
}

/// A date key slicing a paginated listing: one ISO day, or the `all`
/// sentinel requesting every entry at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPartition {
    All,
    Day(NaiveDate),
}

impl fmt::Display for DayPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPartition::All => f.write_str("all"),
            DayPartition::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Which listing a harvest reads. `Proceedings` is the open-access index
/// sliced by day partitions; `AcceptedPapers` is the conference site's
/// accepted-papers table (CVPR 2023 onwards), a single unpartitioned page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    #[default]
    Proceedings,
    AcceptedPapers,
}

/// Why an entry was dropped during extraction. Logged rather than silently
/// discarded; a skipped entry never aborts the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitleLink,
    MissingAuthorsBlock,
    MissingReferenceBlock,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::MissingTitleLink => "entry has no title link",
            SkipReason::MissingAuthorsBlock => "entry has no authors block",
            SkipReason::MissingReferenceBlock => "entry has no bibliographic reference block",
        };
        f.write_str(text)
    }
}

/// Closed set of supported venue identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conference {
    Cvpr,
    Iccv,
    Wacv,
}

impl Conference {
    /// Canonical identifier as it appears in listing URLs and output paths.
    pub fn id(&self) -> &'static str {
        match self {
            Conference::Cvpr => "CVPR",
            Conference::Iccv => "ICCV",
            Conference::Wacv => "WACV",
        }
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Conference {
    type Err = HarvestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CVPR" => Ok(Conference::Cvpr),
            "ICCV" => Ok(Conference::Iccv),
            "WACV" => Ok(Conference::Wacv),
            other => Err(HarvestError::ConfigError {
                message: format!(
                    "unknown conference identifier: {} (expected CVPR, ICCV or WACV)",
                    other
                ),
            }),
        }
    }
}
