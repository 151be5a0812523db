pub mod venues;

use crate::domain::model::{Conference, DayPartition, SourceMode};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{HarvestError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::Parser;
use venues::VenueCatalog;

/// One binary for every fetch variant: the proceedings index with the
/// `all` sentinel (default), an explicit day list, an inclusive date
/// range, or the conference site's accepted-papers listing.
#[derive(Debug, Clone, Parser)]
#[command(name = "cvf-harvest")]
#[command(about = "Scrape CVF open-access proceedings into per-conference JSON")]
pub struct CliConfig {
    /// Conference identifier (CVPR, ICCV or WACV)
    pub conference: String,

    /// Conference year
    pub year: i32,

    /// Explicit day partitions, comma-separated ISO dates
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<NaiveDate>,

    /// First day of an inclusive date range (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day of an inclusive date range (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Harvest the accepted-papers listing (CVPR 2023 onwards) instead of
    /// the open-access proceedings index
    #[arg(long)]
    pub accepted_papers: bool,

    /// Candidate base URLs, tried in order; defaults to the site matching
    /// the selected source
    #[arg(long = "base-url")]
    pub base_urls: Vec<String>,

    #[arg(long, default_value = "./conf")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("conference", &self.conference)?;
        let (conference, _) = VenueCatalog::builtin().resolve(&self.conference)?;
        validation::validate_range("year", self.year, 1988, 2100)?;

        for url in ConfigProvider::base_urls(self) {
            validation::validate_url("base_url", &url)?;
        }
        validation::validate_path("output_path", &self.output_path)?;

        if self.accepted_papers {
            if conference != Conference::Cvpr {
                return Err(HarvestError::config(
                    "--accepted-papers is only published for CVPR",
                ));
            }
            validation::validate_range("year", self.year, 2023, 2100)?;
            if !self.days.is_empty() || self.start_date.is_some() || self.end_date.is_some() {
                return Err(HarvestError::config(
                    "--accepted-papers has no day partitions; drop --days/--start-date/--end-date",
                ));
            }
            return Ok(());
        }

        if !self.days.is_empty() && (self.start_date.is_some() || self.end_date.is_some()) {
            return Err(HarvestError::config(
                "--days and --start-date/--end-date are mutually exclusive",
            ));
        }
        validation::validate_date_range("date range", self.start_date, self.end_date, self.year)?;

        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn conference(&self) -> Result<Conference> {
        self.conference.parse()
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn partitions(&self) -> Result<Vec<DayPartition>> {
        if !self.days.is_empty() {
            return Ok(self.days.iter().copied().map(DayPartition::Day).collect());
        }

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                let mut partitions = Vec::new();
                let mut current = start;
                while current <= end {
                    partitions.push(DayPartition::Day(current));
                    current = current.succ_opt().ok_or_else(|| {
                        HarvestError::config(format!("date overflow after {}", current))
                    })?;
                }
                Ok(partitions)
            }
            (None, None) => Ok(vec![DayPartition::All]),
            _ => Err(HarvestError::MissingConfigError {
                field: "start_date/end_date (both are required for a date range)".to_string(),
            }),
        }
    }

    fn source(&self) -> SourceMode {
        if self.accepted_papers {
            SourceMode::AcceptedPapers
        } else {
            SourceMode::Proceedings
        }
    }

    fn base_urls(&self) -> Vec<String> {
        if !self.base_urls.is_empty() {
            return self.base_urls.clone();
        }
        let default = match ConfigProvider::source(self) {
            SourceMode::Proceedings => "https://openaccess.thecvf.com",
            SourceMode::AcceptedPapers => "https://cvpr.thecvf.com",
        };
        vec![default.to_string()]
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}
