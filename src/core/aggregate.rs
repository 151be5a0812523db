//! Day-range aggregation: one fetch per day partition, extraction, and
//! title-level deduplication across partitions.

use crate::core::extract;
use crate::domain::model::{Conference, DayPartition, Harvest, PaperRecord};
use crate::domain::ports::Fetcher;
use crate::utils::error::{HarvestError, Result};
use std::collections::HashSet;
use url::Url;

/// Drives the extractor across a list of date partitions. Venue listings
/// paginate by day for some conferences; a single `all` request is either
/// unsupported or incomplete there, hence the multi-day mode.
pub struct DayRangeAggregator<'a, F: Fetcher> {
    fetcher: &'a F,
    base_urls: &'a [String],
}

impl<'a, F: Fetcher> DayRangeAggregator<'a, F> {
    pub fn new(fetcher: &'a F, base_urls: &'a [String]) -> Self {
        Self { fetcher, base_urls }
    }

    /// Sequentially fetch and extract every partition. A partition that
    /// cannot be fetched is logged and skipped; only a run in which no
    /// partition succeeds is an error. Records are deduplicated by title
    /// at the end, first occurrence wins.
    pub async fn harvest(
        &self,
        conference: Conference,
        year: i32,
        partitions: &[DayPartition],
    ) -> Result<Harvest> {
        let mut harvest = Harvest::default();
        let mut fetched_partitions = 0usize;

        for partition in partitions {
            let Some((body, base_url)) = self.fetch_partition(conference, year, *partition).await
            else {
                continue;
            };
            fetched_partitions += 1;

            let page = extract::extract_page(&body, &base_url);
            tracing::info!(
                "day {}: {} records extracted, {} entries skipped",
                partition,
                page.records.len(),
                page.skipped.len()
            );

            if harvest.month.is_none() {
                harvest.month = page.month;
            }
            harvest.records.extend(page.records);
        }

        if fetched_partitions == 0 {
            return Err(HarvestError::processing(format!(
                "unable to fetch {}{} paper data from any base URL",
                conference, year
            )));
        }

        harvest.records = dedup_by_title(harvest.records);
        Ok(harvest)
    }

    /// One attempt per candidate base URL, in preference order. Transport
    /// failures and non-2xx statuses are treated identically: log and try
    /// the next candidate.
    async fn fetch_partition(
        &self,
        conference: Conference,
        year: i32,
        partition: DayPartition,
    ) -> Option<(String, Url)> {
        for base in self.base_urls {
            let url = format!(
                "{}/{}{}?day={}",
                base.trim_end_matches('/'),
                conference,
                year,
                partition
            );
            tracing::info!("attempting to access: {}", url);

            match self.fetcher.fetch(&url).await {
                Ok(response) if (200..300).contains(&response.status) => {
                    tracing::info!("successfully accessed: {}", url);
                    match Url::parse(base) {
                        Ok(base_url) => return Some((response.body, base_url)),
                        Err(e) => {
                            tracing::warn!("unusable base URL {}: {}", base, e);
                        }
                    }
                }
                Ok(response) => {
                    tracing::warn!("failed to access {}: HTTP {}", url, response.status);
                }
                Err(e) => {
                    tracing::warn!("failed to access {}: {}", url, e);
                }
            }
        }

        tracing::warn!(
            "unable to fetch {}{} paper data for day {}",
            conference,
            year,
            partition
        );
        None
    }
}

/// First occurrence wins; order is otherwise preserved.
pub(crate) fn dedup_by_title(records: Vec<PaperRecord>) -> Vec<PaperRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.title.clone()))
        .collect()
}
