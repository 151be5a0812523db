//! Accepted-papers extractor: the conference site's `AcceptedPapers` table,
//! used for CVPR years whose open-access proceedings are not yet published.
//!
//! The table has one `<tr>` per paper: the title sits in `<strong>` (or a
//! bare `<a>`), the author list in `div.indented` with `·` separators.
//! Rows without both pieces are layout rows, not papers. No URL, DOI,
//! pages, or month exist on this listing.

use crate::core::aggregate::dedup_by_title;
use crate::domain::model::{Harvest, PaperRecord};
use crate::domain::ports::Fetcher;
use crate::utils::error::{HarvestError, Result};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

struct TableSelectors {
    row: Selector,
    title_strong: Selector,
    link: Selector,
    authors_div: Selector,
}

static SELECTORS: LazyLock<TableSelectors> = LazyLock::new(|| TableSelectors {
    row: Selector::parse("tr").expect("valid row selector"),
    title_strong: Selector::parse("strong").expect("valid title selector"),
    link: Selector::parse("a").expect("valid link selector"),
    authors_div: Selector::parse("div.indented").expect("valid authors selector"),
});

/// Single pass over the accepted-papers page, records in document order.
pub fn extract_accepted_page(html: &str) -> Vec<PaperRecord> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for row in document.select(&SELECTORS.row) {
        if let Some(record) = extract_row(row) {
            records.push(record);
        }
    }

    tracing::debug!("found {} accepted papers", records.len());
    records
}

fn extract_row(row: ElementRef) -> Option<PaperRecord> {
    let title_element = row
        .select(&SELECTORS.title_strong)
        .next()
        .or_else(|| row.select(&SELECTORS.link).next())?;
    let authors_div = row.select(&SELECTORS.authors_div).next()?;

    let title = title_element.text().collect::<String>().trim().to_string();
    if title.is_empty() {
        return None;
    }

    let authors = authors_div
        .text()
        .collect::<String>()
        .split('·')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    Some(PaperRecord {
        title,
        authors,
        url: String::new(),
        doi: String::new(),
        pages: String::new(),
    })
}

/// Fetches the single accepted-papers page, trying each candidate base URL
/// once. There are no partitions to fall back to, so a run in which no
/// base URL answers is an error.
pub struct AcceptedPapersHarvester<'a, F: Fetcher> {
    fetcher: &'a F,
    base_urls: &'a [String],
}

impl<'a, F: Fetcher> AcceptedPapersHarvester<'a, F> {
    pub fn new(fetcher: &'a F, base_urls: &'a [String]) -> Self {
        Self { fetcher, base_urls }
    }

    pub async fn harvest(&self, year: i32) -> Result<Harvest> {
        for base in self.base_urls {
            let url = format!(
                "{}/Conferences/{}/AcceptedPapers",
                base.trim_end_matches('/'),
                year
            );
            tracing::info!("attempting to access: {}", url);

            match self.fetcher.fetch(&url).await {
                Ok(response) if (200..300).contains(&response.status) => {
                    tracing::info!("successfully accessed: {}", url);
                    let records = extract_accepted_page(&response.body);
                    return Ok(Harvest {
                        records: dedup_by_title(records),
                        month: None,
                    });
                }
                Ok(response) => {
                    tracing::warn!("failed to access {}: HTTP {}", url, response.status);
                }
                Err(e) => {
                    tracing::warn!("failed to access {}: {}", url, e);
                }
            }
        }

        Err(HarvestError::processing(format!(
            "unable to fetch the {} accepted-papers listing from any base URL",
            year
        )))
    }
}
