//! Markup record extractor: turns one proceedings listing page into typed
//! paper records.
//!
//! The listing is a definition list: each `dt.ptitle` marker is followed by
//! two `dd` blocks, the author-search forms and the bibliographic reference.
//! All four structural pieces (title, link, authors block, reference block)
//! must be present for a record to be emitted; anything less is a typed
//! skip, never an error.

use crate::core::bibref;
use crate::domain::model::{PaperRecord, SkipReason};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

struct ListingSelectors {
    title_entry: Selector,
    link: Selector,
    author_form: Selector,
    author_input: Selector,
    bibref_div: Selector,
}

static SELECTORS: LazyLock<ListingSelectors> = LazyLock::new(|| ListingSelectors {
    title_entry: Selector::parse("dt.ptitle").expect("valid title entry selector"),
    link: Selector::parse("a").expect("valid link selector"),
    author_form: Selector::parse("form.authsearch").expect("valid author form selector"),
    author_input: Selector::parse(r#"input[name="query_author"]"#)
        .expect("valid author input selector"),
    bibref_div: Selector::parse("div.bibref").expect("valid bibref selector"),
});

/// Everything one page yields: records in document order, the month field
/// of the first emitted record (if any), and the skips encountered.
#[derive(Debug, Default)]
pub struct PageExtraction {
    pub records: Vec<PaperRecord>,
    pub month: Option<String>,
    pub skipped: Vec<SkipReason>,
}

/// Single pass over one listing page. `base_url` resolves relative paper
/// links to absolute addresses.
pub fn extract_page(html: &str, base_url: &Url) -> PageExtraction {
    let document = Html::parse_document(html);
    let mut page = PageExtraction::default();

    let entries: Vec<ElementRef> = document.select(&SELECTORS.title_entry).collect();
    tracing::debug!("found {} title entries", entries.len());

    for entry in entries {
        match extract_entry(entry, base_url) {
            Ok((record, bibref_text)) => {
                if page.records.is_empty() {
                    page.month = bibref::month(&bibref_text);
                }
                page.records.push(record);
            }
            Err(reason) => {
                tracing::debug!("skipping entry: {}", reason);
                page.skipped.push(reason);
            }
        }
    }

    page
}

/// One title entry to one record, or the reason it cannot be one. Returns
/// the raw reference text alongside so the caller can derive the month
/// without a second parse.
fn extract_entry(
    entry: ElementRef,
    base_url: &Url,
) -> Result<(PaperRecord, String), SkipReason> {
    let link = entry
        .select(&SELECTORS.link)
        .next()
        .ok_or(SkipReason::MissingTitleLink)?;

    let title = link.text().collect::<String>().trim().to_string();
    if title.is_empty() {
        return Err(SkipReason::MissingTitleLink);
    }

    let url = resolve_href(link.value().attr("href"), base_url);

    let authors_block = next_dd(entry).ok_or(SkipReason::MissingAuthorsBlock)?;
    let authors = extract_authors(authors_block);

    let reference_block = next_dd(authors_block).ok_or(SkipReason::MissingReferenceBlock)?;
    let bibref_text = reference_block
        .select(&SELECTORS.bibref_div)
        .next()
        .map(|div| div.text().collect::<String>().trim().to_string())
        .ok_or(SkipReason::MissingReferenceBlock)?;

    let record = PaperRecord {
        title,
        authors,
        url,
        doi: bibref::doi(&bibref_text),
        pages: bibref::pages(&bibref_text),
    };

    Ok((record, bibref_text))
}

/// Already-absolute targets are kept as-is; relative ones are joined
/// against the base the page was fetched from. A missing href leaves the
/// URL empty (unresolved), which is allowed.
fn resolve_href(href: Option<&str>, base_url: &Url) -> String {
    let href = href.unwrap_or("");
    if href.is_empty() || href.starts_with("http") {
        return href.to_string();
    }
    match base_url.join(href) {
        Ok(absolute) => absolute.to_string(),
        Err(e) => {
            tracing::warn!("failed to join {} against {}: {}", href, base_url, e);
            href.to_string()
        }
    }
}

fn extract_authors(authors_block: ElementRef) -> Vec<String> {
    let mut authors = Vec::new();
    for form in authors_block.select(&SELECTORS.author_form) {
        let value_attr = form
            .select(&SELECTORS.author_input)
            .next()
            .and_then(|input| input.value().attr("value"));
        let anchor_text = form
            .select(&SELECTORS.link)
            .next()
            .map(|a| a.text().collect::<String>());
        if let Some(name) = bibref::resolve_author(value_attr, anchor_text.as_deref()) {
            authors.push(name);
        }
    }
    authors
}

/// The next `dd` sibling element, skipping text nodes between tags.
fn next_dd(element: ElementRef) -> Option<ElementRef> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "dd")
}
