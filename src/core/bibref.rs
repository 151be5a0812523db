//! Field normalization: pure text-to-field transforms over the free-text
//! bibliographic reference blob and the author-search form values.

use regex::Regex;
use std::sync::LazyLock;

static PAGES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pages\s*=\s*\{([^}]*)\}").expect("valid pages regex"));
static DOI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"doi\s*=\s*\{([^}]*)\}").expect("valid doi regex"));
static MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"month\s*=\s*\{([^}]*)\}").expect("valid month regex"));

fn field(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// `pages = {123--130}` -> `123--130`; empty when the field is absent.
pub fn pages(bibref: &str) -> String {
    field(&PAGES_RE, bibref)
}

/// `doi = {10.1109/...}` -> `10.1109/...`; empty when the field is absent.
pub fn doi(bibref: &str) -> String {
    field(&DOI_RE, bibref)
}

/// `month = {October}` -> `Some("October")`; `None` when absent or blank.
pub fn month(bibref: &str) -> Option<String> {
    let value = field(&MONTH_RE, bibref);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Resolve one author name. The search-form `value` attribute is the
/// canonical spelling and takes precedence over the rendered anchor text,
/// which is less reliable for accented and non-Latin names. An attribute
/// that is present but blank does not fall through to the anchor.
pub fn resolve_author(value_attr: Option<&str>, anchor_text: Option<&str>) -> Option<String> {
    let name = match value_attr {
        Some(value) => value.trim().to_string(),
        None => anchor_text.map(|text| text.trim().to_string()).unwrap_or_default(),
    };
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIBREF: &str = "@InProceedings{Doe_2020_CVPR,\n\
        author = {Doe, Jane Q.},\n\
        title = {A Paper},\n\
        booktitle = {Proceedings},\n\
        month = {June},\n\
        year = {2020},\n\
        pages = {123--130},\n\
        doi = {10.1109/CVPR.2020.00001}\n}";

    #[test]
    fn extracts_pages_field() {
        assert_eq!(pages(BIBREF), "123--130");
        assert_eq!(pages("no such field here"), "");
    }

    #[test]
    fn extracts_doi_field() {
        assert_eq!(doi(BIBREF), "10.1109/CVPR.2020.00001");
        assert_eq!(doi("author = {X}"), "");
    }

    #[test]
    fn extracts_month_field() {
        assert_eq!(month(BIBREF).as_deref(), Some("June"));
        assert_eq!(month("pages = {1--2}"), None);
        assert_eq!(month("month = {}"), None);
    }

    #[test]
    fn tolerates_loose_whitespace_around_equals() {
        assert_eq!(pages("pages   =   {7--9}"), "7--9");
        assert_eq!(pages("pages={ 7--9 }"), "7--9");
    }

    #[test]
    fn author_value_attribute_wins_over_anchor_text() {
        assert_eq!(
            resolve_author(Some("Jane Q. Doe"), Some("J. Doe")).as_deref(),
            Some("Jane Q. Doe")
        );
    }

    #[test]
    fn author_falls_back_to_trimmed_anchor_text() {
        assert_eq!(
            resolve_author(None, Some("  José García  ")).as_deref(),
            Some("José García")
        );
    }

    #[test]
    fn blank_author_is_excluded() {
        assert_eq!(resolve_author(Some("   "), Some("J. Doe")), None);
        assert_eq!(resolve_author(None, None), None);
        assert_eq!(resolve_author(None, Some("")), None);
    }
}
