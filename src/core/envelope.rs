//! Conference envelope assembly: venue display names, fixed publisher,
//! and the aggregated paper list.

use crate::config::venues::VenueCatalog;
use crate::domain::model::{Conference, ConferenceEnvelope, Harvest, SourceMode};

pub const PUBLISHER: &str = "IEEE";

pub fn build(
    catalog: &VenueCatalog,
    conference: Conference,
    year: i32,
    source: SourceMode,
    harvest: Harvest,
) -> ConferenceEnvelope {
    let names = catalog.names(conference);
    let proceeding_name = match source {
        SourceMode::Proceedings => names.proceeding_name,
        // the conference site publishes it without the abbreviation suffix
        SourceMode::AcceptedPapers => names.plain_proceeding_name,
    };
    ConferenceEnvelope {
        conference_name: names.conference_name_for(year),
        proceeding_name: proceeding_name.to_string(),
        year,
        publisher: PUBLISHER.to_string(),
        month: harvest.month,
        papers: harvest.records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PaperRecord;

    #[test]
    fn builds_envelope_with_venue_names_and_publisher() {
        let harvest = Harvest {
            records: vec![PaperRecord {
                title: "A".to_string(),
                authors: vec!["Jane Q. Doe".to_string()],
                url: "https://example.com/a.html".to_string(),
                doi: String::new(),
                pages: "1--2".to_string(),
            }],
            month: Some("June".to_string()),
        };

        let envelope = build(
            &VenueCatalog::builtin(),
            Conference::Cvpr,
            2020,
            SourceMode::Proceedings,
            harvest,
        );

        assert_eq!(
            envelope.conference_name,
            "2020 IEEE/CVF Conference on Computer Vision and Pattern Recognition"
        );
        assert_eq!(
            envelope.proceeding_name,
            "Proceedings of the IEEE/CVF Conference on Computer Vision and Pattern Recognition (CVPR)"
        );
        assert_eq!(envelope.publisher, "IEEE");
        assert_eq!(envelope.year, 2020);
        assert_eq!(envelope.month.as_deref(), Some("June"));
        assert_eq!(envelope.papers.len(), 1);
    }

    #[test]
    fn accepted_papers_source_drops_abbreviation_suffix() {
        let envelope = build(
            &VenueCatalog::builtin(),
            Conference::Cvpr,
            2023,
            SourceMode::AcceptedPapers,
            Harvest::default(),
        );

        assert_eq!(
            envelope.proceeding_name,
            "Proceedings of the IEEE/CVF Conference on Computer Vision and Pattern Recognition"
        );
        assert_eq!(
            envelope.conference_name,
            "2023 IEEE/CVF Conference on Computer Vision and Pattern Recognition"
        );
    }
}
