use crate::config::venues::VenueCatalog;
use crate::core::accepted::AcceptedPapersHarvester;
use crate::core::aggregate::DayRangeAggregator;
use crate::core::envelope;
use crate::domain::model::{ConferenceEnvelope, Harvest, SourceMode};
use crate::domain::ports::{ConfigProvider, Fetcher, Pipeline, Storage};
use crate::utils::error::{HarvestError, Result};
use serde::Serialize;

/// The whole harvest behind the extract/transform/load seam: aggregate
/// day partitions, wrap the records into an envelope, write one JSON
/// document. Nothing is written unless every stage succeeds.
pub struct HarvestPipeline<F: Fetcher, S: Storage, C: ConfigProvider> {
    fetcher: F,
    storage: S,
    config: C,
    venues: VenueCatalog,
}

impl<F: Fetcher, S: Storage, C: ConfigProvider> HarvestPipeline<F, S, C> {
    pub fn new(fetcher: F, storage: S, config: C) -> Self {
        Self::with_venues(fetcher, storage, config, VenueCatalog::builtin())
    }

    pub fn with_venues(fetcher: F, storage: S, config: C, venues: VenueCatalog) -> Self {
        Self {
            fetcher,
            storage,
            config,
            venues,
        }
    }
}

#[async_trait::async_trait]
impl<F: Fetcher, S: Storage, C: ConfigProvider> Pipeline for HarvestPipeline<F, S, C> {
    async fn extract(&self) -> Result<Harvest> {
        let base_urls = self.config.base_urls();

        match self.config.source() {
            SourceMode::Proceedings => {
                let conference = self.config.conference()?;
                let partitions = self.config.partitions()?;
                DayRangeAggregator::new(&self.fetcher, &base_urls)
                    .harvest(conference, self.config.year(), &partitions)
                    .await
            }
            SourceMode::AcceptedPapers => {
                AcceptedPapersHarvester::new(&self.fetcher, &base_urls)
                    .harvest(self.config.year())
                    .await
            }
        }
    }

    async fn transform(&self, harvest: Harvest) -> Result<ConferenceEnvelope> {
        if harvest.records.is_empty() {
            return Err(HarvestError::processing(
                "no papers extracted; refusing to write an empty envelope",
            ));
        }

        let conference = self.config.conference()?;
        Ok(envelope::build(
            &self.venues,
            conference,
            self.config.year(),
            self.config.source(),
            harvest,
        ))
    }

    async fn load(&self, envelope: ConferenceEnvelope) -> Result<String> {
        let conference = self.config.conference()?;
        let relative_path = format!("{}/{}.json", conference.id(), envelope.year);

        let json = render_envelope(&envelope)?;
        self.storage.write_file(&relative_path, &json).await?;

        Ok(format!(
            "{}/{}",
            self.config.output_path().trim_end_matches('/'),
            relative_path
        ))
    }
}

/// UTF-8, 4-space indentation, non-ASCII preserved. The indent width
/// matches the document layout downstream consumers already parse.
fn render_envelope(envelope: &ConferenceEnvelope) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    envelope.serialize(&mut serializer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::HttpFetcher;
    use crate::domain::model::{Conference, DayPartition, PaperRecord};
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        conference: String,
        year: i32,
        source: SourceMode,
        base_urls: Vec<String>,
        output_path: String,
    }

    impl MockConfig {
        fn new(base_url: String) -> Self {
            Self {
                conference: "CVPR".to_string(),
                year: 2020,
                source: SourceMode::Proceedings,
                base_urls: vec![base_url],
                output_path: "conf".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn conference(&self) -> Result<Conference> {
            self.conference.parse()
        }

        fn year(&self) -> i32 {
            self.year
        }

        fn source(&self) -> SourceMode {
            self.source
        }

        fn partitions(&self) -> Result<Vec<DayPartition>> {
            Ok(vec![DayPartition::All])
        }

        fn base_urls(&self) -> Vec<String> {
            self.base_urls.clone()
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }
    }

    fn listing_html() -> String {
        r#"<html><body><dl>
            <dt class="ptitle"><a href="/content/CVPR2020/html/paper_one.html">Paper One</a></dt>
            <dd><form class="authsearch"><input name="query_author" value="Jane Q. Doe"><a>J. Doe</a></form></dd>
            <dd><div class="bibref">month = {June}, pages = {1--10}, doi = {10.1109/CVPR.2020.00001}</div></dd>
            <dt class="ptitle"><a href="/content/CVPR2020/html/paper_two.html">Paper Two</a></dt>
            <dd><form class="authsearch"><input name="query_author" value="Wei Zhang"><a>W. Zhang</a></form></dd>
            <dd><div class="bibref">pages = {11--20}</div></dd>
        </dl></body></html>"#
            .to_string()
    }

    #[tokio::test]
    async fn extract_parses_listing_via_http() {
        let server = MockServer::start();
        let listing_mock = server.mock(|when, then| {
            when.method(GET).path("/CVPR2020").query_param("day", "all");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(listing_html());
        });

        let config = MockConfig::new(server.base_url());
        let pipeline = HarvestPipeline::new(HttpFetcher::new(), MockStorage::new(), config);

        let harvest = pipeline.extract().await.unwrap();

        listing_mock.assert();
        assert_eq!(harvest.records.len(), 2);
        assert_eq!(harvest.records[0].title, "Paper One");
        assert_eq!(harvest.records[0].authors, vec!["Jane Q. Doe"]);
        assert_eq!(harvest.month.as_deref(), Some("June"));
    }

    #[tokio::test]
    async fn extract_accepted_papers_via_http() {
        let server = MockServer::start();
        let table = r#"<html><body><table>
            <tr><td><strong>Accepted Paper One</strong><br>
                <div class="indented">Jane Q. Doe · Wei Zhang</div></td></tr>
            <tr><td><strong>Accepted Paper Two</strong><br>
                <div class="indented">José García</div></td></tr>
        </table></body></html>"#;
        let listing_mock = server.mock(|when, then| {
            when.method(GET).path("/Conferences/2023/AcceptedPapers");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(table);
        });

        let mut config = MockConfig::new(server.base_url());
        config.year = 2023;
        config.source = SourceMode::AcceptedPapers;
        let pipeline = HarvestPipeline::new(HttpFetcher::new(), MockStorage::new(), config);

        let harvest = pipeline.extract().await.unwrap();

        listing_mock.assert();
        assert_eq!(harvest.records.len(), 2);
        assert_eq!(harvest.records[0].title, "Accepted Paper One");
        assert_eq!(harvest.records[0].authors, vec!["Jane Q. Doe", "Wei Zhang"]);
        assert_eq!(harvest.records[0].url, "");
        assert_eq!(harvest.month, None);
    }

    #[tokio::test]
    async fn transform_refuses_empty_harvest() {
        let config = MockConfig::new("http://unused.example.com".to_string());
        let pipeline = HarvestPipeline::new(HttpFetcher::new(), MockStorage::new(), config);

        let result = pipeline.transform(Harvest::default()).await;

        assert!(matches!(result, Err(HarvestError::ProcessingError { .. })));
    }

    #[tokio::test]
    async fn load_writes_four_space_indented_json() {
        let config = MockConfig::new("http://unused.example.com".to_string());
        let storage = MockStorage::new();
        let pipeline =
            HarvestPipeline::new(HttpFetcher::new(), storage.clone(), config);

        let harvest = Harvest {
            records: vec![PaperRecord {
                title: "Paper One".to_string(),
                authors: vec!["José García".to_string()],
                url: "https://example.com/p1.html".to_string(),
                doi: "10.1109/X".to_string(),
                pages: "1--10".to_string(),
            }],
            month: Some("June".to_string()),
        };
        let envelope = pipeline.transform(harvest).await.unwrap();
        let output_path = pipeline.load(envelope).await.unwrap();

        assert_eq!(output_path, "conf/CVPR/2020.json");

        let bytes = storage.get_file("CVPR/2020.json").await.unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("    \"Conference Name\": \"2020 IEEE/CVF Conference on Computer Vision and Pattern Recognition\""));
        assert!(text.contains("    \"Publisher\": \"IEEE\""));
        assert!(text.contains("    \"Month\": \"June\""));
        // non-ASCII preserved, not escaped
        assert!(text.contains("José García"));

        // still valid JSON with the expected paper
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["Papers"][0]["Title"], "Paper One");
        assert_eq!(value["Year"], 2020);
    }

    #[tokio::test]
    async fn month_is_omitted_from_output_when_undiscovered() {
        let config = MockConfig::new("http://unused.example.com".to_string());
        let storage = MockStorage::new();
        let pipeline =
            HarvestPipeline::new(HttpFetcher::new(), storage.clone(), config);

        let harvest = Harvest {
            records: vec![PaperRecord {
                title: "Paper".to_string(),
                authors: vec![],
                url: String::new(),
                doi: String::new(),
                pages: String::new(),
            }],
            month: None,
        };
        let envelope = pipeline.transform(harvest).await.unwrap();
        pipeline.load(envelope).await.unwrap();

        let bytes = storage.get_file("CVPR/2020.json").await.unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("\"Month\""));
    }
}
