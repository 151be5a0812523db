use crate::domain::model::{Conference, ConferenceEnvelope, DayPartition, Harvest, SourceMode};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Raw outcome of one HTTP attempt. Transport failures surface as `Err`
/// from the fetcher; non-2xx statuses are left to the caller, which treats
/// the two identically.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<FetchResponse>> + Send;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn conference(&self) -> Result<Conference>;
    fn year(&self) -> i32;
    fn source(&self) -> SourceMode;
    fn partitions(&self) -> Result<Vec<DayPartition>>;
    /// Candidate base URLs in preference order; the default depends on
    /// the source mode, hence the owned return.
    fn base_urls(&self) -> Vec<String>;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Harvest>;
    async fn transform(&self, harvest: Harvest) -> Result<ConferenceEnvelope>;
    async fn load(&self, envelope: ConferenceEnvelope) -> Result<String>;
}
