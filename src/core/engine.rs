use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Drives the three pipeline stages in order. Sequential by design: one
/// fetch at a time, output written exactly once at the very end.
pub struct HarvestEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> HarvestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("extracting paper records...");
        let harvest = self.pipeline.extract().await?;
        tracing::info!("extracted {} unique records", harvest.records.len());

        let envelope = self.pipeline.transform(harvest).await?;
        tracing::info!(
            "built envelope for {} with {} papers",
            envelope.conference_name,
            envelope.papers.len()
        );

        let output_path = self.pipeline.load(envelope).await?;
        tracing::info!("output saved to: {}", output_path);

        Ok(output_path)
    }
}
