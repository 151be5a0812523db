use clap::Parser;
use cvf_harvest::utils::{logger, validation::Validate};
use cvf_harvest::{CliConfig, HarvestEngine, HarvestPipeline, HttpFetcher, LocalStorage};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cvf-harvest");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // Fail fast on bad configuration, before any network activity.
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = HarvestPipeline::new(HttpFetcher::new(), storage, config);
    let engine = HarvestEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Harvest completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
