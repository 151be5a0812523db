pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HttpFetcher, LocalStorage};
pub use config::{venues::VenueCatalog, CliConfig};
pub use core::{engine::HarvestEngine, pipeline::HarvestPipeline};
pub use utils::error::{HarvestError, Result};
