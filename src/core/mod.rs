pub mod accepted;
pub mod aggregate;
pub mod bibref;
pub mod engine;
pub mod envelope;
pub mod extract;
pub mod pipeline;

pub use crate::domain::model::{ConferenceEnvelope, Harvest, PaperRecord};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
