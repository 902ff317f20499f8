pub mod config;
pub mod error;
pub mod ingest;
pub mod llm;
pub mod pipeline;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, AppResult};
