pub mod insights;
pub mod materials;
pub mod orchestrator;
pub mod report;

pub use materials::MaterialStatus;
pub use orchestrator::{RunOutcome, run};
