mod loader;
mod orchestrator;
mod source;

pub use loader::LoaderError;
pub use orchestrator::OrchestratorError;
pub use source::SourceError;
