use lina::GeometryError;

/// Failure to set up an engine context or runner.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("viewport: {0}")]
    Viewport(#[from] GeometryError),
    #[error("config parse: {0}")]
    Parse(#[from] serde_json::Error),
}
