use thiserror::Error;

/// Engine-level error type.
///
/// Only configuration problems are fatal: a missing or empty skill taxonomy
/// means no report can be produced at all. Everything recoverable (extractor
/// fallback, invalid `top_n`, empty input text) is handled in place and never
/// reaches callers as an error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Taxonomy parse error: {0}")]
    Taxonomy(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
