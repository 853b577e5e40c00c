//! Résumé / job-description scoring engine.
//!
//! Scores a candidate résumé against a target job description and produces a
//! decomposed, human-readable quality report: keyword matching against a
//! curated skill taxonomy, section segmentation, and five independent
//! heuristic scorers combined into a single bounded total.
//!
//! The engine is stateless per call: construct an [`Engine`] once (taxonomy
//! and configuration validated up front), then call
//! [`Engine::extract_keywords`] or [`Engine::score_resume`] from any thread.

pub mod config;
pub mod engine;
pub mod errors;
pub mod nlp;
pub mod scoring;
pub mod taxonomy;

pub use config::EngineConfig;
pub use engine::{Engine, KeywordSet};
pub use errors::EngineError;
pub use nlp::sections::SectionName;
pub use scoring::formatting::FileFacts;
pub use scoring::report::Report;
pub use taxonomy::Taxonomy;
