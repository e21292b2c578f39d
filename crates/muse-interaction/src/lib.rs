//! MUSE interaction layer.
//!
//! This crate provides the HTTP client for the external analysis backend
//! (`AnalysisApiAgent`, an implementation of the core `AnalysisBackend`
//! trait) and its configuration loading.

pub mod analysis_api_agent;
pub mod config;

pub use analysis_api_agent::AnalysisApiAgent;
pub use config::{BackendConfig, load_backend_config};
