//! Composition root for embedding applications.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use muse_interaction::AnalysisApiAgent;

use crate::board_usecase::BoardUseCase;

/// Builds a `BoardUseCase` wired to the real analysis backend.
///
/// The agent is configured from the user's config file with environment
/// fallback (see `muse_interaction::config`); a host that wants a custom
/// backend constructs `BoardUseCase::new` directly instead.
///
/// # Returns
///
/// A ready-to-use `BoardUseCase` with an empty board
pub fn bootstrap_board() -> Result<BoardUseCase> {
    let agent = AnalysisApiAgent::try_from_env()
        .map_err(|e| anyhow!("Failed to configure analysis backend: {}", e))?;

    tracing::info!("[Bootstrap] Analysis backend: {}", agent.base_url());

    Ok(BoardUseCase::new(Arc::new(agent)))
}
