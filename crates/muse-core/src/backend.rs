//! Analysis backend trait.
//!
//! Defines the interface for the external AI analysis/chat service.

use async_trait::async_trait;

use crate::board::{GraphPayload, NodeSummary, Suggestion};
use crate::chat::ChatTurn;
use crate::error::Result;

/// An abstract client for the AI analysis backend.
///
/// This trait defines the contract for the three backend operations,
/// decoupling the use-case layer from the HTTP transport. Every call is a
/// single attempt: implementations do not retry, and all transport, status,
/// and response-shape failures surface as `MuseError::Backend`.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Analyzes free-form idea text in the context of the current graph.
    ///
    /// # Arguments
    ///
    /// * `text` - The user's idea text
    /// * `history` - Summaries of every node currently on the board
    ///
    /// # Returns
    ///
    /// - `Ok(GraphPayload)`: Node/edge descriptors to merge
    /// - `Err(_)`: Transport, status, or response-shape failure
    async fn analyze(&self, text: &str, history: &[NodeSummary]) -> Result<GraphPayload>;

    /// Requests the next assistant reply in a suggestion conversation.
    ///
    /// # Arguments
    ///
    /// * `suggestion` - The suggestion the conversation is about
    /// * `history` - The transcript so far, excluding `user_message`
    /// * `user_message` - The new user turn
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The assistant's reply text
    /// - `Err(_)`: Transport, status, or response-shape failure
    async fn chat(
        &self,
        suggestion: &Suggestion,
        history: &[ChatTurn],
        user_message: &str,
    ) -> Result<String>;

    /// Converts a suggestion conversation into graph content.
    ///
    /// # Arguments
    ///
    /// * `suggestion` - The suggestion the conversation is about
    /// * `transcript` - The full transcript to convert
    /// * `existing_nodes` - Summaries of every node currently on the board
    ///
    /// # Returns
    ///
    /// - `Ok(GraphPayload)`: Node/edge descriptors to merge
    /// - `Err(_)`: Transport, status, or response-shape failure
    async fn chat_to_nodes(
        &self,
        suggestion: &Suggestion,
        transcript: &[ChatTurn],
        existing_nodes: &[NodeSummary],
    ) -> Result<GraphPayload>;
}
