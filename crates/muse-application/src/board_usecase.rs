//! Board use case implementation.
//!
//! This module provides the `BoardUseCase` which orchestrates the user
//! affordances of the ideation board: submitting ideas for analysis,
//! running suggestion chats, converting conversations into graph content,
//! and direct board manipulation.

use anyhow::{Result, anyhow};
use muse_core::backend::AnalysisBackend;
use muse_core::board::{Board, IngestOutcome, Suggestion};
use muse_core::chat::{ChatRole, ChatTurn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Opening prompt sent on behalf of the user when a suggestion chat is
/// opened. The assistant speaks first; no user turn is recorded for it.
const INITIAL_CHAT_PROMPT: &str = "Please explain this suggestion in more detail.";

/// Synthetic assistant turn appended when a chat request fails.
const CHAT_FAILURE_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// Use case for driving one ideation board.
///
/// `BoardUseCase` coordinates between the `Board` state container and the
/// `AnalysisBackend` so that every outbound request is built from a
/// consistent pre-call snapshot and every response is merged as a single
/// atomic transition.
///
/// # Responsibilities
///
/// - Submitting idea text for analysis and merging the response
/// - Opening/closing suggestion chats and exchanging turns
/// - Converting a chat transcript into graph content
/// - Dismissing suggestions and direct manipulation (move, connect)
/// - Rejecting a second in-flight request per affordance
///
/// # Thread Safety
///
/// The board lives behind a `tokio::sync::RwLock`; no lock is held across
/// a backend call. Each externally-suspending affordance (analyze, chat,
/// convert) carries its own `AtomicBool` reentry guard.
pub struct BoardUseCase {
    /// The board state container
    board: Arc<RwLock<Board>>,
    /// Client for the analysis backend
    backend: Arc<dyn AnalysisBackend>,
    /// Guard against concurrent analysis requests
    analyzing: AtomicBool,
    /// Guard against concurrent chat requests (including the opening one)
    chatting: AtomicBool,
    /// Guard against concurrent conversion requests
    converting: AtomicBool,
}

impl BoardUseCase {
    /// Creates a new `BoardUseCase` with an empty board.
    ///
    /// # Arguments
    ///
    /// * `backend` - Client for the analysis backend
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            board: Arc::new(RwLock::new(Board::new())),
            backend,
            analyzing: AtomicBool::new(false),
            chatting: AtomicBool::new(false),
            converting: AtomicBool::new(false),
        }
    }

    /// A clone of the current board state for the view layer.
    pub async fn snapshot(&self) -> Board {
        self.board.read().await.clone()
    }

    /// Submits idea text for analysis and merges the response.
    ///
    /// The node summaries sent as context are snapshotted before the call;
    /// the response is merged as one atomic transition afterwards.
    ///
    /// # Arguments
    ///
    /// * `text` - The user's idea text
    ///
    /// # Returns
    ///
    /// What the merge added, including the id of a created suggestion.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is empty or whitespace
    /// - An analysis is already in flight
    /// - The backend call fails (the board is left unchanged)
    pub async fn submit_idea(&self, text: &str) -> Result<IngestOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Err(anyhow!("Idea text is empty"));
        }
        if self.analyzing.swap(true, Ordering::SeqCst) {
            tracing::warn!("[BoardUseCase] Analysis already in progress, rejecting submission");
            return Err(anyhow!("An analysis is already in progress"));
        }

        let result = self.run_analysis(text).await;
        self.analyzing.store(false, Ordering::SeqCst);
        result
    }

    async fn run_analysis(&self, text: &str) -> Result<IngestOutcome> {
        let history = self.board.read().await.node_summaries();
        tracing::info!(
            "[BoardUseCase] Submitting idea for analysis ({} existing nodes)",
            history.len()
        );

        let payload = self.backend.analyze(text, &history).await?;

        let mut board = self.board.write().await;
        let outcome = board.ingest_analysis(payload);
        tracing::info!(
            "[BoardUseCase] Analysis merged: {} nodes, {} edges, suggestion: {}",
            outcome.nodes_added,
            outcome.edges_added,
            outcome.suggestion_id.is_some()
        );
        Ok(outcome)
    }

    /// Toggles the chat dialog for a suggestion.
    ///
    /// Opening a dialog sends the fixed opening prompt with an empty
    /// history so the assistant speaks first; the reply (or the apology
    /// turn if the request fails) becomes the first transcript entry.
    /// Re-selecting the active suggestion closes the dialog instead.
    ///
    /// # Arguments
    ///
    /// * `suggestion_id` - The suggestion to open or close chat for
    ///
    /// # Returns
    ///
    /// The first assistant reply when a dialog was opened, `None` when the
    /// call closed it.
    ///
    /// # Errors
    ///
    /// Returns an error if the suggestion does not exist or a chat request
    /// is already in flight.
    pub async fn open_suggestion_chat(&self, suggestion_id: &str) -> Result<Option<String>> {
        if self.chatting.swap(true, Ordering::SeqCst) {
            tracing::warn!("[BoardUseCase] Chat request already in progress, rejecting");
            return Err(anyhow!("A chat request is already in progress"));
        }

        let result = self.toggle_and_greet(suggestion_id).await;
        self.chatting.store(false, Ordering::SeqCst);
        result
    }

    async fn toggle_and_greet(&self, suggestion_id: &str) -> Result<Option<String>> {
        let suggestion = {
            let mut board = self.board.write().await;
            if !board.set_active_suggestion(Some(suggestion_id))? {
                tracing::info!(
                    "[BoardUseCase] Chat closed for suggestion: {}",
                    suggestion_id
                );
                return Ok(None);
            }
            board
                .active_suggestion()
                .cloned()
                .ok_or_else(|| anyhow!("Active chat session has no matching suggestion"))?
        };
        tracing::info!("[BoardUseCase] Chat opened for suggestion: {}", suggestion.id);

        let reply = self
            .request_reply(&suggestion, &[], INITIAL_CHAT_PROMPT)
            .await;

        let mut board = self.board.write().await;
        board.push_chat_turn(ChatTurn::new(ChatRole::Assistant, reply.clone()))?;
        Ok(Some(reply))
    }

    /// Sends a user message in the active suggestion chat.
    ///
    /// The history shipped to the backend is snapshotted before the user
    /// turn is recorded; the new message travels only in `user_message`.
    /// A failed request appends the apology turn instead of an assistant
    /// reply and still reports success.
    ///
    /// # Arguments
    ///
    /// * `text` - The user's message
    ///
    /// # Returns
    ///
    /// The assistant's reply (or the apology text).
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty, no chat session is open, or
    /// a chat request is already in flight.
    pub async fn send_chat_message(&self, text: &str) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(anyhow!("Chat message is empty"));
        }
        if self.chatting.swap(true, Ordering::SeqCst) {
            tracing::warn!("[BoardUseCase] Chat request already in progress, rejecting");
            return Err(anyhow!("A chat request is already in progress"));
        }

        let result = self.exchange_turn(text).await;
        self.chatting.store(false, Ordering::SeqCst);
        result
    }

    async fn exchange_turn(&self, text: &str) -> Result<String> {
        let (suggestion, history) = {
            let mut board = self.board.write().await;
            let Some(session) = board.chat_session() else {
                return Err(anyhow!("No active chat session"));
            };
            let history = session.turns.clone();
            let suggestion = board
                .active_suggestion()
                .cloned()
                .ok_or_else(|| anyhow!("Active chat session has no matching suggestion"))?;
            board.push_chat_turn(ChatTurn::new(ChatRole::User, text))?;
            (suggestion, history)
        };

        let reply = self.request_reply(&suggestion, &history, text).await;

        let mut board = self.board.write().await;
        board.push_chat_turn(ChatTurn::new(ChatRole::Assistant, reply.clone()))?;
        Ok(reply)
    }

    /// Requests the next assistant reply, absorbing transport failures:
    /// the transcript always gains an assistant turn, with the apology
    /// text substituted when the call fails.
    async fn request_reply(
        &self,
        suggestion: &Suggestion,
        history: &[ChatTurn],
        user_message: &str,
    ) -> String {
        match self.backend.chat(suggestion, history, user_message).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("[BoardUseCase] Chat request failed: {}", e);
                CHAT_FAILURE_REPLY.to_string()
            }
        }
    }

    /// Converts the active chat transcript into graph content.
    ///
    /// On success the response merges as plain content nodes and the
    /// dialog closes; on failure nothing merges and the dialog stays open.
    ///
    /// # Returns
    ///
    /// What the merge added.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No chat session is open, or its transcript is empty
    /// - A conversion is already in flight
    /// - The backend call fails (the board and dialog are left unchanged)
    pub async fn convert_chat_to_nodes(&self) -> Result<IngestOutcome> {
        if self.converting.swap(true, Ordering::SeqCst) {
            tracing::warn!("[BoardUseCase] Conversion already in progress, rejecting");
            return Err(anyhow!("A conversion is already in progress"));
        }

        let result = self.run_conversion().await;
        self.converting.store(false, Ordering::SeqCst);
        result
    }

    async fn run_conversion(&self) -> Result<IngestOutcome> {
        let (suggestion, transcript, existing_nodes) = {
            let board = self.board.read().await;
            let Some(session) = board.chat_session() else {
                return Err(anyhow!("No active chat session"));
            };
            if session.turns.is_empty() {
                return Err(anyhow!("No conversation to convert"));
            }
            let suggestion = board
                .active_suggestion()
                .cloned()
                .ok_or_else(|| anyhow!("Active chat session has no matching suggestion"))?;
            (suggestion, session.turns.clone(), board.node_summaries())
        };
        tracing::info!(
            "[BoardUseCase] Converting chat to nodes ({} turns)",
            transcript.len()
        );

        let payload = self
            .backend
            .chat_to_nodes(&suggestion, &transcript, &existing_nodes)
            .await?;

        let mut board = self.board.write().await;
        let outcome = board.ingest_chat_nodes(payload);
        board.set_active_suggestion(None)?;
        tracing::info!(
            "[BoardUseCase] Conversion merged: {} nodes, {} edges",
            outcome.nodes_added,
            outcome.edges_added
        );
        Ok(outcome)
    }

    /// Dismisses a suggestion, releasing its highlight unless another live
    /// suggestion still claims it.
    pub async fn dismiss_suggestion(&self, suggestion_id: &str) -> Result<()> {
        let mut board = self.board.write().await;
        board.dismiss_suggestion(suggestion_id)?;
        tracing::info!("[BoardUseCase] Dismissed suggestion: {}", suggestion_id);
        Ok(())
    }

    /// Closes the chat dialog without dismissing the suggestion.
    pub async fn close_chat(&self) -> Result<()> {
        let mut board = self.board.write().await;
        board.set_active_suggestion(None)?;
        tracing::info!("[BoardUseCase] Chat dialog closed");
        Ok(())
    }

    /// Persists a node drag.
    pub async fn move_node(&self, node_id: &str, x: f64, y: f64) -> Result<()> {
        let mut board = self.board.write().await;
        board.move_node(node_id, x, y)?;
        Ok(())
    }

    /// Draws a manual connection between two existing nodes.
    pub async fn connect_nodes(&self, source: &str, target: &str) -> Result<String> {
        let mut board = self.board.write().await;
        let edge_id = board.connect(source, target)?;
        tracing::info!(
            "[BoardUseCase] Connected {} -> {} ({})",
            source,
            target,
            edge_id
        );
        Ok(edge_id)
    }
}
