//! Board domain model.
//!
//! The board is the state container for one ideation session: persistent
//! nodes and edges, the live suggestion list, the highlight set, and the
//! active chat session. Its methods are the only state transitions; each
//! runs synchronously without I/O, so the container can be driven and
//! tested independently of any rendering or network layer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::{ChatSession, ChatTurn};
use crate::error::{MuseError, Result};

use super::edge::{Edge, EdgeKind, SUGGEST_EDGE_PREFIX, USER_EDGE_PREFIX};
use super::node::{Node, Position};
use super::payload::{EdgeDescriptor, GraphPayload, NodeDescriptor, NodeSummary, NodeSummaryData};
use super::suggestion::Suggestion;

/// What a merge added, and the id of the suggestion it created, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestOutcome {
    pub nodes_added: usize,
    pub edges_added: usize,
    pub suggestion_id: Option<String>,
}

/// The state container for one ideation session.
///
/// Invariants maintained across all transitions:
/// - No node in `nodes` ever has `is_ai_suggestion = true`; AI-generated
///   descriptors are diverted to `suggestions` and never enter the graph.
/// - No edge in `edges` carries the suggest prefix; suggest edges are
///   consumed for their `source` field only.
/// - `highlighted` holds exactly the related node ids of live suggestions,
///   and every node's `highlighted` flag mirrors set membership.
/// - At most one chat session exists, and it belongs to a live suggestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Persistent graph nodes, in insertion order
    nodes: Vec<Node>,
    /// Persistent graph edges, in insertion order
    edges: Vec<Edge>,
    /// Live suggestions, newest first
    suggestions: Vec<Suggestion>,
    /// Node ids referenced by live suggestions
    highlighted: HashSet<String>,
    /// Conversation attached to the active suggestion, if a dialog is open
    chat: Option<ChatSession>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persistent graph nodes, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Persistent graph edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Live suggestions, newest first.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Node ids currently emphasized because a live suggestion references
    /// them.
    pub fn highlighted(&self) -> &HashSet<String> {
        &self.highlighted
    }

    /// The open chat session, if any.
    pub fn chat_session(&self) -> Option<&ChatSession> {
        self.chat.as_ref()
    }

    /// The suggestion the open chat dialog belongs to, if any.
    pub fn active_suggestion(&self) -> Option<&Suggestion> {
        let session = self.chat.as_ref()?;
        self.suggestions
            .iter()
            .find(|s| s.id == session.suggestion_id)
    }

    /// Merges an analysis response into the board.
    ///
    /// The first AI-generated descriptor is diverted into a new suggestion
    /// (prepended, newest first) instead of the graph; any further
    /// AI-generated descriptors are dropped. The first suggest edge names
    /// the node the suggestion relates to via its `source`; that id joins
    /// the highlight set only when a suggestion was actually created.
    /// Remaining descriptors become content nodes and edges, and node
    /// decoration is recomputed at the end.
    pub fn ingest_analysis(&mut self, payload: GraphPayload) -> IngestOutcome {
        let mut outcome = IngestOutcome::default();

        let related_node_id = payload
            .edges
            .iter()
            .find(|e| e.id.starts_with(SUGGEST_EDGE_PREFIX))
            .map(|e| e.source.clone());

        if let Some(descriptor) = payload.nodes.iter().find(|n| n.data.is_ai_generated) {
            let suggestion = Suggestion::from_descriptor(descriptor, related_node_id);
            if let Some(related) = &suggestion.related_node_id {
                self.highlighted.insert(related.clone());
            }
            outcome.suggestion_id = Some(suggestion.id.clone());
            self.suggestions.insert(0, suggestion);
        }

        for descriptor in payload.nodes.iter().filter(|n| !n.data.is_ai_generated) {
            self.nodes.push(map_node(descriptor));
            outcome.nodes_added += 1;
        }
        outcome.edges_added = self.push_edges(payload.edges);

        self.redecorate();
        outcome
    }

    /// Merges a chat-to-nodes response into the board.
    ///
    /// Every descriptor is treated as a content node: no suggestion is
    /// created and the highlight set does not change. Suggest edges are
    /// still filtered out.
    pub fn ingest_chat_nodes(&mut self, payload: GraphPayload) -> IngestOutcome {
        let mut outcome = IngestOutcome::default();

        for descriptor in &payload.nodes {
            self.nodes.push(map_node(descriptor));
            outcome.nodes_added += 1;
        }
        outcome.edges_added = self.push_edges(payload.edges);

        self.redecorate();
        outcome
    }

    /// Removes a suggestion and recomputes the highlight set from the
    /// remaining ones.
    ///
    /// Recomputing (rather than removing the dismissed suggestion's own
    /// related id) keeps a node highlighted while any other live suggestion
    /// still references it. Dismissing the active suggestion also discards
    /// its chat session.
    pub fn dismiss_suggestion(&mut self, suggestion_id: &str) -> Result<()> {
        let index = self
            .suggestions
            .iter()
            .position(|s| s.id == suggestion_id)
            .ok_or_else(|| MuseError::not_found("suggestion", suggestion_id))?;
        self.suggestions.remove(index);

        self.highlighted = self
            .suggestions
            .iter()
            .filter_map(|s| s.related_node_id.clone())
            .collect();

        if self
            .chat
            .as_ref()
            .is_some_and(|session| session.suggestion_id == suggestion_id)
        {
            self.chat = None;
        }

        self.redecorate();
        Ok(())
    }

    /// Activates a suggestion for chat, or closes the dialog.
    ///
    /// Selecting the already-active suggestion closes the dialog; selecting
    /// a different one replaces the session and discards the prior
    /// transcript; `None` always closes. Returns whether a chat session is
    /// open afterwards.
    pub fn set_active_suggestion(&mut self, suggestion_id: Option<&str>) -> Result<bool> {
        let Some(id) = suggestion_id else {
            self.chat = None;
            return Ok(false);
        };

        if !self.suggestions.iter().any(|s| s.id == id) {
            return Err(MuseError::not_found("suggestion", id));
        }

        if self
            .chat
            .as_ref()
            .is_some_and(|session| session.suggestion_id == id)
        {
            self.chat = None;
            return Ok(false);
        }

        self.chat = Some(ChatSession::new(id));
        Ok(true)
    }

    /// Appends a turn to the active chat session.
    pub fn push_chat_turn(&mut self, turn: ChatTurn) -> Result<()> {
        match &mut self.chat {
            Some(session) => {
                session.turns.push(turn);
                Ok(())
            }
            None => Err(MuseError::invalid_state("no active chat session")),
        }
    }

    /// Persists a drag interaction by updating a node's position.
    pub fn move_node(&mut self, node_id: &str, x: f64, y: f64) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == node_id)
            .ok_or_else(|| MuseError::not_found("node", node_id))?;
        node.position = Position::new(x, y);
        Ok(())
    }

    /// Adds a user-drawn edge between two existing nodes and returns its
    /// id.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<String> {
        if !self.nodes.iter().any(|n| n.id == source) {
            return Err(MuseError::not_found("node", source));
        }
        if !self.nodes.iter().any(|n| n.id == target) {
            return Err(MuseError::not_found("node", target));
        }

        let id = format!("{}{}", USER_EDGE_PREFIX, Uuid::new_v4());
        self.edges.push(Edge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            label: None,
            kind: EdgeKind::Standard,
        });
        Ok(id)
    }

    /// The reduced projection of every node, sent to the backend as
    /// analysis or conversion context.
    pub fn node_summaries(&self) -> Vec<NodeSummary> {
        self.nodes
            .iter()
            .map(|node| NodeSummary {
                id: node.id.clone(),
                data: NodeSummaryData {
                    title: node.title.clone(),
                    category: node.category,
                    phase: node.phase,
                },
                position: node.position,
            })
            .collect()
    }

    /// Maps and appends edge descriptors, dropping suggest edges.
    fn push_edges(&mut self, descriptors: Vec<EdgeDescriptor>) -> usize {
        let mut added = 0;
        for descriptor in descriptors {
            if descriptor.id.starts_with(SUGGEST_EDGE_PREFIX) {
                continue;
            }
            let kind = EdgeKind::from_id(&descriptor.id);
            self.edges.push(Edge {
                id: descriptor.id,
                source: descriptor.source,
                target: descriptor.target,
                label: descriptor.label,
                kind,
            });
            added += 1;
        }
        added
    }

    /// Recomputes the `highlighted` decoration on every node from the
    /// current highlight set. Decoration is a pure function of current
    /// state, recomputed wholesale rather than patched incrementally.
    fn redecorate(&mut self) {
        for node in &mut self.nodes {
            node.highlighted = self.highlighted.contains(&node.id);
        }
    }
}

/// Maps a content descriptor into a persistent node. The renderer hint
/// (`type`) is dropped and the suggestion flag is always cleared.
fn map_node(descriptor: &NodeDescriptor) -> Node {
    Node {
        id: descriptor.id.clone(),
        position: descriptor.position,
        title: descriptor.data.label.clone(),
        body: descriptor.data.content.clone(),
        phase: descriptor.data.phase,
        category: descriptor.data.category,
        is_ai_suggestion: false,
        highlighted: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::node::{Category, Phase};
    use crate::board::payload::NodeData;
    use crate::chat::ChatRole;

    fn content_node(id: &str, label: &str) -> NodeDescriptor {
        NodeDescriptor {
            id: id.to_string(),
            node_type: None,
            position: Position::new(100.0, 200.0),
            data: NodeData {
                label: label.to_string(),
                content: "busy professionals".to_string(),
                phase: Phase::Problem,
                category: Category::Who,
                is_ai_generated: false,
            },
        }
    }

    fn suggestion_node(id: &str, label: &str) -> NodeDescriptor {
        NodeDescriptor {
            id: id.to_string(),
            node_type: Some("suggestion".to_string()),
            position: Position::new(300.0, 200.0),
            data: NodeData {
                label: label.to_string(),
                content: "When do busy professionals actually cook?".to_string(),
                phase: Phase::Problem,
                category: Category::Why,
                is_ai_generated: true,
            },
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> EdgeDescriptor {
        EdgeDescriptor {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            label: None,
        }
    }

    /// The response for "launch a meal-kit app": one content node, one
    /// suggestion node, one suggest edge tying them together.
    fn analysis_example() -> GraphPayload {
        GraphPayload {
            nodes: vec![
                content_node("n1", "Target users"),
                suggestion_node("n2", "Consider delivery windows"),
            ],
            edges: vec![edge("e-suggest-1", "n1", "n2")],
        }
    }

    #[test]
    fn test_analysis_without_suggestion_changes_nothing_but_nodes() {
        let mut board = Board::new();
        let outcome = board.ingest_analysis(GraphPayload {
            nodes: vec![content_node("n1", "Target users")],
            edges: vec![],
        });

        assert_eq!(outcome.nodes_added, 1);
        assert_eq!(outcome.edges_added, 0);
        assert_eq!(outcome.suggestion_id, None);

        assert_eq!(board.nodes().len(), 1);
        let node = &board.nodes()[0];
        assert_eq!(node.id, "n1");
        assert_eq!(node.title, "Target users");
        assert_eq!(node.body, "busy professionals");
        assert!(!node.is_ai_suggestion);
        assert!(!node.highlighted);

        assert!(board.suggestions().is_empty());
        assert!(board.highlighted().is_empty());
    }

    #[test]
    fn test_analysis_diverts_ai_node_into_suggestion() {
        let mut board = Board::new();
        let outcome = board.ingest_analysis(analysis_example());

        assert_eq!(outcome.nodes_added, 1);
        assert!(outcome.suggestion_id.is_some());

        // The AI node never enters the graph.
        assert_eq!(board.nodes().len(), 1);
        assert_eq!(board.nodes()[0].id, "n1");
        assert!(board.nodes().iter().all(|n| !n.is_ai_suggestion));

        assert_eq!(board.suggestions().len(), 1);
        let suggestion = &board.suggestions()[0];
        assert_eq!(suggestion.title, "Consider delivery windows");
        assert_eq!(suggestion.related_node_id.as_deref(), Some("n1"));
        assert_ne!(suggestion.id, "n2");

        assert_eq!(board.highlighted().len(), 1);
        assert!(board.highlighted().contains("n1"));
        assert!(board.nodes()[0].highlighted);

        // The suggest edge is consumed, not materialized.
        assert!(board.edges().is_empty());
    }

    #[test]
    fn test_suggest_edges_never_materialize() {
        let mut board = Board::new();
        board.ingest_analysis(GraphPayload {
            nodes: vec![
                content_node("n1", "Target users"),
                content_node("n3", "Weeknight dinners"),
                suggestion_node("n2", "Consider delivery windows"),
            ],
            edges: vec![
                edge("e-suggest-1", "n1", "n2"),
                edge("e-cross-1", "n3", "n1"),
                edge("e1", "n1", "n3"),
            ],
        });

        let ids: Vec<&str> = board.edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e-cross-1", "e1"]);
        assert_eq!(board.edges()[0].kind, EdgeKind::Cross);
        assert_eq!(board.edges()[1].kind, EdgeKind::Standard);
    }

    #[test]
    fn test_only_first_ai_node_becomes_suggestion() {
        let mut board = Board::new();
        let outcome = board.ingest_analysis(GraphPayload {
            nodes: vec![
                suggestion_node("s1", "First idea"),
                content_node("n1", "Target users"),
                suggestion_node("s2", "Second idea"),
            ],
            edges: vec![],
        });

        assert_eq!(outcome.nodes_added, 1);
        assert_eq!(board.suggestions().len(), 1);
        assert_eq!(board.suggestions()[0].title, "First idea");
        // The second AI node is dropped entirely.
        assert_eq!(board.nodes().len(), 1);
        assert_eq!(board.nodes()[0].id, "n1");
    }

    #[test]
    fn test_suggestion_without_suggest_edge_has_no_related_node() {
        let mut board = Board::new();
        board.ingest_analysis(GraphPayload {
            nodes: vec![suggestion_node("n2", "Consider delivery windows")],
            edges: vec![],
        });

        assert_eq!(board.suggestions().len(), 1);
        assert_eq!(board.suggestions()[0].related_node_id, None);
        assert!(board.highlighted().is_empty());
    }

    #[test]
    fn test_suggest_edge_without_ai_node_adds_no_highlight() {
        let mut board = Board::new();
        board.ingest_analysis(GraphPayload {
            nodes: vec![content_node("n1", "Target users")],
            edges: vec![edge("e-suggest-1", "n1", "n2")],
        });

        assert!(board.suggestions().is_empty());
        assert!(board.highlighted().is_empty());
        assert!(board.edges().is_empty());
    }

    #[test]
    fn test_suggestions_are_ordered_newest_first() {
        let mut board = Board::new();
        board.ingest_analysis(GraphPayload {
            nodes: vec![suggestion_node("s1", "First idea")],
            edges: vec![],
        });
        board.ingest_analysis(GraphPayload {
            nodes: vec![suggestion_node("s2", "Second idea")],
            edges: vec![],
        });

        assert_eq!(board.suggestions().len(), 2);
        assert_eq!(board.suggestions()[0].title, "Second idea");
        assert_eq!(board.suggestions()[1].title, "First idea");
    }

    #[test]
    fn test_dismiss_removes_suggestion_and_highlight() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());
        let id = board.suggestions()[0].id.clone();

        board.dismiss_suggestion(&id).unwrap();

        assert!(board.suggestions().is_empty());
        assert!(board.highlighted().is_empty());
        // The related node itself stays on the board, undecorated.
        assert_eq!(board.nodes().len(), 1);
        assert_eq!(board.nodes()[0].id, "n1");
        assert!(!board.nodes()[0].highlighted);
    }

    #[test]
    fn test_dismiss_unknown_suggestion_is_not_found() {
        let mut board = Board::new();
        let err = board.dismiss_suggestion("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_dismiss_keeps_highlight_shared_with_another_suggestion() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());
        // A second suggestion annotating the same node.
        board.ingest_analysis(GraphPayload {
            nodes: vec![suggestion_node("n4", "Another angle")],
            edges: vec![edge("e-suggest-2", "n1", "n4")],
        });
        assert_eq!(board.suggestions().len(), 2);

        let newest = board.suggestions()[0].id.clone();
        board.dismiss_suggestion(&newest).unwrap();
        assert!(board.highlighted().contains("n1"));
        assert!(board.nodes()[0].highlighted);

        let last = board.suggestions()[0].id.clone();
        board.dismiss_suggestion(&last).unwrap();
        assert!(board.highlighted().is_empty());
        assert!(!board.nodes()[0].highlighted);
    }

    #[test]
    fn test_dismiss_active_suggestion_discards_chat() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());
        let id = board.suggestions()[0].id.clone();

        assert!(board.set_active_suggestion(Some(&id)).unwrap());
        assert!(board.chat_session().is_some());

        board.dismiss_suggestion(&id).unwrap();
        assert!(board.chat_session().is_none());
    }

    #[test]
    fn test_ingest_chat_nodes_adds_content_only() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());

        let outcome = board.ingest_chat_nodes(GraphPayload {
            nodes: vec![
                content_node("n5", "Prep time"),
                // Even a mislabeled AI descriptor lands as a content node.
                suggestion_node("n6", "Stray suggestion"),
            ],
            edges: vec![
                edge("e-chat-1", "n1", "n5"),
                edge("e-suggest-9", "n1", "n6"),
            ],
        });

        assert_eq!(outcome.nodes_added, 2);
        assert_eq!(outcome.edges_added, 1);
        assert_eq!(outcome.suggestion_id, None);

        assert_eq!(board.nodes().len(), 3);
        assert!(board.nodes().iter().all(|n| !n.is_ai_suggestion));

        // Suggestions and highlights are untouched by chat merges.
        assert_eq!(board.suggestions().len(), 1);
        assert_eq!(board.highlighted().len(), 1);
        assert!(board.highlighted().contains("n1"));

        let ids: Vec<&str> = board.edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e-chat-1"]);
        assert_eq!(board.edges()[0].kind, EdgeKind::Chat);
    }

    #[test]
    fn test_chat_nodes_keep_existing_decoration_consistent() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());
        board.ingest_chat_nodes(GraphPayload {
            nodes: vec![content_node("n5", "Prep time")],
            edges: vec![],
        });

        let n1 = board.nodes().iter().find(|n| n.id == "n1").unwrap();
        let n5 = board.nodes().iter().find(|n| n.id == "n5").unwrap();
        assert!(n1.highlighted);
        assert!(!n5.highlighted);
    }

    #[test]
    fn test_redecoration_is_idempotent() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());

        board.redecorate();
        let once = board.nodes.clone();
        board.redecorate();
        assert_eq!(once, board.nodes);
    }

    #[test]
    fn test_set_active_suggestion_toggles() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());
        let id = board.suggestions()[0].id.clone();

        assert!(board.set_active_suggestion(Some(&id)).unwrap());
        assert_eq!(board.chat_session().unwrap().suggestion_id, id);

        // Re-selecting the active suggestion closes the dialog.
        assert!(!board.set_active_suggestion(Some(&id)).unwrap());
        assert!(board.chat_session().is_none());

        assert!(board.set_active_suggestion(Some(&id)).unwrap());
        assert!(!board.set_active_suggestion(None).unwrap());
        assert!(board.chat_session().is_none());
    }

    #[test]
    fn test_switching_suggestion_discards_transcript() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());
        board.ingest_analysis(GraphPayload {
            nodes: vec![suggestion_node("n4", "Another angle")],
            edges: vec![],
        });
        let first = board.suggestions()[1].id.clone();
        let second = board.suggestions()[0].id.clone();

        board.set_active_suggestion(Some(&first)).unwrap();
        board
            .push_chat_turn(ChatTurn::new(ChatRole::Assistant, "hello"))
            .unwrap();
        assert_eq!(board.chat_session().unwrap().turns.len(), 1);

        assert!(board.set_active_suggestion(Some(&second)).unwrap());
        let session = board.chat_session().unwrap();
        assert_eq!(session.suggestion_id, second);
        assert!(session.turns.is_empty());
    }

    #[test]
    fn test_set_active_unknown_suggestion_is_not_found() {
        let mut board = Board::new();
        let err = board.set_active_suggestion(Some("missing")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_push_chat_turn_requires_open_session() {
        let mut board = Board::new();
        let err = board
            .push_chat_turn(ChatTurn::new(ChatRole::User, "hello"))
            .unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_active_suggestion_resolves_through_session() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());
        assert!(board.active_suggestion().is_none());

        let id = board.suggestions()[0].id.clone();
        board.set_active_suggestion(Some(&id)).unwrap();
        assert_eq!(board.active_suggestion().unwrap().id, id);
    }

    #[test]
    fn test_move_node_updates_position() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());

        board.move_node("n1", 42.0, -7.5).unwrap();
        assert_eq!(board.nodes()[0].position, Position::new(42.0, -7.5));

        let err = board.move_node("missing", 0.0, 0.0).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_connect_requires_both_endpoints() {
        let mut board = Board::new();
        board.ingest_analysis(GraphPayload {
            nodes: vec![
                content_node("n1", "Target users"),
                content_node("n3", "Weeknight dinners"),
            ],
            edges: vec![],
        });

        let id = board.connect("n1", "n3").unwrap();
        assert!(id.starts_with(USER_EDGE_PREFIX));
        assert_eq!(board.edges().len(), 1);
        assert_eq!(board.edges()[0].kind, EdgeKind::Standard);
        assert_eq!(board.edges()[0].source, "n1");
        assert_eq!(board.edges()[0].target, "n3");

        assert!(board.connect("n1", "missing").unwrap_err().is_not_found());
        assert!(board.connect("missing", "n3").unwrap_err().is_not_found());
    }

    #[test]
    fn test_node_summaries_project_current_nodes() {
        let mut board = Board::new();
        board.ingest_analysis(analysis_example());
        board.move_node("n1", 10.0, 20.0).unwrap();

        let summaries = board.node_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, "n1");
        assert_eq!(summaries[0].data.title, "Target users");
        assert_eq!(summaries[0].data.category, Category::Who);
        assert_eq!(summaries[0].data.phase, Phase::Problem);
        assert_eq!(summaries[0].position, Position::new(10.0, 20.0));
    }
}
