//! Wire payload types for the analysis backend protocol.
//!
//! These structs mirror the backend's JSON field names exactly and are the
//! only place wire shape is defined. Descriptors are mapped into domain
//! types (`Node`, `Edge`) by the board; summaries are the reduced node
//! projection sent back to the backend for context.

use serde::{Deserialize, Serialize};

use super::node::{Category, Phase, Position};

/// A graph update as returned by the `analyze` and `chat-to-nodes`
/// endpoints: new node and edge descriptors to merge into the board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPayload {
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
    #[serde(default)]
    pub edges: Vec<EdgeDescriptor>,
}

/// A node record as produced by the backend, before domain mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: String,
    /// Renderer hint emitted by some backend versions; dropped during
    /// mapping.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    pub position: Position,
    pub data: NodeData,
}

/// The content block of a node descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Short label; becomes the node (or suggestion) title
    pub label: String,
    /// Longer text; becomes the node body or suggestion content
    pub content: String,
    pub phase: Phase,
    pub category: Category,
    /// Marks the transient suggestion node diverted to the suggestion list
    #[serde(default)]
    pub is_ai_generated: bool,
}

/// An edge record as produced by the backend, before domain mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescriptor {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The reduced projection of a persistent node sent to the backend as
/// conversation or analysis context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: String,
    pub data: NodeSummaryData,
    pub position: Position,
}

/// The content block of a node summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSummaryData {
    pub title: String,
    pub category: Category,
    pub phase: Phase,
}
