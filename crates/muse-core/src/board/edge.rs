//! Graph edge domain model.
//!
//! Edge ids carry a provenance prefix assigned by the backend (or locally
//! for user-drawn edges). The prefix determines the edge kind the view uses
//! for styling; it has no other graph semantics.

use serde::{Deserialize, Serialize};

/// Edge id prefix linking a suggestion to the node it annotates.
/// Edges with this prefix are never materialized; only their `source`
/// field is read.
pub const SUGGEST_EDGE_PREFIX: &str = "e-suggest-";
/// Edge id prefix connecting a new node to a pre-existing node.
pub const CROSS_EDGE_PREFIX: &str = "e-cross-";
/// Edge id prefix linking nodes to the originating input event.
pub const INPUT_EDGE_PREFIX: &str = "e-input-";
/// Edge id prefix for nodes produced by a chat conversion.
pub const CHAT_EDGE_PREFIX: &str = "e-chat-";
/// Edge id prefix for locally created, user-drawn edges.
pub const USER_EDGE_PREFIX: &str = "e-user-";

/// Semantic tag derived from an edge id's provenance prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Connects a new node to a pre-existing node (`e-cross-`).
    Cross,
    /// Links from the originating input event (`e-input-`).
    Input,
    /// Produced by a chat-to-nodes conversion (`e-chat-`).
    Chat,
    /// Any other provenance, including user-drawn edges.
    Standard,
}

impl EdgeKind {
    /// Derives the kind from an edge id's prefix. Unknown prefixes map to
    /// `Standard`.
    pub fn from_id(id: &str) -> Self {
        if id.starts_with(CROSS_EDGE_PREFIX) {
            Self::Cross
        } else if id.starts_with(INPUT_EDGE_PREFIX) {
            Self::Input
        } else if id.starts_with(CHAT_EDGE_PREFIX) {
            Self::Chat
        } else {
            Self::Standard
        }
    }
}

/// A directed edge between two board nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge identifier, prefix-tagged with its provenance
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    /// Optional semantic label ("suggestion", "expansion", ...)
    #[serde(default)]
    pub label: Option<String>,
    /// Kind derived from the id prefix
    pub kind: EdgeKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_kind_from_id_prefixes() {
        assert_eq!(EdgeKind::from_id("e-cross-1"), EdgeKind::Cross);
        assert_eq!(EdgeKind::from_id("e-input-2"), EdgeKind::Input);
        assert_eq!(EdgeKind::from_id("e-chat-3"), EdgeKind::Chat);
        assert_eq!(EdgeKind::from_id("e-user-abc"), EdgeKind::Standard);
        assert_eq!(EdgeKind::from_id("e1"), EdgeKind::Standard);
    }
}
