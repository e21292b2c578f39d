//! AI suggestion domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::node::{Category, Phase};
use super::payload::NodeDescriptor;

/// An AI-proposed idea surfaced alongside the graph.
///
/// Suggestions are built from the AI-generated node descriptor of an
/// analysis response. They are not graph nodes: they live in their own
/// newest-first list until dismissed, and may reference the existing node
/// they annotate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Locally generated identifier (UUID v4, not backend-supplied)
    pub id: String,
    /// Short display title
    pub title: String,
    /// Longer suggestion text
    pub content: String,
    /// Who/What/When/Where/Why/How classification
    pub category: Category,
    /// Problem or Solution framing
    pub phase: Phase,
    /// Id of the node this suggestion annotates, taken from the suggest
    /// edge's source, if any
    pub related_node_id: Option<String>,
    /// Timestamp of local creation (ISO 8601 format)
    pub created_at: String,
}

impl Suggestion {
    /// Builds a suggestion from the diverted AI-generated descriptor of an
    /// analysis response.
    pub fn from_descriptor(descriptor: &NodeDescriptor, related_node_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: descriptor.data.label.clone(),
            content: descriptor.data.content.clone(),
            category: descriptor.data.category,
            phase: descriptor.data.phase,
            related_node_id,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
