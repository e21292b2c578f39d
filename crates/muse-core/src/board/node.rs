//! Graph node domain model.
//!
//! This module contains the persistent node entity and the enums that
//! classify its content.

use serde::{Deserialize, Serialize};

/// Which half of the design process a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Problem-space framing.
    Problem,
    /// Solution-space framing.
    Solution,
}

/// The framing question a node answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Who,
    What,
    When,
    Where,
    Why,
    How,
}

/// A 2D canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A persistent node on the ideation board.
///
/// Nodes are created from backend analysis payloads (never locally) and
/// remain on the board until the session ends. The `highlighted` flag is a
/// derived decoration: it is recomputed from the board's highlight set on
/// every merge and dismissal rather than patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier (backend-assigned)
    pub id: String,
    /// Canvas position, updated by drag interactions
    pub position: Position,
    /// Short display label
    pub title: String,
    /// Longer descriptive text
    pub body: String,
    /// Problem or Solution framing
    pub phase: Phase,
    /// Who/What/When/Where/Why/How classification
    pub category: Category,
    /// Always false for persistent nodes; suggestion-flagged descriptors
    /// are diverted to the suggestion list and never stored here
    #[serde(default)]
    pub is_ai_suggestion: bool,
    /// Whether a live suggestion currently references this node
    #[serde(default)]
    pub highlighted: bool,
}
