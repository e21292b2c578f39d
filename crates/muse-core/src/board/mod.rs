//! Board domain module.
//!
//! This module contains the ideation board state container, its domain
//! models, and the wire payload types of the analysis backend protocol.
//!
//! # Module Structure
//!
//! - `model`: The state container and its transitions (`Board`)
//! - `node`: Persistent node types (`Node`, `Phase`, `Category`, `Position`)
//! - `edge`: Edge types and provenance prefixes (`Edge`, `EdgeKind`)
//! - `suggestion`: AI suggestion model (`Suggestion`)
//! - `payload`: Wire payload types (`GraphPayload`, `NodeDescriptor`, ...)
//!
//! # Usage
//!
//! ```ignore
//! use muse_core::board::{Board, GraphPayload, IngestOutcome};
//! use muse_core::board::{Category, Node, Phase, Suggestion};
//! ```

mod edge;
mod model;
mod node;
mod payload;
mod suggestion;

// Re-export public API
pub use edge::{
    CHAT_EDGE_PREFIX, CROSS_EDGE_PREFIX, Edge, EdgeKind, INPUT_EDGE_PREFIX, SUGGEST_EDGE_PREFIX,
    USER_EDGE_PREFIX,
};
pub use model::{Board, IngestOutcome};
pub use node::{Category, Node, Phase, Position};
pub use payload::{
    EdgeDescriptor, GraphPayload, NodeData, NodeDescriptor, NodeSummary, NodeSummaryData,
};
pub use suggestion::Suggestion;
