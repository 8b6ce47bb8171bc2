use std::fmt;

use serde::{Deserialize, Serialize};

use linecast_types::Side;

/// A node-local problem found while projecting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The node's identifier (or block type when it has none).
    pub identifier: String,
    /// Pre-order position of the node in the tree, starting at 0.
    pub node_index: usize,
    pub side: Option<Side>,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A range ends before it starts. The node was skipped.
    InvalidRange,
    /// The node has no lines on either side. The node was skipped.
    MalformedNode,
    /// A move whose two ranges are identical.
    StationaryMove,
    /// A move with lines on only one side; it carries no cross-reference.
    MissingCounterpart,
    /// Part of the node's range lies past the end of the document.
    LineOutOfDocument,
}

impl DiagnosticKind {
    /// Returns `true` if the node contributed no lines because of this problem.
    pub fn skips_node(self) -> bool {
        matches!(self, Self::InvalidRange | Self::MalformedNode)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange => write!(f, "invalid range"),
            Self::MalformedNode => write!(f, "malformed node"),
            Self::StationaryMove => write!(f, "stationary move"),
            Self::MissingCounterpart => write!(f, "missing counterpart"),
            Self::LineOutOfDocument => write!(f, "line out of document"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in node #{} '{}'", self.kind, self.node_index, self.identifier)?;
        if let Some(side) = self.side {
            write!(f, " (side {side})")?;
        }
        write!(f, ": {}", self.message)
    }
}
