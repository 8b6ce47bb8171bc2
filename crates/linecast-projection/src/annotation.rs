//! Projected line annotations and the projection output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use linecast_types::{ChangeKind, Side, Tallies, TokenChange};

use crate::diagnostic::Diagnostic;

/// Line number (1-based) to annotation, for one document.
pub type LineMap = BTreeMap<usize, ProjectedAnnotation>;

/// Links a line of a moved range to the same range in the other document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveLink {
    /// Start line of the moved range on this side.
    pub own_start: usize,
    /// Start line of the moved range on the other side.
    pub counterpart_start: usize,
}

impl MoveLink {
    /// The line on the other side that corresponds to `line` on this side.
    pub fn counterpart_of(&self, line: usize) -> usize {
        (self.counterpart_start + line).saturating_sub(self.own_start)
    }
}

/// What happened to one line of one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedAnnotation {
    pub kind: ChangeKind,
    pub identifier: String,
    pub description: String,
    /// Set only on the start line of a moved range: the start line of the
    /// same range in the other document.
    pub counterpart_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_link: Option<MoveLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub token_changes: Vec<TokenChange>,
}

impl ProjectedAnnotation {
    /// Returns `true` if this line is where a moved range's badge goes.
    pub fn is_badge(&self) -> bool {
        self.counterpart_line.is_some()
    }

    /// The corresponding line in the other document, for moved lines.
    pub fn counterpart_of(&self, line: usize) -> Option<usize> {
        self.counterpart_line
            .or_else(|| self.move_link.map(|link| link.counterpart_of(line)))
    }

    pub fn has_token_changes(&self) -> bool {
        !self.token_changes.is_empty()
    }
}

/// The result of projecting a change tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub map_a: LineMap,
    pub map_b: LineMap,
    pub tallies: Tallies,
    pub diagnostics: Vec<Diagnostic>,
}

impl Projection {
    /// The line map for `side`.
    pub fn map(&self, side: Side) -> &LineMap {
        match side {
            Side::A => &self.map_a,
            Side::B => &self.map_b,
        }
    }

    /// The annotation for `line` on `side`, if any.
    pub fn get(&self, side: Side, line: usize) -> Option<&ProjectedAnnotation> {
        self.map(side).get(&line)
    }

    /// Returns `true` if any node was skipped entirely.
    pub fn has_skipped_nodes(&self) -> bool {
        self.diagnostics.iter().any(|d| d.kind.skips_node())
    }
}
