use std::fmt;

use serde::{Deserialize, Serialize};

/// What happened to a block or statement between the two document versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Present only in document B.
    Added,
    /// Present only in document A.
    Deleted,
    /// Present in both at the same place, with edits. Key/value documents
    /// report these as `value_changed` or `type_changed`.
    #[serde(alias = "value_changed", alias = "type_changed")]
    Modified,
    /// Present in both, relocated without edits.
    Moved,
    /// Present in both, relocated and edited.
    MovedModified,
}

impl ChangeKind {
    /// All kinds, in tally order.
    pub const ALL: [ChangeKind; 5] = [
        Self::Added,
        Self::Deleted,
        Self::Modified,
        Self::Moved,
        Self::MovedModified,
    ];

    /// Returns `true` for `moved` and `moved_modified`.
    pub fn is_move(self) -> bool {
        matches!(self, Self::Moved | Self::MovedModified)
    }

    /// Returns `true` for `added` and `deleted`.
    ///
    /// Structural kinds take precedence over every other kind when two
    /// nodes claim the same line.
    pub fn is_structural(self) -> bool {
        matches!(self, Self::Added | Self::Deleted)
    }

    /// Returns `true` if a node of this kind carries meaningful lines on `side`.
    pub fn applies_to(self, side: Side) -> bool {
        match (self, side) {
            (Self::Added, Side::A) | (Self::Deleted, Side::B) => false,
            _ => true,
        }
    }

    /// The wire name, e.g. `moved_modified`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::Modified => "modified",
            Self::Moved => "moved",
            Self::MovedModified => "moved_modified",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two compared documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// The original document (file A).
    A,
    /// The revised document (file B).
    B,
}

impl Side {
    /// The opposite document.
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}
