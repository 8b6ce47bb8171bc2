//! The change tree node.
//!
//! Root-level nodes describe whole blocks (functions, classes, JSON objects);
//! their children describe statements inside them and may nest arbitrarily.
//! Field names follow the analysis service's wire format so a response can
//! be deserialized directly.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TreeResult;
use crate::kind::{ChangeKind, Side};
use crate::range::{LineRange, Span};
use crate::token::TokenChange;

/// One node of the change tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeNode {
    #[serde(rename = "change_type")]
    pub kind: ChangeKind,
    #[serde(default, alias = "node_type")]
    pub block_type: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub description: String,
    /// Similarity in percent, meaningful for modified and moved_modified.
    #[serde(default)]
    pub similarity_score: Option<f64>,
    #[serde(default, deserialize_with = "line_number", skip_serializing_if = "Option::is_none")]
    pub file_a_start_line: Option<usize>,
    #[serde(default, deserialize_with = "line_number", skip_serializing_if = "Option::is_none")]
    pub file_a_end_line: Option<usize>,
    #[serde(default, deserialize_with = "line_number", skip_serializing_if = "Option::is_none")]
    pub file_a_line: Option<usize>,
    #[serde(default, deserialize_with = "line_number", skip_serializing_if = "Option::is_none")]
    pub file_b_start_line: Option<usize>,
    #[serde(default, deserialize_with = "line_number", skip_serializing_if = "Option::is_none")]
    pub file_b_end_line: Option<usize>,
    #[serde(default, deserialize_with = "line_number", skip_serializing_if = "Option::is_none")]
    pub file_b_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_label: Option<String>,
    #[serde(default)]
    pub is_container: bool,
    #[serde(
        default,
        rename = "statement_diffs",
        alias = "child_diffs",
        deserialize_with = "null_as_empty"
    )]
    pub children: Vec<ChangeNode>,
    #[serde(
        default,
        rename = "keyword_changes",
        deserialize_with = "null_as_empty"
    )]
    pub token_changes: Vec<TokenChange>,
}

impl ChangeNode {
    /// Create a bare node with no lines, children, or token changes.
    pub fn new(kind: ChangeKind, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            block_type: String::new(),
            identifier: identifier.into(),
            description: String::new(),
            similarity_score: None,
            file_a_start_line: None,
            file_a_end_line: None,
            file_a_line: None,
            file_b_start_line: None,
            file_b_end_line: None,
            file_b_line: None,
            branch_label: None,
            is_container: false,
            children: Vec::new(),
            token_changes: Vec::new(),
        }
    }

    pub fn with_block_type(mut self, block_type: impl Into<String>) -> Self {
        self.block_type = block_type.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_similarity(mut self, score: f64) -> Self {
        self.similarity_score = Some(score);
        self
    }

    /// Set the explicit line range on `side`. The range is not validated here.
    pub fn with_range(mut self, side: Side, start: usize, end: usize) -> Self {
        match side {
            Side::A => {
                self.file_a_start_line = Some(start);
                self.file_a_end_line = Some(end);
            }
            Side::B => {
                self.file_b_start_line = Some(start);
                self.file_b_end_line = Some(end);
            }
        }
        self
    }

    /// Set the legacy single-line field on `side`.
    pub fn with_line(mut self, side: Side, line: usize) -> Self {
        match side {
            Side::A => self.file_a_line = Some(line),
            Side::B => self.file_b_line = Some(line),
        }
        self
    }

    pub fn with_children(mut self, children: Vec<ChangeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_token_changes(mut self, token_changes: Vec<TokenChange>) -> Self {
        self.token_changes = token_changes;
        self
    }

    /// The lines this node occupies on `side`.
    ///
    /// Range fields are authoritative: if either is present the span comes
    /// from them (a lone start or end is read as a one-line range). The
    /// legacy `line` field is consulted only when both range fields are
    /// absent. Returns an error for an inverted range.
    pub fn span(&self, side: Side) -> TreeResult<Option<Span>> {
        let (start, end, legacy) = match side {
            Side::A => (self.file_a_start_line, self.file_a_end_line, self.file_a_line),
            Side::B => (self.file_b_start_line, self.file_b_end_line, self.file_b_line),
        };
        match (start, end) {
            (Some(start), Some(end)) => Ok(Some(Span::range(LineRange::new(start, end)?))),
            (Some(line), None) | (None, Some(line)) => Ok(Some(Span::range(LineRange::single(line)))),
            (None, None) => Ok(legacy.map(Span::legacy)),
        }
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(ChangeNode::subtree_len).sum::<usize>()
    }

    /// A short label for diagnostics: the identifier, or the block type when
    /// the identifier is empty.
    pub fn label(&self) -> &str {
        if self.identifier.is_empty() {
            &self.block_type
        } else {
            &self.identifier
        }
    }
}

/// Line numbers are 1-based; `null`, `0`, and negative values mean "absent".
fn line_number<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.filter(|n| *n > 0).map(|n| n as usize))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
