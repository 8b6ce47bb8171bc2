//! The analysis service's comparison result and root-level tallies.

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::kind::ChangeKind;
use crate::node::ChangeNode;

/// A complete comparison of two documents, as returned by the analysis service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub summary: Summary,
    pub file_a: FileInfo,
    pub file_b: FileInfo,
    #[serde(default)]
    pub differences: Vec<ChangeNode>,
}

impl ComparisonResult {
    /// Parse a result from its JSON wire form.
    pub fn from_json(json: &str) -> TreeResult<Self> {
        serde_json::from_str(json).map_err(|e| TreeError::Serialization(e.to_string()))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> TreeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TreeError::Serialization(e.to_string()))
    }

    /// Per-kind counts over the root list.
    pub fn tallies(&self) -> Tallies {
        Tallies::from_roots(&self.differences)
    }
}

/// Metadata about one compared document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub file_uuid: String,
    #[serde(default)]
    pub original_filename: String,
    #[serde(default)]
    pub total_lines: usize,
    /// Functions (source documents) or elements (JSON documents).
    #[serde(default, alias = "element_count")]
    pub function_count: Option<usize>,
    /// The document text as normalised by the service, when it returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_content: Option<String>,
}

/// The service's own summary of the comparison.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub is_identical: bool,
    #[serde(default)]
    pub structural_similarity: f64,
    #[serde(default)]
    pub total_blocks_a: usize,
    #[serde(default)]
    pub total_blocks_b: usize,
    #[serde(default)]
    pub blocks_added: usize,
    #[serde(default)]
    pub blocks_deleted: usize,
    #[serde(default)]
    pub blocks_modified: usize,
    #[serde(default)]
    pub blocks_moved: usize,
    #[serde(default)]
    pub blocks_unchanged: usize,
}

/// Flat counts of root-level changes by kind.
///
/// `moved_modified` roots count toward `moved`. Children are not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tallies {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
    pub moved: usize,
}

impl Tallies {
    /// Count the root list by kind.
    pub fn from_roots(roots: &[ChangeNode]) -> Self {
        let mut tallies = Self::default();
        for root in roots {
            match root.kind {
                ChangeKind::Added => tallies.added += 1,
                ChangeKind::Deleted => tallies.deleted += 1,
                ChangeKind::Modified => tallies.modified += 1,
                ChangeKind::Moved | ChangeKind::MovedModified => tallies.moved += 1,
            }
        }
        tallies
    }

    /// Sum of all four counts.
    pub fn total(&self) -> usize {
        self.added + self.deleted + self.modified + self.moved
    }
}
