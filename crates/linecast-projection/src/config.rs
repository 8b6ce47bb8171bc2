use serde::{Deserialize, Serialize};

use linecast_highlight::HighlightMode;

/// What kind of document is being compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Program source; modified lines are highlighted by token changes.
    #[default]
    Source,
    /// Key/value data such as JSON; modified lines without token changes
    /// highlight their value.
    KeyValue,
}

/// Configuration for projecting a change tree and rendering its lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Upper bound on the total number of line claims across the tree.
    pub max_marked_lines: usize,
    /// How token offsets are trusted when highlighting.
    pub highlight_mode: HighlightMode,
    /// How modified lines are highlighted.
    pub document_kind: DocumentKind,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_marked_lines: 200_000,
            highlight_mode: HighlightMode::Trusted,
            document_kind: DocumentKind::Source,
        }
    }
}
