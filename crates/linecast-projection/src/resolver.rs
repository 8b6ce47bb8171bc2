//! Per-line annotation resolution.
//!
//! A rendered line may be covered by a coarse block annotation (its root
//! change) and a finer statement annotation (its projected entry). The finer
//! one decides the line's style; the block still contributes its badge on
//! the first line of its range.

use std::fmt;

use serde::{Deserialize, Serialize};

use linecast_types::{ChangeKind, Side};

use crate::annotation::ProjectedAnnotation;
use crate::block::{BlockAnnotation, BlockHit};

/// The fixed set of line styles a renderer paints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Unchanged,
    Added,
    Deleted,
    Modified,
    Moved,
    MovedModified,
}

impl LineStyle {
    pub fn is_move(self) -> bool {
        matches!(self, Self::Moved | Self::MovedModified)
    }
}

impl From<ChangeKind> for LineStyle {
    fn from(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Added => Self::Added,
            ChangeKind::Deleted => Self::Deleted,
            ChangeKind::Modified => Self::Modified,
            ChangeKind::Moved => Self::Moved,
            ChangeKind::MovedModified => Self::MovedModified,
        }
    }
}

/// Badge text for a change kind.
pub fn badge_label(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "ADDED",
        ChangeKind::Deleted => "DELETED",
        ChangeKind::Modified => "MODIFIED",
        ChangeKind::Moved => "MOVED",
        ChangeKind::MovedModified => "MOVED & MODIFIED",
    }
}

/// The block header shown above the first line of a root change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub kind: ChangeKind,
    pub label: String,
    /// `"{block_type}: {identifier}"`.
    pub heading: String,
    /// Where the block sits, e.g. `(12-20 → 30-38)` for a move.
    pub location: String,
    /// Similarity percentage, present only when strictly between 0 and 100.
    pub similarity: Option<f64>,
}

impl Badge {
    pub fn for_block(block: &BlockAnnotation) -> Self {
        Self {
            kind: block.kind,
            label: badge_label(block.kind).to_string(),
            heading: format!("{}: {}", block.block_type, block.identifier),
            location: location_text(block),
            similarity: block.similarity_score.filter(|s| *s > 0.0 && *s < 100.0),
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.label, self.heading, self.location)?;
        if let Some(similarity) = self.similarity {
            write!(f, " {similarity:.1}% similar")?;
        }
        Ok(())
    }
}

fn location_text(block: &BlockAnnotation) -> String {
    let range = |side: Side| {
        block
            .range(side)
            .map(|r| r.to_string())
            .unwrap_or_else(|| "?".into())
    };
    match block.kind {
        ChangeKind::Moved | ChangeKind::MovedModified => {
            format!("({} → {})", range(Side::A), range(Side::B))
        }
        ChangeKind::Added => format!("at line {}", range(Side::B)),
        ChangeKind::Deleted => format!("at line {}", range(Side::A)),
        ChangeKind::Modified => format!("at lines {}", range(Side::A)),
    }
}

/// The inline marker drawn at the end of a statement-level line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub kind: ChangeKind,
    pub counterpart_line: Option<usize>,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ChangeKind::Added => write!(f, "+ ADDED")?,
            ChangeKind::Deleted => write!(f, "- DELETED")?,
            ChangeKind::Modified => write!(f, "~ MODIFIED")?,
            ChangeKind::Moved => write!(f, "↔ MOVED")?,
            ChangeKind::MovedModified => write!(f, "↔ MOVED+MODIFIED")?,
        }
        if let Some(line) = self.counterpart_line {
            write!(f, " → {line}")?;
        }
        Ok(())
    }
}

/// How one rendered line should be presented.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub style: LineStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    /// For moved lines, the corresponding line in the other document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterpart_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    /// Whether the line's token changes should be highlighted.
    pub highlight_tokens: bool,
}

/// Resolve the presentation of line `line` from its block and statement
/// annotations.
pub fn resolve(
    line: usize,
    block: Option<BlockHit<'_>>,
    statement: Option<&ProjectedAnnotation>,
) -> Resolution {
    let style = match (statement, block) {
        (Some(s), _) => LineStyle::from(s.kind),
        (None, Some(b)) => LineStyle::from(b.block.kind),
        (None, None) => LineStyle::Unchanged,
    };

    let badge = block
        .filter(|b| b.is_first)
        .map(|b| Badge::for_block(b.block));

    let counterpart_line = if style.is_move() {
        statement
            .and_then(|s| s.counterpart_of(line))
            .or_else(|| block.and_then(|b| b.counterpart_of(line)))
    } else {
        None
    };

    let marker = statement.and_then(|s| match s.kind {
        ChangeKind::Added | ChangeKind::Deleted => Some(Marker {
            kind: s.kind,
            counterpart_line: s.counterpart_line,
        }),
        ChangeKind::Moved | ChangeKind::MovedModified if s.is_badge() => Some(Marker {
            kind: s.kind,
            counterpart_line: s.counterpart_line,
        }),
        _ => None,
    });

    let highlight_tokens = matches!(style, LineStyle::Modified | LineStyle::MovedModified)
        && statement.is_some_and(ProjectedAnnotation::has_token_changes);

    Resolution {
        style,
        badge,
        counterpart_line,
        marker,
        highlight_tokens,
    }
}
