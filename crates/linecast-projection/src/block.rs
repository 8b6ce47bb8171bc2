//! Root-level block index.
//!
//! The coarse companion to the projected maps: each line of each document
//! maps to the root change whose range covers it. Later roots overwrite
//! earlier ones where ranges overlap. The index answers "which block does
//! this line belong to, and is this the block's first line?" for badge
//! placement.
//!
//! Each block keeps its ranges once; lookups scan the roots, so the index
//! costs nothing per covered line.

use serde::{Deserialize, Serialize};

use linecast_types::{ChangeKind, ChangeNode, LineRange, Side};

/// Summary of one root-level change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockAnnotation {
    pub kind: ChangeKind,
    pub block_type: String,
    pub identifier: String,
    pub description: String,
    pub similarity_score: Option<f64>,
    pub range_a: Option<LineRange>,
    pub range_b: Option<LineRange>,
}

impl BlockAnnotation {
    fn from_root(root: &ChangeNode) -> Self {
        let range = |side| root.span(side).ok().flatten().map(|s| s.range);
        Self {
            kind: root.kind,
            block_type: root.block_type.clone(),
            identifier: root.identifier.clone(),
            description: root.description.clone(),
            similarity_score: root.similarity_score,
            range_a: range(Side::A),
            range_b: range(Side::B),
        }
    }

    /// The block's range on `side`.
    pub fn range(&self, side: Side) -> Option<LineRange> {
        match side {
            Side::A => self.range_a,
            Side::B => self.range_b,
        }
    }
}

/// A block found for a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockHit<'a> {
    pub block: &'a BlockAnnotation,
    pub side: Side,
    /// `true` on the first line of the block's range on this side.
    pub is_first: bool,
}

impl BlockHit<'_> {
    /// The line in the other document corresponding to `line`, for blocks
    /// that have a range on both sides.
    pub fn counterpart_of(&self, line: usize) -> Option<usize> {
        let own = self.block.range(self.side)?;
        let other = self.block.range(self.side.other())?;
        Some((other.start() + line).saturating_sub(own.start()))
    }
}

/// Line-to-block lookup for both documents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockIndex {
    blocks: Vec<BlockAnnotation>,
}

impl BlockIndex {
    /// Index the root list.
    ///
    /// Roots with an inverted range on either side are left out, as the
    /// projector skips them.
    pub fn build(roots: &[ChangeNode]) -> Self {
        let blocks = roots
            .iter()
            .filter(|root| root.span(Side::A).is_ok() && root.span(Side::B).is_ok())
            .map(BlockAnnotation::from_root)
            .collect();
        Self { blocks }
    }

    /// The block covering `line` on `side`, if any. The last root wins.
    pub fn get(&self, side: Side, line: usize) -> Option<BlockHit<'_>> {
        self.blocks.iter().rev().find_map(|block| {
            if !block.kind.applies_to(side) {
                return None;
            }
            let range = block.range(side).filter(|r| r.contains(line))?;
            Some(BlockHit {
                block,
                side,
                is_first: range.start() == line,
            })
        })
    }

    /// All indexed blocks, in root order.
    pub fn blocks(&self) -> &[BlockAnnotation] {
        &self.blocks
    }
}
