//! Line ranges and per-side spans.
//!
//! Lines are 1-based and ranges are inclusive on both ends, matching the
//! numbering used by the analysis service.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// An inclusive, 1-based range of lines in one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    /// Create a range, rejecting `end < start`.
    pub fn new(start: usize, end: usize) -> TreeResult<Self> {
        if end < start {
            return Err(TreeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A one-line range.
    pub fn single(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// First line of the range.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last line of the range (inclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of lines covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always `false`; ranges cover at least one line.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `line` falls within the range.
    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }

    /// Iterate every line of the range.
    pub fn lines(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Restrict the range to lines `1..=max_line`, or `None` if nothing remains.
    pub fn clamp_to(&self, max_line: usize) -> Option<Self> {
        if self.start > max_line {
            return None;
        }
        Some(Self {
            start: self.start,
            end: self.end.min(max_line),
        })
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Where a span's lines came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanSource {
    /// Explicit `start_line`/`end_line` fields.
    Range,
    /// The legacy single `line` field.
    Legacy,
}

/// The lines a node occupies on one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub range: LineRange,
    pub source: SpanSource,
}

impl Span {
    /// A span from explicit range fields.
    pub fn range(range: LineRange) -> Self {
        Self {
            range,
            source: SpanSource::Range,
        }
    }

    /// A one-line span from the legacy `line` field.
    pub fn legacy(line: usize) -> Self {
        Self {
            range: LineRange::single(line),
            source: SpanSource::Legacy,
        }
    }

    /// Returns `true` if this span came from the legacy field.
    pub fn is_legacy(&self) -> bool {
        self.source == SpanSource::Legacy
    }
}
