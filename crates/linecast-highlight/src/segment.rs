//! Segments and the span arithmetic behind them.
//!
//! All positions here are character offsets (Unicode scalar values), not
//! byte offsets. [`LineText`] translates between the two when slicing.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A run of line text that is either highlighted or plain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A line with a precomputed char-to-byte index.
pub(crate) struct LineText<'a> {
    text: &'a str,
    /// Byte offset of every char, plus `text.len()` as a final sentinel.
    char_starts: Vec<usize>,
}

impl<'a> LineText<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        char_starts.push(text.len());
        Self { text, char_starts }
    }

    /// Number of characters in the line.
    pub(crate) fn char_len(&self) -> usize {
        self.char_starts.len() - 1
    }

    /// Clip a raw offset pair into `[0, char_len]`.
    pub(crate) fn clip(&self, start: i64, end: i64) -> Range<usize> {
        let len = self.char_len() as i64;
        let start = start.clamp(0, len) as usize;
        let end = end.clamp(0, len) as usize;
        start..end
    }

    /// The text between two char offsets. Offsets must be in bounds.
    pub(crate) fn slice(&self, chars: Range<usize>) -> &'a str {
        &self.text[self.char_starts[chars.start]..self.char_starts[chars.end]]
    }

    /// Char offset of the char starting at byte `byte`.
    pub(crate) fn char_index(&self, byte: usize) -> usize {
        self.char_starts.partition_point(|&b| b < byte)
    }

    pub(crate) fn as_str(&self) -> &'a str {
        self.text
    }
}

/// Sort spans by start and merge any that overlap or touch.
///
/// Empty spans are dropped. The result is strictly increasing and
/// non-overlapping.
pub(crate) fn merge_spans(mut spans: Vec<Range<usize>>) -> Vec<Range<usize>> {
    spans.retain(|s| s.start < s.end);
    spans.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Cut the line into alternating plain/highlighted segments.
///
/// `spans` must already be merged. An empty line yields no segments.
pub(crate) fn build_segments(line: &LineText<'_>, spans: &[Range<usize>]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in spans {
        if span.start > cursor {
            segments.push(Segment::plain(line.slice(cursor..span.start)));
        }
        segments.push(Segment::highlighted(line.slice(span.clone())));
        cursor = span.end;
    }

    if cursor < line.char_len() {
        segments.push(Segment::plain(line.slice(cursor..line.char_len())));
    }
    segments
}
