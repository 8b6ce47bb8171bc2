//! Key/value highlighting for structured documents such as JSON.
//!
//! Statement-level changes in key/value documents carry no token offsets;
//! the changed part of a line is its value, everything after the first `:`.

use crate::segment::Segment;

/// Highlight the value part of a `key: value` line.
///
/// The key and its colon stay plain. A line without a colon, or with nothing
/// after it, is returned as a single plain segment.
pub fn highlight_value(line: &str) -> Vec<Segment> {
    if line.is_empty() {
        return Vec::new();
    }
    match line.find(':') {
        Some(colon) if colon + 1 < line.len() => {
            let (key, value) = line.split_at(colon + 1);
            vec![Segment::plain(key), Segment::highlighted(value)]
        }
        _ => vec![Segment::plain(line)],
    }
}
