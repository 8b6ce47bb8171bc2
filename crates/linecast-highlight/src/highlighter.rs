//! Token change highlighting.

use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use linecast_types::{Side, TokenChange};

use crate::segment::{build_segments, merge_spans, LineText, Segment};

/// How token offsets from the analysis service are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    /// Use the offsets as given, clipped to the line.
    #[default]
    Trusted,
    /// Use the offsets when the line text there equals the token; otherwise
    /// fall back to the token's first unclaimed occurrence in the line.
    Verified,
    /// Ignore offsets and highlight each token's first unclaimed occurrence.
    Search,
}

/// Highlight `line` using the offsets carried by `changes` on `side`.
pub fn highlight(line: &str, changes: &[TokenChange], side: Side) -> Vec<Segment> {
    highlight_with(line, changes, side, HighlightMode::Trusted)
}

/// Highlight `line` with an explicit offset policy.
///
/// The returned segments cover the whole line exactly once, alternate between
/// plain and highlighted, and their character lengths sum to the line's.
pub fn highlight_with(
    line: &str,
    changes: &[TokenChange],
    side: Side,
    mode: HighlightMode,
) -> Vec<Segment> {
    let text = LineText::new(line);
    let mut claimed: HashSet<Range<usize>> = HashSet::new();
    let mut spans = Vec::with_capacity(changes.len());

    for change in changes {
        let (start, end) = change.offsets(side);
        let token = change.token(side);
        let span = match mode {
            HighlightMode::Trusted => Some(text.clip(start, end)),
            HighlightMode::Verified => {
                let clipped = text.clip(start, end);
                if clipped.start < clipped.end && text.slice(clipped.clone()) == token {
                    Some(clipped)
                } else {
                    debug!(token, start, end, "token offsets disagree with line text; searching");
                    find_unclaimed(&text, token, &claimed).or(Some(clipped))
                }
            }
            HighlightMode::Search => find_unclaimed(&text, token, &claimed),
        };
        if let Some(span) = span {
            claimed.insert(span.clone());
            spans.push(span);
        }
    }

    build_segments(&text, &merge_spans(spans))
}

/// First occurrence of `token` in the line whose span is not yet claimed.
fn find_unclaimed(
    text: &LineText<'_>,
    token: &str,
    claimed: &HashSet<Range<usize>>,
) -> Option<Range<usize>> {
    if token.is_empty() {
        return None;
    }
    let haystack = text.as_str();
    let token_chars = token.chars().count();
    let mut from = 0;

    while let Some(found) = haystack[from..].find(token) {
        let byte = from + found;
        let start = text.char_index(byte);
        let span = start..start + token_chars;
        if !claimed.contains(&span) {
            return Some(span);
        }
        // Step past the first char of this match; occurrences may overlap.
        from = byte + haystack[byte..].chars().next().map_or(1, char::len_utf8);
    }
    None
}
