use serde::{Deserialize, Serialize};

use crate::kind::Side;

/// A token substitution inside one line.
///
/// Offsets are half-open character offsets into the line on the matching
/// side: `old_*` address the A-line, `new_*` the B-line. They are produced
/// independently by the analysis service and may fall outside the line;
/// consumers clip rather than trust them blindly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenChange {
    pub old_token: String,
    pub new_token: String,
    pub old_start: i64,
    pub old_end: i64,
    pub new_start: i64,
    pub new_end: i64,
}

impl TokenChange {
    /// Create a token change from its two halves.
    pub fn new(
        old_token: impl Into<String>,
        old_offsets: (i64, i64),
        new_token: impl Into<String>,
        new_offsets: (i64, i64),
    ) -> Self {
        Self {
            old_token: old_token.into(),
            new_token: new_token.into(),
            old_start: old_offsets.0,
            old_end: old_offsets.1,
            new_start: new_offsets.0,
            new_end: new_offsets.1,
        }
    }

    /// The token text as it appears on `side`.
    pub fn token(&self, side: Side) -> &str {
        match side {
            Side::A => &self.old_token,
            Side::B => &self.new_token,
        }
    }

    /// The raw `[start, end)` offsets on `side`, unclipped.
    pub fn offsets(&self, side: Side) -> (i64, i64) {
        match side {
            Side::A => (self.old_start, self.old_end),
            Side::B => (self.new_start, self.new_end),
        }
    }
}
