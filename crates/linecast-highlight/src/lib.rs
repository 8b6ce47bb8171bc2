//! Token-level highlighting for a single line.
//!
//! Given a line of text and the token changes that touch it, computes the
//! ordered plain/highlighted segments a renderer paints. Overlapping token
//! spans are merged, offsets outside the line are clipped, and the segments
//! always cover the line exactly once.
//!
//! # Key Types
//!
//! - [`Segment`] -- A run of text, highlighted or not
//! - [`HighlightMode`] -- How far token offsets are trusted
//! - [`highlight`] / [`highlight_with`] -- Token change highlighting
//! - [`highlight_value`] -- Key/value highlighting for JSON-like lines

pub mod highlighter;
pub mod segment;
pub mod value;

pub use highlighter::{highlight, highlight_with, HighlightMode};
pub use segment::Segment;
pub use value::highlight_value;
