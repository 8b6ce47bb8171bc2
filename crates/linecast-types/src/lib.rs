//! Foundation types for linecast.
//!
//! This crate models the hierarchical change tree produced by the structural
//! analysis service: what changed between two versions of a document, at
//! block and statement granularity. Every other linecast crate depends on
//! `linecast-types`.
//!
//! # Key Types
//!
//! - [`ChangeNode`]: One node of the change tree, with optional children
//! - [`ChangeKind`]: Added / deleted / modified / moved / moved-and-modified
//! - [`LineRange`] / [`Span`]: 1-based inclusive line ranges per document side
//! - [`TokenChange`]: Character-offset token substitution within one line
//! - [`ComparisonResult`]: The full service response, including [`Summary`]
//! - [`Tallies`]: Flat per-kind counts over the root list

pub mod error;
pub mod kind;
pub mod node;
pub mod range;
pub mod result;
pub mod token;

pub use error::{TreeError, TreeResult};
pub use kind::{ChangeKind, Side};
pub use node::ChangeNode;
pub use range::{LineRange, Span, SpanSource};
pub use result::{ComparisonResult, FileInfo, Summary, Tallies};
pub use token::TokenChange;
