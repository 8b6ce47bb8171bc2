//! Line projection for linecast.
//!
//! Turns a hierarchical change tree into two flat line maps, one per
//! document, and resolves each rendered line into a presentation value.
//!
//! # Key Types
//!
//! - [`Projector`] / [`project`] -- Change tree to [`Projection`] (`map_a`, `map_b`)
//! - [`ProjectedAnnotation`] -- What happened to one line on one side
//! - [`BlockIndex`] -- Coarse root-level line map for block badges
//! - [`resolve`] / [`Resolution`] -- Per-line style, badge, and move cross-reference
//! - [`render_side`] / [`LineView`] -- Final per-line value including highlight segments
//! - [`Diagnostic`] -- Node-local problems found while projecting

pub mod annotation;
pub mod block;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod projector;
pub mod resolver;
pub mod view;

pub use annotation::{LineMap, MoveLink, ProjectedAnnotation, Projection};
pub use block::{BlockAnnotation, BlockHit, BlockIndex};
pub use config::{DocumentKind, ProjectionConfig};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{ProjectionError, ProjectionResult};
pub use projector::{project, Projector};
pub use resolver::{badge_label, resolve, Badge, LineStyle, Marker, Resolution};
pub use view::{document_lines, render_side, LineView};
