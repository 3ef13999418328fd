//! Source locations for diagnostics.
//!
//! [`Span`]s are attached to every expression, net and device so that
//! synthesis failures can be reported against the original source line.
//! [`SourceDb`] owns the text and turns spans into `file:line` positions.

#![warn(missing_docs)]

pub mod source_db;
pub mod span;

pub use source_db::{ResolvedSpan, SourceDb, SourceFile};
pub use span::{FileId, Span};
