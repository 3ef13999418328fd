//! Structured diagnostics for the vire toolchain.
//!
//! Passes report user-facing problems as [`Diagnostic`] values emitted into a
//! [`DiagnosticSink`]. The sink counts every error-class diagnostic (errors,
//! sorry messages and internal errors) so a driver can decide whether to stop.
//! Renderers turn diagnostics into text against a [`vire_source::SourceDb`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, LineRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
