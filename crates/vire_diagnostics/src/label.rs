//! Secondary annotations on a diagnostic.

use serde::{Deserialize, Serialize};
use vire_source::Span;

/// Whether a label marks the main location or adds context.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// Main location, underlined with `^`.
    Primary,
    /// Context, underlined with `-`.
    Secondary,
}

/// A span with a short message attached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// Annotated span.
    pub span: Span,
    /// Text shown next to the underline.
    pub message: String,
    /// Style.
    pub style: LabelStyle,
}

impl Label {
    /// Creates a primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}
