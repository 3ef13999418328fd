//! Text renderers for diagnostics.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use crate::severity::Severity;
use vire_source::SourceDb;

/// Turns one diagnostic into text.
pub trait DiagnosticRenderer {
    /// Renders `diag`, resolving spans through `source_db`.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Compact one-line format: `top.v:12: error: message [E301]`.
///
/// Diagnostics with no source location start with the severity.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineRenderer;

impl DiagnosticRenderer for LineRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        match source_db.resolve_span(diag.primary_span) {
            Some(loc) => format!(
                "{loc}: {}: {} [{}]",
                diag.severity, diag.message, diag.code
            ),
            None => format!("{}: {} [{}]", diag.severity, diag.message, diag.code),
        }
    }
}

/// Multi-line rustc-style output:
///
/// ```text
/// error[E301]: operand of bitwise operator may not be real
///   --> top.v:3:14
///    |
///  3 |   assign y = r & b;
///    |              ^^^^^
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TerminalRenderer {
    /// Emit ANSI colors in the header.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let head = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return format!("{head}: {}", diag.message);
        }
        let ansi = match diag.severity {
            Severity::Error | Severity::InternalError => "31",
            Severity::Sorry => "35",
            Severity::Warning => "33",
            Severity::Note | Severity::Help => "36",
        };
        format!("\x1b[1;{ansi}m{head}\x1b[0m: {}", diag.message)
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = self.header(diag);
        out.push('\n');

        let located = source_db
            .resolve_span(diag.primary_span)
            .zip(source_db.get_file(diag.primary_span.file));
        if let Some((loc, file)) = located {
            let gutter = loc.line.to_string();
            let pad = " ".repeat(gutter.len());
            out.push_str(&format!(
                "{pad}--> {}:{}:{}\n",
                loc.file_path.display(),
                loc.line,
                loc.column
            ));
            out.push_str(&format!("{pad} |\n"));
            out.push_str(&format!("{gutter} | {}\n", file.line_text(loc.line)));

            let primary_msg = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();
            out.push_str(&format!(
                "{pad} | {}{}{primary_msg}\n",
                " ".repeat(loc.column.saturating_sub(1) as usize),
                "^".repeat(loc.end_column.saturating_sub(loc.column).max(1) as usize),
            ));
        }

        for label in diag.labels.iter().filter(|l| l.style == LabelStyle::Secondary) {
            match source_db.resolve_span(label.span) {
                Some(loc) => out.push_str(&format!("   = {loc}: {}\n", label.message)),
                None => out.push_str(&format!("   = {}\n", label.message)),
            }
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}
