//! Typed view of `vire.toml`.

use serde::Deserialize;
use vire_diagnostics::{DiagnosticRenderer, LineRenderer, TerminalRenderer};

/// Root of `vire.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct VireConfig {
    /// `[project]`.
    pub project: ProjectSection,
    /// `[synth]`.
    #[serde(default)]
    pub synth: SynthConfig,
    /// `[diagnostics]`.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// `[project]` table.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectSection {
    /// Project name; must be non-empty.
    pub name: String,
}

/// `[synth]` table.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SynthConfig {
    /// Verilog generation the design is compiled under.
    #[serde(default)]
    pub generation: Generation,
    /// Stop attempting further root expressions once this many errors were counted.
    pub error_limit: Option<usize>,
}

/// Language generation, which gates a few extensions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum Generation {
    /// IEEE 1364-1995.
    #[serde(rename = "1995")]
    V1995,
    /// IEEE 1364-2001.
    #[serde(rename = "2001")]
    V2001,
    /// IEEE 1364-2001 plus extensions.
    #[serde(rename = "2001x")]
    #[default]
    V2001X,
}

impl Generation {
    /// Whether `%` accepts real operands.
    pub fn allows_real_modulus(self) -> bool {
        self >= Generation::V2001X
    }
}

/// `[diagnostics]` table.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    /// Output style.
    #[serde(default)]
    pub format: DiagnosticFormat,
    /// ANSI colors in terminal output.
    #[serde(default)]
    pub color: bool,
}

impl DiagnosticsConfig {
    /// The renderer selected by `format`; `color` only affects terminal output.
    pub fn renderer(&self) -> Box<dyn DiagnosticRenderer> {
        match self.format {
            DiagnosticFormat::Line => Box::new(LineRenderer),
            DiagnosticFormat::Terminal => Box::new(TerminalRenderer::new(self.color)),
        }
    }
}

/// Diagnostic output style.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticFormat {
    /// One `file:line: severity: message` line each.
    #[default]
    Line,
    /// Multi-line output with a source excerpt.
    Terminal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_gate() {
        assert!(!Generation::V1995.allows_real_modulus());
        assert!(!Generation::V2001.allows_real_modulus());
        assert!(Generation::V2001X.allows_real_modulus());
        assert_eq!(Generation::default(), Generation::V2001X);
    }

    #[test]
    fn renderer_follows_format() {
        use vire_diagnostics::{Category, Diagnostic, DiagnosticCode};
        use vire_source::{SourceDb, Span};

        let db = SourceDb::new();
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 301),
            "real operand",
            Span::DUMMY,
        );
        let line = DiagnosticsConfig::default().renderer().render(&diag, &db);
        assert_eq!(line, "error: real operand [E301]");

        let terminal = DiagnosticsConfig {
            format: DiagnosticFormat::Terminal,
            color: false,
        };
        let out = terminal.renderer().render(&diag, &db);
        assert!(out.starts_with("error[E301]: real operand"));
    }

    #[test]
    fn generation_names() {
        for (input, expected) in [
            ("1995", Generation::V1995),
            ("2001", Generation::V2001),
            ("2001x", Generation::V2001X),
        ] {
            let text = format!("generation = \"{input}\"");
            let synth: SynthConfig = toml::from_str(&text).unwrap();
            assert_eq!(synth.generation, expected);
        }
    }
}
