//! Reading and validating `vire.toml`.

use crate::error::ConfigError;
use crate::types::VireConfig;
use std::path::Path;

/// Reads `<project_dir>/vire.toml`.
pub fn load_config(project_dir: &Path) -> Result<VireConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join("vire.toml"))?;
    load_config_from_str(&content)
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<VireConfig, ConfigError> {
    let config: VireConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &VireConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.synth.error_limit == Some(0) {
        return Err(ConfigError::ValidationError(
            "synth.error_limit must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiagnosticFormat, Generation};

    #[test]
    fn minimal_config_uses_defaults() {
        let config = load_config_from_str("[project]\nname = \"alu\"\n").unwrap();
        assert_eq!(config.project.name, "alu");
        assert_eq!(config.synth.generation, Generation::V2001X);
        assert_eq!(config.synth.error_limit, None);
        assert_eq!(config.diagnostics.format, DiagnosticFormat::Line);
        assert!(!config.diagnostics.color);
    }

    #[test]
    fn full_config() {
        let toml = r#"
[project]
name = "alu"

[synth]
generation = "2001"
error_limit = 20

[diagnostics]
format = "terminal"
color = true
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.synth.generation, Generation::V2001);
        assert_eq!(config.synth.error_limit, Some(20));
        assert_eq!(config.diagnostics.format, DiagnosticFormat::Terminal);
        assert!(config.diagnostics.color);
    }

    #[test]
    fn empty_name_errors() {
        let err = load_config_from_str("[project]\nname = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn zero_error_limit_errors() {
        let err = load_config_from_str("[project]\nname = \"a\"\n[synth]\nerror_limit = 0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_generation_errors() {
        let err = load_config_from_str("[project]\nname = \"a\"\n[synth]\ngeneration = \"2005\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vire.toml"), "[project]\nname = \"disk\"\n").unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.project.name, "disk");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
