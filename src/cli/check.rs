//! `buildparams check` - Decode and validate a settings document
//!
//! Loads the document, decodes every stored value and validates mandatory
//! properties of every entity.
//!
//! ## Usage
//!
//! ```bash
//! buildparams check settings.yaml
//! # Exit code 0: No problems found
//! # Exit code 1: Decode or validation errors found
//! ```

use super::lint::{self, LintConfig, LintMessage, LintSeverity};
use anyhow::{Context, Result};
use buildparams::params::{ApiVersion, Validate, ValidationError};
use buildparams::settings::{DecodeError, Settings};
use std::fmt::Write;
use std::path::Path;

/// Outcome of checking one document
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Stored values that do not decode
    pub decode_errors: Vec<DecodeError>,
    /// Missing mandatory properties
    pub validation_errors: Vec<ValidationError>,
    /// Lint warnings and errors
    pub lint: Vec<LintMessage>,
}

impl CheckReport {
    /// Number of problems that fail the check
    #[must_use]
    pub fn problem_count(&self, deny_warnings: bool) -> usize {
        let lint = self
            .lint
            .iter()
            .filter(|m| m.severity == LintSeverity::Error || deny_warnings)
            .count();
        self.decode_errors.len() + self.validation_errors.len() + lint
    }

    /// Returns true if nothing fails the check
    #[must_use]
    pub fn is_ok(&self, deny_warnings: bool) -> bool {
        self.problem_count(deny_warnings) == 0
    }

    /// Human readable report
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for err in &self.decode_errors {
            let _ = writeln!(out, "error: {err}");
        }
        for err in &self.validation_errors {
            let _ = writeln!(out, "error: {}", err.message);
            let _ = writeln!(out, "  --> {}", err.property());
        }
        for msg in &self.lint {
            let _ = writeln!(out, "{}: {} [{}]", msg.severity, msg.message, msg.code);
            let _ = writeln!(out, "  --> {}", msg.location);
        }
        if out.is_empty() {
            out.push_str("No problems found.\n");
        }
        out
    }
}

/// Checks the settings document at `file`
///
/// # Arguments
///
/// * `file` - YAML or JSON settings document
/// * `version` - API version assumed if the document declares none
pub fn check_settings(file: &Path, version: ApiVersion) -> Result<CheckReport> {
    tracing::debug!("Checking settings: {}", file.display());

    let settings = Settings::load(file, version)
        .with_context(|| format!("Failed to load settings: {}", file.display()))?;

    let lint_config = LintConfig {
        min_severity: LintSeverity::Warning,
        ..LintConfig::default()
    };
    let report = CheckReport {
        decode_errors: settings.decode_all(),
        validation_errors: settings.validate(),
        lint: lint::lint(&settings, &lint_config),
    };

    tracing::info!(
        decode = report.decode_errors.len(),
        validation = report.validation_errors.len(),
        lint = report.lint.len(),
        "check finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_check_valid_settings() {
        let dir = TempDir::new().unwrap();
        let file = write(
            &dir,
            "ok.yaml",
            r#"
buildFeatures:
  - type: VcsLabeling
    params:
      vcsRootId: Project_Git
      successfulOnly: "true"
"#,
        );
        let report = check_settings(&file, ApiVersion::Latest).unwrap();
        assert!(report.is_ok(true), "{}", report.render());
        assert_eq!(report.render(), "No problems found.\n");
    }

    #[test]
    fn test_check_reports_every_problem() {
        let dir = TempDir::new().unwrap();
        let file = write(
            &dir,
            "bad.json",
            r#"{
  "projectFeatures": [
    { "type": "IssueTracker", "params": { "type": "bugzilla", "host": "h" } }
  ],
  "buildFeatures": [
    { "type": "VcsLabeling", "params": { "vcsRootId": "R", "successfulOnly": "yes", "typo": "x" } }
  ]
}"#,
        );
        let report = check_settings(&file, ApiVersion::Latest).unwrap();
        assert_eq!(report.decode_errors.len(), 1);
        assert_eq!(report.validation_errors.len(), 2);
        assert_eq!(report.lint.len(), 1);
        assert_eq!(report.problem_count(false), 3);
        assert_eq!(report.problem_count(true), 4);

        let rendered = report.render();
        assert!(rendered.contains("projectFeatures[0].issueIdPattern"));
        assert!(rendered.contains("buildFeatures[0]"));
    }

    #[test]
    fn test_check_unknown_type_fails() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "unknown.yaml", "triggers:\n  - type: nightly\n");
        let err = check_settings(&file, ApiVersion::Latest).unwrap_err();
        assert!(format!("{err:#}").contains("nightly"));
    }

    #[test]
    fn test_check_missing_file() {
        assert!(check_settings(Path::new("/nonexistent.yaml"), ApiVersion::Latest).is_err());
    }
}
