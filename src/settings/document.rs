//! Raw settings document: the on-disk YAML or JSON form
//!
//! ```yaml
//! version: "2019.2"
//! projectFeatures:
//!   - id: Bugs
//!     type: IssueTracker
//!     params:
//!       type: bugzilla
//!       host: https://bugs.example.com
//! ```

use crate::params::{ApiVersion, Entity, ParamError, ParameterBag, Parametrized};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or writing settings documents
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read or written
    #[error("Cannot access '{}': {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid YAML
    #[error("Invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid JSON
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// An entry could not be resolved
    #[error(transparent)]
    Param(#[from] ParamError),
}

/// Stored form of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntity {
    /// Entity id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Type discriminator
    #[serde(rename = "type")]
    pub type_id: String,
    /// Stored parameters
    #[serde(default)]
    pub params: ParameterBag,
}

impl From<&Entity> for RawEntity {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id().map(str::to_string),
            type_id: entity.type_id().to_string(),
            params: entity.params().clone(),
        }
    }
}

/// Stored form of a settings document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// API version; callers supply a default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<ApiVersion>,
    /// Build features
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub build_features: Vec<RawEntity>,
    /// Project features
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub project_features: Vec<RawEntity>,
    /// Triggers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<RawEntity>,
}

impl RawDocument {
    /// Parses a YAML document
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Yaml`] on invalid input.
    pub fn from_yaml_str(input: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Parses a JSON document
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] on invalid input.
    pub fn from_json_str(input: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Reads a document, choosing the format from the file extension.
    /// `.json` files are parsed as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if is_json(path) {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Serializes to YAML
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Yaml`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, DocumentError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serializes to pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of entries across all sections
    #[must_use]
    pub fn len(&self) -> usize {
        self.build_features.len() + self.project_features.len() + self.triggers.len()
    }

    /// Returns true if no section has entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_yaml() {
        let doc = RawDocument::from_yaml_str(
            "version: v2018_2\ntriggers:\n  - id: Retry\n    type: retryBuildTrigger\n    params:\n      retryAttempts: \"2\"\n",
        )
        .unwrap();
        assert_eq!(doc.version, Some(ApiVersion::V2018_2));
        assert_eq!(doc.triggers[0].id.as_deref(), Some("Retry"));
        assert_eq!(doc.triggers[0].params.get("retryAttempts"), Some("2"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_parse_json_without_params() {
        let doc =
            RawDocument::from_json_str(r#"{"buildFeatures":[{"type":"VcsLabeling"}]}"#).unwrap();
        assert_eq!(doc.version, None);
        assert!(doc.build_features[0].params.is_empty());
    }

    #[test]
    fn test_invalid_version_rejected() {
        let err = RawDocument::from_yaml_str("version: \"9.0\"\n").unwrap_err();
        assert!(matches!(err, DocumentError::Yaml(_)));
    }

    #[test]
    fn test_from_path_by_extension() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("settings.json");
        fs::write(&json, r#"{"triggers":[{"type":"retryBuildTrigger"}]}"#).unwrap();
        assert_eq!(RawDocument::from_path(&json).unwrap().triggers.len(), 1);

        let yaml = dir.path().join("settings.yml");
        fs::write(&yaml, "triggers:\n  - type: retryBuildTrigger\n").unwrap();
        assert_eq!(RawDocument::from_path(&yaml).unwrap().triggers.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = RawDocument::from_path(Path::new("/nonexistent/settings.yaml")).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let doc = RawDocument {
            version: Some(ApiVersion::Latest),
            ..RawDocument::default()
        };
        assert_eq!(doc.to_json().unwrap(), "{\n  \"version\": \"latest\"\n}");
    }
}
