//! `buildparams lint` - Report suspicious parameters and ids
//!
//! | Code | Severity | Finding |
//! |------|----------|---------|
//! | L001 | warning  | parameter key no field of the kind owns |
//! | L002 | info     | mandatory property present but empty |
//! | L003 | error    | invalid entity id |
//! | L004 | warning  | secure parameter holding a plain value |

use anyhow::{Context, Result};
use buildparams::params::{
    accepted_keys, ApiVersion, Entity, FieldKind, FieldSpec, ParameterBag, Parametrized,
};
use buildparams::settings::Settings;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[A-Za-z][A-Za-z0-9_]*$").unwrap_or_else(|err| unreachable!("id pattern: {err}"))
});

const MAX_ID_LENGTH: usize = 225;
const SECURE_PREFIX: &str = "secure:";
const CREDENTIALS_REFERENCE: &str = "credentialsJSON:";

#[derive(Debug, Clone, Serialize)]
pub struct LintMessage {
    pub code: String,
    pub message: String,
    pub location: String,
    pub severity: LintSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LintSeverity::Info => write!(f, "info"),
            LintSeverity::Warning => write!(f, "warning"),
            LintSeverity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug)]
pub struct LintConfig {
    pub min_severity: LintSeverity,
    pub show_suggestions: bool,
    pub format: OutputFormat,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            min_severity: LintSeverity::Info,
            show_suggestions: false,
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn lint_settings(file: &Path, version: ApiVersion, config: &LintConfig) -> Result<Vec<LintMessage>> {
    let settings = Settings::load(file, version)
        .with_context(|| format!("Failed to load settings: {}", file.display()))?;
    Ok(lint(&settings, config))
}

pub fn lint(settings: &Settings, config: &LintConfig) -> Vec<LintMessage> {
    let mut messages = Vec::new();

    for (location, entity) in settings.entities() {
        messages.extend(check_unknown_keys(&location, entity));
        messages.extend(check_empty_mandatory(&location, entity));
        messages.extend(check_id(&location, entity));
        messages.extend(check_secure_values(&location, entity));
    }

    messages.retain(|msg| msg.severity >= config.min_severity);
    messages
}

fn check_unknown_keys(location: &str, entity: &Entity) -> Vec<LintMessage> {
    let schema = entity.schema();
    entity
        .params()
        .keys()
        .filter(|key| !schema.knows_key(key))
        .map(|key| LintMessage {
            code: "L001".to_string(),
            message: format!("Unknown parameter '{key}' for {}", schema.kind),
            location: location.to_string(),
            severity: LintSeverity::Warning,
            suggestion: Some(format!(
                "Known keys: {}",
                schema.owned_keys().join(", ")
            )),
        })
        .collect()
}

fn check_empty_mandatory(location: &str, entity: &Entity) -> Vec<LintMessage> {
    let mut messages = Vec::new();
    let mut empty = Vec::new();
    collect_empty_mandatory(entity.fields(), entity.params(), "", &mut empty);
    for property in empty {
        messages.push(LintMessage {
            code: "L002".to_string(),
            message: format!("Mandatory property '{property}' is empty"),
            location: location.to_string(),
            severity: LintSeverity::Info,
            suggestion: Some("An empty value satisfies validation but is rarely intended".to_string()),
        });
    }
    messages
}

fn collect_empty_mandatory(fields: &[FieldSpec], bag: &ParameterBag, prefix: &str, out: &mut Vec<String>) {
    for field in fields {
        if field.deprecated_for.is_some() {
            continue;
        }
        let Some(value) = accepted_keys(fields, field)
            .into_iter()
            .find_map(|key| bag.get(key))
        else {
            continue;
        };
        let property = format!("{prefix}{}", field.name);
        if field.mandatory && value.is_empty() {
            out.push(property.clone());
        }
        if let FieldKind::Compound(spec) = field.kind {
            if let Some(variant) = spec.variant(value) {
                collect_empty_mandatory(variant.fields, bag, &format!("{property}."), out);
            }
        }
    }
}

fn check_id(location: &str, entity: &Entity) -> Option<LintMessage> {
    let id = entity.id()?;
    let problem = if id.len() > MAX_ID_LENGTH {
        format!("is longer than {MAX_ID_LENGTH} characters")
    } else if !ID_PATTERN.is_match(id) {
        "must start with a letter and contain only letters, digits and underscores".to_string()
    } else {
        return None;
    };
    Some(LintMessage {
        code: "L003".to_string(),
        message: format!("Id '{id}' {problem}"),
        location: location.to_string(),
        severity: LintSeverity::Error,
        suggestion: Some("Rename the entity, e.g. 'Project_Feature1'".to_string()),
    })
}

fn check_secure_values(location: &str, entity: &Entity) -> Vec<LintMessage> {
    entity
        .params()
        .iter()
        .filter(|(key, value)| {
            key.starts_with(SECURE_PREFIX)
                && !value.is_empty()
                && !value.starts_with(CREDENTIALS_REFERENCE)
        })
        .map(|(key, _)| LintMessage {
            code: "L004".to_string(),
            message: format!("Secure parameter '{key}' holds a plain value"),
            location: location.to_string(),
            severity: LintSeverity::Warning,
            suggestion: Some(format!(
                "Store the secret as a token and reference it as '{CREDENTIALS_REFERENCE}<uuid>'"
            )),
        })
        .collect()
}

pub fn format_lint_messages(messages: &[LintMessage], config: &LintConfig) -> String {
    match config.format {
        OutputFormat::Text => {
            if messages.is_empty() {
                "No lint issues found.".to_string()
            } else {
                let mut output = String::new();
                for msg in messages {
                    let _ = writeln!(
                        output,
                        "{}: {} ({}) [{}]",
                        msg.code, msg.message, msg.location, msg.severity
                    );
                    if let (true, Some(suggestion)) = (config.show_suggestions, &msg.suggestion) {
                        let _ = writeln!(output, "  {suggestion}");
                    }
                }
                output
            }
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(messages).unwrap_or_else(|_| "[]".to_string())
        }
    }
}
