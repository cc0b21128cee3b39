//! `buildparams doc` - Generate a reference of the known entity kinds

use anyhow::Result;
use buildparams::catalog::Catalog;
use buildparams::params::{ApiVersion, EntitySchema, FieldKind, FieldSpec};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct KindDoc {
    pub kind: String,
    pub category: String,
    pub type_id: String,
    pub since: String,
    pub summary: String,
    pub seeds: Vec<String>,
    pub fields: Vec<FieldDoc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDoc {
    pub property: String,
    pub key: String,
    pub kind: String,
    pub mandatory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated_for: Option<String>,
    /// Discriminator value that activates the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum DocFormat {
    Markdown,
    Json,
}

pub fn generate_doc(version: ApiVersion, kind: Option<&str>, format: DocFormat) -> Result<String> {
    let catalog = Catalog::standard();

    let schemas: Vec<&EntitySchema> = match kind {
        Some(kind) => match catalog.find(kind, version) {
            Some(schema) => vec![schema],
            None => anyhow::bail!("Unknown kind '{kind}' for API version {version}"),
        },
        None => catalog
            .kinds()
            .into_iter()
            .filter_map(|kind| catalog.find(kind, version))
            .collect(),
    };

    let docs: Vec<KindDoc> = schemas.into_iter().map(describe).collect();

    match format {
        DocFormat::Markdown => Ok(render_markdown(version, &docs)),
        DocFormat::Json => Ok(render_json(&docs)),
    }
}

fn describe(schema: &EntitySchema) -> KindDoc {
    let mut fields = Vec::new();
    describe_fields(schema.fields, "", None, &mut fields);
    KindDoc {
        kind: schema.kind.to_string(),
        category: schema.category.to_string(),
        type_id: schema.type_id.to_string(),
        since: schema.version.to_string(),
        summary: schema.summary.to_string(),
        seeds: schema
            .seeds
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect(),
        fields,
    }
}

fn describe_fields(fields: &[FieldSpec], prefix: &str, when: Option<&str>, out: &mut Vec<FieldDoc>) {
    for field in fields {
        let property = format!("{prefix}{}", field.name);
        out.push(FieldDoc {
            property: property.clone(),
            key: field.key.to_string(),
            kind: field.kind.to_string(),
            mandatory: field.mandatory,
            deprecated_for: field.deprecated_for.map(str::to_string),
            when: when.map(str::to_string),
        });
        if let FieldKind::Compound(spec) = field.kind {
            for variant in spec.variants {
                let condition = format!("{}={}", spec.key, variant.token);
                describe_fields(variant.fields, &format!("{property}."), Some(&condition), out);
            }
        }
    }
}

fn render_markdown(version: ApiVersion, docs: &[KindDoc]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Settings reference (API version {version})\n");

    for doc in docs {
        let _ = writeln!(output, "## {}\n", doc.kind);
        let _ = writeln!(output, "{}\n", doc.summary);
        let _ = writeln!(output, "- Category: {}", doc.category);
        let _ = writeln!(output, "- Type: `{}`", doc.type_id);
        let _ = writeln!(output, "- Since: {}", doc.since);
        if !doc.seeds.is_empty() {
            let seeds: Vec<String> = doc.seeds.iter().map(|s| format!("`{s}`")).collect();
            let _ = writeln!(output, "- Seeds: {}", seeds.join(", "));
        }
        output.push('\n');

        if doc.fields.is_empty() {
            output.push_str("No parameters.\n\n");
            continue;
        }

        output.push_str("| Property | Key | Type | Mandatory | Notes |\n");
        output.push_str("|----------|-----|------|-----------|-------|\n");
        for field in &doc.fields {
            let mut notes = Vec::new();
            if let Some(when) = &field.when {
                notes.push(format!("when `{when}`"));
            }
            if let Some(replacement) = &field.deprecated_for {
                notes.push(format!("deprecated, use `{replacement}`"));
            }
            let _ = writeln!(
                output,
                "| `{}` | `{}` | {} | {} | {} |",
                field.property,
                field.key,
                field.kind,
                if field.mandatory { "yes" } else { "no" },
                notes.join("; ")
            );
        }
        output.push('\n');
    }

    output
}

fn render_json(docs: &[KindDoc]) -> String {
    serde_json::to_string_pretty(docs).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_reference() {
        let markdown = generate_doc(ApiVersion::Latest, None, DocFormat::Markdown).unwrap();

        assert!(markdown.starts_with("# Settings reference (API version latest)"));
        assert!(markdown.contains("## PullRequests"));
        assert!(markdown.contains("## RetryBuildTrigger"));
        assert!(markdown.contains(
            "| `provider.authType.token` | `secure:accessToken` | string | yes | when `authenticationType=token` |"
        ));
        assert!(markdown.contains("- Seeds: `providerType=tfs`, `type=token`"));
    }

    #[test]
    fn test_single_kind_follows_version() {
        let latest = generate_doc(ApiVersion::Latest, Some("GoogleConnection"), DocFormat::Json).unwrap();
        let docs: serde_json::Value = serde_json::from_str(&latest).unwrap();
        assert_eq!(docs.as_array().unwrap().len(), 1);
        assert_eq!(docs[0]["since"], "2018.2");
        assert_eq!(docs[0]["fields"][0]["mandatory"], true);

        let old = generate_doc(ApiVersion::V10, Some("GoogleConnection"), DocFormat::Json).unwrap();
        let docs: serde_json::Value = serde_json::from_str(&old).unwrap();
        assert_eq!(docs[0]["since"], "10");
        assert_eq!(docs[0]["fields"][0]["mandatory"], false);
    }

    #[test]
    fn test_kinds_missing_from_old_versions_are_skipped() {
        let markdown = generate_doc(ApiVersion::V10, None, DocFormat::Markdown).unwrap();
        assert!(markdown.contains("## RetryBuildTrigger"));
        assert!(!markdown.contains("## BugzillaIssueTracker"));
    }

    #[test]
    fn test_unknown_kind() {
        let err = generate_doc(ApiVersion::Latest, Some("Nightly"), DocFormat::Markdown).unwrap_err();
        assert!(err.to_string().contains("Unknown kind 'Nightly'"));
    }
}
