//! Catalog of known entity schemas
//!
//! Every kind is declared once per API generation as static data. The
//! [`Catalog`] indexes them by kind and resolves stored entities back to
//! their schema.

pub mod build_features;
pub mod project_features;
pub mod pull_requests;
pub mod triggers;

use crate::params::{ApiVersion, Category, EntitySchema, ParamError, ParameterBag};
use ahash::AHashMap;
use once_cell::sync::Lazy;

/// Every schema shipped with the crate
pub static STANDARD_SCHEMAS: &[&EntitySchema] = &[
    &build_features::vcs_labeling::SCHEMA,
    &build_features::ssh_agent::SCHEMA,
    &build_features::auto_merge::SCHEMA,
    &build_features::free_disk_space::SCHEMA,
    &pull_requests::SCHEMA,
    &project_features::azure_devops_connection::SCHEMA,
    &project_features::build_report_tab::SCHEMA,
    &project_features::google_connection_v10::SCHEMA,
    &project_features::google_connection::SCHEMA,
    &project_features::bugzilla::SCHEMA,
    &project_features::slack_connection::SCHEMA,
    &triggers::retry_build::SCHEMA,
];

static STANDARD: Lazy<Catalog> = Lazy::new(|| Catalog::new(STANDARD_SCHEMAS.iter().copied()));

/// Index of schemas by kind and API generation
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    schemas: Vec<&'static EntitySchema>,
    by_kind: AHashMap<&'static str, Vec<&'static EntitySchema>>,
}

impl Catalog {
    /// Creates a catalog from `schemas`
    pub fn new(schemas: impl IntoIterator<Item = &'static EntitySchema>) -> Self {
        let mut catalog = Self::default();
        for schema in schemas {
            catalog.register(schema);
        }
        catalog
    }

    /// Catalog of every schema shipped with the crate
    #[must_use]
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    /// Adds a schema. A schema with the same kind and version replaces the
    /// previous one.
    pub fn register(&mut self, schema: &'static EntitySchema) {
        let versions = self.by_kind.entry(schema.kind).or_default();
        if let Some(existing) = versions.iter_mut().find(|s| s.version == schema.version) {
            tracing::debug!(kind = schema.kind, version = %schema.version, "schema replaced");
            *existing = schema;
            if let Some(slot) = self.schemas.iter_mut().find(|s| ***s == *schema) {
                *slot = schema;
            }
            return;
        }
        versions.push(schema);
        versions.sort_by_key(|s| s.version);
        self.schemas.push(schema);
    }

    /// Newest schema of `kind` usable under `version`
    #[must_use]
    pub fn find(&self, kind: &str, version: ApiVersion) -> Option<&'static EntitySchema> {
        self.by_kind
            .get(kind)?
            .iter()
            .rev()
            .find(|s| s.version <= version)
            .copied()
    }

    /// Resolves a stored entity to its schema
    ///
    /// Several kinds can share one type discriminator; seed parameters tell
    /// them apart. Among matches the newest generation usable under
    /// `version` wins.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownEntity`] if no schema matches.
    pub fn identify(
        &self,
        category: Category,
        version: ApiVersion,
        type_id: &str,
        params: &ParameterBag,
    ) -> Result<&'static EntitySchema, ParamError> {
        self.schemas
            .iter()
            .copied()
            .filter(|s| s.category == category && s.version <= version)
            .filter(|s| s.matches(type_id, params))
            .max_by_key(|s| (s.seeds.len(), s.version))
            .ok_or_else(|| ParamError::UnknownEntity {
                category: category.to_string(),
                type_id: type_id.to_string(),
                version: version.to_string(),
            })
    }

    /// Known kind names, sorted
    #[must_use]
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.by_kind.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Every schema of `kind`, oldest first
    #[must_use]
    pub fn versions(&self, kind: &str) -> &[&'static EntitySchema] {
        self.by_kind.get(kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates over all schemas in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'static EntitySchema> + '_ {
        self.schemas.iter().copied()
    }

    /// Number of schemas
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if the catalog holds no schema
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
