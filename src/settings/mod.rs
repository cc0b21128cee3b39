//! Settings documents: versioned collections of entities
//!
//! A [`Settings`] value groups build features, project features and triggers
//! under one API version. It loads from and saves to the raw document form in
//! [`document`].

pub mod document;

pub use document::{DocumentError, RawDocument, RawEntity};

use crate::catalog::Catalog;
use crate::params::{
    ApiVersion, Category, Entity, ParamError, Parametrized, Validate, ValidationContext,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::path::Path;
use thiserror::Error;

/// Decode failure of one stored value, located by document path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{location}: {error}")]
pub struct DecodeError {
    /// Entity location, e.g. `buildFeatures[0]`
    pub location: String,
    /// Underlying error
    pub error: ParamError,
}

/// Ordered entities of a single category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    category: Category,
    entities: Vec<Entity>,
}

impl FeatureSet {
    /// Creates an empty set for `category`
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entities: Vec::new(),
        }
    }

    /// Category accepted by this set
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Appends an entity
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::CategoryMismatch`] if the entity belongs to
    /// another category.
    pub fn add(&mut self, entity: Entity) -> Result<(), ParamError> {
        if entity.category() != self.category {
            return Err(ParamError::CategoryMismatch {
                kind: entity.kind().to_string(),
                expected: self.category.to_string(),
                actual: entity.category().to_string(),
            });
        }
        self.entities.push(entity);
        Ok(())
    }

    /// Entity with the given id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == Some(id))
    }

    /// Iterates over entities in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Number of entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the set holds no entity
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn location(&self, index: usize) -> String {
        format!("{}[{index}]", self.category.section())
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl Validate for FeatureSet {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        for (index, entity) in self.entities.iter().enumerate() {
            ctx.scoped(self.location(index), |ctx| entity.validate_into(ctx));
        }
    }
}

impl Serialize for FeatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entities)
    }
}

/// A complete settings document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    version: ApiVersion,
    build_features: FeatureSet,
    project_features: FeatureSet,
    triggers: FeatureSet,
}

impl Settings {
    /// Creates empty settings for `version`
    #[must_use]
    pub fn new(version: ApiVersion) -> Self {
        Self {
            version,
            build_features: FeatureSet::new(Category::BuildFeature),
            project_features: FeatureSet::new(Category::ProjectFeature),
            triggers: FeatureSet::new(Category::Trigger),
        }
    }

    /// Resolves every entry of `raw` through `catalog`
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownEntity`] for the first entry no schema
    /// matches.
    pub fn from_document(
        raw: RawDocument,
        default_version: ApiVersion,
        catalog: &Catalog,
    ) -> Result<Self, ParamError> {
        let version = raw.version.unwrap_or(default_version);
        let mut settings = Self::new(version);
        let sections = [
            (Category::BuildFeature, raw.build_features),
            (Category::ProjectFeature, raw.project_features),
            (Category::Trigger, raw.triggers),
        ];
        for (category, entries) in sections {
            for entry in entries {
                let schema = catalog.identify(category, version, &entry.type_id, &entry.params)?;
                tracing::debug!(kind = schema.kind, version = %schema.version, "entity resolved");
                settings
                    .set_mut(category)
                    .add(Entity::from_params(schema, entry.id, entry.params))?;
            }
        }
        Ok(settings)
    }

    /// Reads a YAML or JSON document from `path` and resolves it against the
    /// standard catalog
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the file cannot be read or parsed, or an
    /// entry matches no schema.
    pub fn load(path: &Path, default_version: ApiVersion) -> Result<Self, DocumentError> {
        let raw = RawDocument::from_path(path)?;
        Ok(Self::from_document(raw, default_version, Catalog::standard())?)
    }

    /// Raw document form of these settings
    #[must_use]
    pub fn to_document(&self) -> RawDocument {
        let section = |set: &FeatureSet| set.iter().map(RawEntity::from).collect();
        RawDocument {
            version: Some(self.version),
            build_features: section(&self.build_features),
            project_features: section(&self.project_features),
            triggers: section(&self.triggers),
        }
    }

    /// API version
    #[must_use]
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Set holding `category`
    #[must_use]
    pub fn set(&self, category: Category) -> &FeatureSet {
        match category {
            Category::BuildFeature => &self.build_features,
            Category::ProjectFeature => &self.project_features,
            Category::Trigger => &self.triggers,
        }
    }

    /// Set holding `category`, mutably
    pub fn set_mut(&mut self, category: Category) -> &mut FeatureSet {
        match category {
            Category::BuildFeature => &mut self.build_features,
            Category::ProjectFeature => &mut self.project_features,
            Category::Trigger => &mut self.triggers,
        }
    }

    /// Adds an entity to the set of its own category
    pub fn add(&mut self, entity: Entity) {
        let set = self.set_mut(entity.category());
        set.entities.push(entity);
    }

    /// Build features
    #[must_use]
    pub fn build_features(&self) -> &FeatureSet {
        &self.build_features
    }

    /// Project features
    #[must_use]
    pub fn project_features(&self) -> &FeatureSet {
        &self.project_features
    }

    /// Triggers
    #[must_use]
    pub fn triggers(&self) -> &FeatureSet {
        &self.triggers
    }

    /// Iterates over every entity with its document location
    pub fn entities(&self) -> impl Iterator<Item = (String, &Entity)> {
        Category::ALL.into_iter().flat_map(move |category| {
            let set = self.set(category);
            set.iter()
                .enumerate()
                .map(move |(index, entity)| (set.location(index), entity))
        })
    }

    /// Decodes every present value of every entity
    #[must_use]
    pub fn decode_all(&self) -> Vec<DecodeError> {
        self.entities()
            .flat_map(|(location, entity)| {
                entity.decode_all().into_iter().map(move |error| DecodeError {
                    location: location.clone(),
                    error,
                })
            })
            .collect()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(ApiVersion::default())
    }
}

impl Validate for Settings {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        for category in Category::ALL {
            self.set(category).validate_into(ctx);
        }
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Settings", 4)?;
        state.serialize_field("version", &self.version)?;
        state.serialize_field("buildFeatures", &self.build_features)?;
        state.serialize_field("projectFeatures", &self.project_features)?;
        state.serialize_field("triggers", &self.triggers)?;
        state.end()
    }
}
