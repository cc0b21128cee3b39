//! Configurable entities: a schema, an optional id and a parameter bag.

#![allow(clippy::must_use_candidate)]

use super::access::Parametrized;
use super::bag::ParameterBag;
use super::field::FieldSpec;
use super::schema::EntitySchema;
use super::types::{ApiVersion, Category};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// One build feature, project feature or trigger.
///
/// The type discriminator comes from the schema and cannot change after
/// construction. Schema seed parameters are written first.
#[derive(Debug, Clone)]
pub struct Entity {
    schema: &'static EntitySchema,
    id: Option<String>,
    params: ParameterBag,
}

impl Entity {
    /// Creates an entity of `schema` holding only its seed parameters
    pub fn new(schema: &'static EntitySchema) -> Self {
        let params = schema.seeds.iter().copied().collect();
        Self {
            schema,
            id: None,
            params,
        }
    }

    /// Creates an entity starting from a copy of `base`.
    ///
    /// The bag is copied, so mutating the result never affects `base`.
    pub fn from_base(base: &Entity) -> Self {
        base.clone()
    }

    /// Creates an entity from stored parameters. Seeds are written first and
    /// keep their schema values.
    pub fn from_params(schema: &'static EntitySchema, id: Option<String>, params: ParameterBag) -> Self {
        let mut entity = Self::new(schema);
        entity.id = id;
        entity.params.extend(params.iter());
        entity.params.extend(schema.seeds.iter().copied());
        entity
    }

    /// Applies `init` and returns the configured entity
    #[must_use]
    pub fn configure(mut self, init: impl FnOnce(&mut Self)) -> Self {
        init(&mut self);
        self
    }

    /// Sets the entity id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets or clears the entity id
    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    /// Entity id
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Schema this entity is bound to
    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    /// Kind name
    pub fn kind(&self) -> &'static str {
        self.schema.kind
    }

    /// Type discriminator
    pub fn type_id(&self) -> &'static str {
        self.schema.type_id
    }

    /// Container category
    pub fn category(&self) -> Category {
        self.schema.category
    }

    /// API generation
    pub fn version(&self) -> ApiVersion {
        self.schema.version
    }
}

impl Parametrized for Entity {
    fn params(&self) -> &ParameterBag {
        &self.params
    }

    /// Seed parameters identify the kind and must be left unchanged
    fn params_mut(&mut self) -> &mut ParameterBag {
        &mut self.params
    }

    /// Stores a raw parameter. Writes to seed parameters are ignored.
    fn param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if let Some((_, seed)) = self.schema.seeds.iter().find(|(k, _)| *k == key) {
            tracing::warn!(key = %key, seed, kind = self.schema.kind, "seed parameter is fixed");
            return;
        }
        self.params.set(key, value);
    }

    fn fields(&self) -> &'static [FieldSpec] {
        self.schema.fields
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema && self.id == other.id && self.params == other.params
    }
}

impl Eq for Entity {}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.schema.kind, self.schema.version)?;
        if let Some(id) = &self.id {
            write!(f, " '{id}'")?;
        }
        Ok(())
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.id.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("Entity", len)?;
        if let Some(id) = &self.id {
            state.serialize_field("id", id)?;
        } else {
            state.skip_field("id")?;
        }
        state.serialize_field("type", self.schema.type_id)?;
        state.serialize_field("params", &self.params)?;
        state.end()
    }
}
