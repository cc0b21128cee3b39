//! Entity schemas: one static description per entity kind and API version.

use super::bag::ParameterBag;
use super::field::{collect_keys, FieldSpec};
use super::types::{ApiVersion, Category};

/// Static description of one entity kind in one API generation.
///
/// Schemas are plain data interpreted by [`Entity`](super::Entity) and the
/// validator; adding a kind means adding a schema, not a type.
#[derive(Debug)]
pub struct EntitySchema {
    /// Kind name, unique per version (e.g. `VcsLabeling`)
    pub kind: &'static str,
    /// Container category
    pub category: Category,
    /// API generation that introduced this schema
    pub version: ApiVersion,
    /// Type discriminator stored with every entity
    pub type_id: &'static str,
    /// Parameters written at construction that identify the kind among
    /// entities sharing a type discriminator
    pub seeds: &'static [(&'static str, &'static str)],
    /// Field table
    pub fields: &'static [FieldSpec],
    /// One-line description
    pub summary: &'static str,
}

impl EntitySchema {
    /// Looks up a field by property name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if `key` is a seed or is owned by any field, including
    /// every compound variant
    #[must_use]
    pub fn knows_key(&self, key: &str) -> bool {
        self.seeds.iter().any(|(k, _)| *k == key) || self.owned_keys().contains(&key)
    }

    /// Every field key, including all compound variants
    #[must_use]
    pub fn owned_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        collect_keys(self.fields, &mut keys);
        keys
    }

    /// Returns true if an entity stored with `type_id` and `params` is of
    /// this kind
    #[must_use]
    pub fn matches(&self, type_id: &str, params: &ParameterBag) -> bool {
        self.type_id == type_id
            && self
                .seeds
                .iter()
                .all(|(key, value)| params.get(key) == Some(*value))
    }
}

impl PartialEq for EntitySchema {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.kind == other.kind && self.version == other.version)
    }
}

impl Eq for EntitySchema {}
