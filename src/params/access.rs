//! Typed access to a parameter bag.

use super::bag::ParameterBag;
use super::codec::Codec;
use super::compound::{read_variant, write_variant, CompoundSpec, Variant};
use super::errors::ParamError;
use super::field::{check_fields, Field, FieldSpec};

/// Anything backed by a [`ParameterBag`] and described by a field table.
///
/// Implemented by [`Entity`](super::Entity) and by compound [`Variant`]s; all
/// typed reads and writes go through the provided methods.
pub trait Parametrized {
    /// Backing bag
    fn params(&self) -> &ParameterBag;

    /// Backing bag, mutably
    fn params_mut(&mut self) -> &mut ParameterBag;

    /// Field table of the owner
    fn fields(&self) -> &'static [FieldSpec];

    /// Stores a raw parameter, bypassing codecs
    fn param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params_mut().set(key, value);
    }

    /// Returns true if `key` is present
    fn has_param(&self, key: &str) -> bool {
        self.params().has(key)
    }

    /// Reads a typed value. An absent key reads as `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamError`] if the stored value does not decode.
    fn get<C: Codec>(&self, field: &Field<C>) -> Result<Option<C::Value>, ParamError> {
        match self.params().get(field.key()) {
            Some(raw) => field.codec().decode(field.key(), raw).map(Some),
            None => Ok(None),
        }
    }

    /// Writes a typed value
    fn set<C: Codec>(&mut self, field: &Field<C>, value: impl Into<C::Value>) {
        self.set_opt(field, Some(value.into()));
    }

    /// Writes an optional typed value. `None`, or a value the codec encodes
    /// as unset, removes the key.
    fn set_opt<C: Codec>(&mut self, field: &Field<C>, value: Option<C::Value>) {
        if let Some(replacement) = field.spec().deprecated_for {
            tracing::warn!(
                field = field.name(),
                replacement,
                "writing deprecated property"
            );
        }
        match value.as_ref().and_then(|v| field.codec().encode(v)) {
            Some(encoded) => self.params_mut().set(field.key(), encoded),
            None => {
                if self.params_mut().remove(field.key()).is_some() {
                    tracing::debug!(key = field.key(), "parameter removed");
                }
            }
        }
    }

    /// Removes the field's key
    fn unset<C: Codec>(&mut self, field: &Field<C>) {
        self.set_opt(field, None);
    }

    /// Reads the active variant of a compound field
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownVariant`] if the stored token is not in
    /// the compound's table.
    fn compound(&self, spec: &CompoundSpec) -> Result<Option<Variant>, ParamError> {
        read_variant(self.params(), spec)
    }

    /// Assigns a compound field, clearing the previous variant's keys
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::ForeignVariant`] if `value` is not one of the
    /// compound's variants.
    fn set_compound(&mut self, spec: &CompoundSpec, value: Option<Variant>) -> Result<(), ParamError> {
        write_variant(self.params_mut(), spec, value)
    }

    /// Decodes every present field, collecting all decode failures
    fn decode_all(&self) -> Vec<ParamError> {
        let mut errors = Vec::new();
        check_fields(self.fields(), self.params(), &mut errors);
        errors
    }
}
