//! Compound parameters: a field whose value is one of a closed set of variants.
//!
//! The active variant's token is stored under the compound's discriminator key
//! and the variant's own fields are flattened into the same bag as the owner.
//! Assigning a compound first clears every key owned by the previously active
//! variant (including nested compounds) so that no stale value can be read
//! through the new variant's accessors.

use super::access::Parametrized;
use super::bag::ParameterBag;
use super::errors::ParamError;
use super::field::{collect_keys, FieldSpec};
use ahash::AHashSet;
use std::fmt;

/// Variant table of a compound field
#[derive(Debug)]
pub struct CompoundSpec {
    /// Discriminator key in the owner's bag
    pub key: &'static str,
    /// Closed set of variants
    pub variants: &'static [&'static VariantSpec],
}

/// One variant of a compound field
#[derive(Debug)]
pub struct VariantSpec {
    /// Token stored under the discriminator key
    pub token: &'static str,
    /// Variant fields, stored flattened in the owner's bag
    pub fields: &'static [FieldSpec],
}

impl CompoundSpec {
    /// Looks up a variant by token
    #[must_use]
    pub fn variant(&self, token: &str) -> Option<&'static VariantSpec> {
        self.variants.iter().copied().find(|v| v.token == token)
    }

    /// Looks up a variant by token, failing on unknown tokens
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownVariant`] if no variant has this token.
    pub fn variant_or_err(&self, token: &str) -> Result<&'static VariantSpec, ParamError> {
        self.variant(token).ok_or_else(|| ParamError::UnknownVariant {
            key: self.key.to_string(),
            token: token.to_string(),
        })
    }

    /// Creates an empty value of the variant with this token
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownVariant`] if no variant has this token.
    pub fn select(&self, token: &str) -> Result<Variant, ParamError> {
        self.variant_or_err(token).map(Variant::new)
    }

    /// All variant tokens, in declaration order
    #[must_use]
    pub fn tokens(&self) -> Vec<&'static str> {
        self.variants.iter().map(|v| v.token).collect()
    }
}

impl VariantSpec {
    /// Every key owned by this variant, including keys of nested compounds
    #[must_use]
    pub fn owned_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        collect_keys(self.fields, &mut keys);
        keys
    }
}

/// A value of a compound field: the selected variant and its own parameters
#[derive(Clone)]
pub struct Variant {
    spec: &'static VariantSpec,
    params: ParameterBag,
}

impl Variant {
    /// Creates an empty value of `spec`
    #[must_use]
    pub fn new(spec: &'static VariantSpec) -> Self {
        Self {
            spec,
            params: ParameterBag::new(),
        }
    }

    /// Applies `init` and returns the configured variant
    #[must_use]
    pub fn configure(mut self, init: impl FnOnce(&mut Self)) -> Self {
        init(&mut self);
        self
    }

    /// Stored discriminator token
    #[must_use]
    pub fn token(&self) -> &'static str {
        self.spec.token
    }

    /// Variant schema
    #[must_use]
    pub fn spec(&self) -> &'static VariantSpec {
        self.spec
    }
}

impl Parametrized for Variant {
    fn params(&self) -> &ParameterBag {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParameterBag {
        &mut self.params
    }

    fn fields(&self) -> &'static [FieldSpec] {
        self.spec.fields
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.spec.token == other.spec.token && self.params == other.params
    }
}

impl Eq for Variant {}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("token", &self.spec.token)
            .field("params", &self.params)
            .finish()
    }
}

fn same_keys(a: &VariantSpec, b: &VariantSpec) -> bool {
    std::ptr::eq(a, b) || a.fields.iter().map(|f| f.key).eq(b.fields.iter().map(|f| f.key))
}

/// Reconstructs the active variant of `spec` from `bag`
pub(crate) fn read_variant(
    bag: &ParameterBag,
    spec: &CompoundSpec,
) -> Result<Option<Variant>, ParamError> {
    let Some(token) = bag.get(spec.key) else {
        return Ok(None);
    };
    let variant = spec.variant_or_err(token)?;
    let owned: AHashSet<&str> = variant.owned_keys().into_iter().collect();

    let params = bag
        .iter()
        .filter(|(key, _)| owned.contains(key))
        .collect();

    Ok(Some(Variant {
        spec: variant,
        params,
    }))
}

/// Assigns `value` to the compound `spec` in `bag`, clearing the keys of the
/// previously active variant first
pub(crate) fn write_variant(
    bag: &mut ParameterBag,
    spec: &CompoundSpec,
    value: Option<Variant>,
) -> Result<(), ParamError> {
    let value = match value {
        Some(value) => {
            // Rebind to this compound's own table; a variant from another
            // table is accepted only if it declares the same keys.
            let own = spec
                .variant(value.token())
                .filter(|own| same_keys(own, value.spec))
                .ok_or_else(|| ParamError::ForeignVariant {
                    key: spec.key.to_string(),
                    token: value.token().to_string(),
                })?;
            Some(Variant {
                spec: own,
                params: value.params,
            })
        }
        None => None,
    };

    let previous = bag
        .get(spec.key)
        .map(|token| (token.to_string(), spec.variant(token)));
    match previous {
        Some((_, Some(previous))) => {
            for key in previous.owned_keys() {
                if bag.remove(key).is_some() {
                    tracing::debug!(key, variant = previous.token, "cleared variant parameter");
                }
            }
        }
        Some((token, None)) => {
            tracing::warn!(
                key = spec.key,
                token = %token,
                "replacing unknown variant, its parameters cannot be cleared"
            );
        }
        None => {}
    }

    match value {
        Some(value) => {
            tracing::debug!(key = spec.key, variant = value.token(), "variant selected");
            bag.set(spec.key, value.token());
            // Only keys the variant owns reach the owner; the discriminator
            // always names the assigned variant.
            let owned: AHashSet<&str> = value.spec.owned_keys().into_iter().collect();
            for (key, raw) in value.params.iter() {
                if key != spec.key && owned.contains(key) {
                    bag.set(key, raw);
                } else {
                    tracing::warn!(
                        key,
                        variant = value.token(),
                        "dropped parameter not owned by variant"
                    );
                }
            }
        }
        None => {
            bag.remove(spec.key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Field, StringField};
    use pretty_assertions::assert_eq;

    const TOKEN: StringField = Field::string("token")
        .with_key("secure:accessToken")
        .mandatory();
    const USERNAME: StringField = Field::string("username").mandatory();
    const PASSWORD: StringField = Field::string("password").with_key("secure:password");

    static TOKEN_AUTH: VariantSpec = VariantSpec {
        token: "token",
        fields: &[TOKEN.spec()],
    };
    static PASSWORD_AUTH: VariantSpec = VariantSpec {
        token: "password",
        fields: &[USERNAME.spec(), PASSWORD.spec()],
    };
    static AUTH: CompoundSpec = CompoundSpec {
        key: "authenticationType",
        variants: &[&TOKEN_AUTH, &PASSWORD_AUTH],
    };
    static TOKEN_ONLY: CompoundSpec = CompoundSpec {
        key: "authenticationType",
        variants: &[&TOKEN_AUTH],
    };

    fn token_auth(value: &str) -> Variant {
        Variant::new(&TOKEN_AUTH).configure(|v| v.set(&TOKEN, value))
    }

    #[test]
    fn test_write_then_read() {
        let mut bag = ParameterBag::new();
        bag.set("serverUrl", "https://example.com");
        write_variant(&mut bag, &AUTH, Some(token_auth("secret"))).unwrap();

        assert_eq!(bag.get("authenticationType"), Some("token"));
        let variant = read_variant(&bag, &AUTH).unwrap().unwrap();
        assert_eq!(variant.token(), "token");
        assert_eq!(variant.get(&TOKEN).unwrap().as_deref(), Some("secret"));
        // Unrelated keys of the owner are not part of the variant
        assert!(!variant.has_param("serverUrl"));
    }

    #[test]
    fn test_switch_clears_previous_variant() {
        let mut bag = ParameterBag::new();
        write_variant(&mut bag, &AUTH, Some(token_auth("secret"))).unwrap();

        let password = Variant::new(&PASSWORD_AUTH).configure(|v| v.set(&USERNAME, "ci"));
        write_variant(&mut bag, &AUTH, Some(password)).unwrap();

        assert!(!bag.has("secure:accessToken"));
        assert_eq!(bag.get("authenticationType"), Some("password"));
        assert_eq!(bag.get("username"), Some("ci"));
    }

    #[test]
    fn test_raw_keys_outside_variant_are_not_written() {
        let mut bag = ParameterBag::new();
        let token = token_auth("secret").configure(|v| {
            v.param("authenticationType", "password");
            v.param("stray", "x");
        });
        write_variant(&mut bag, &AUTH, Some(token)).unwrap();

        assert_eq!(bag.get("authenticationType"), Some("token"));
        assert_eq!(bag.get("secure:accessToken"), Some("secret"));
        assert!(!bag.has("stray"));
        assert_eq!(read_variant(&bag, &AUTH).unwrap().unwrap().token(), "token");

        let password = Variant::new(&PASSWORD_AUTH).configure(|v| v.set(&USERNAME, "ci"));
        write_variant(&mut bag, &AUTH, Some(password)).unwrap();
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn test_assign_none_clears_everything() {
        let mut bag = ParameterBag::new();
        write_variant(&mut bag, &AUTH, Some(token_auth("secret"))).unwrap();
        write_variant(&mut bag, &AUTH, None).unwrap();
        assert!(bag.is_empty());
        assert_eq!(read_variant(&bag, &AUTH).unwrap(), None);
    }

    #[test]
    fn test_foreign_variant_rejected() {
        let mut bag = ParameterBag::new();
        let err = write_variant(&mut bag, &TOKEN_ONLY, Some(Variant::new(&PASSWORD_AUTH)))
            .unwrap_err();
        assert_eq!(
            err,
            ParamError::ForeignVariant {
                key: "authenticationType".to_string(),
                token: "password".to_string(),
            }
        );
        assert!(bag.is_empty());
    }

    #[test]
    fn test_shared_variant_accepted() {
        let mut bag = ParameterBag::new();
        write_variant(&mut bag, &TOKEN_ONLY, Some(token_auth("t"))).unwrap();
        assert_eq!(bag.get("secure:accessToken"), Some("t"));
    }

    #[test]
    fn test_unknown_token_fails_read() {
        let mut bag = ParameterBag::new();
        bag.set("authenticationType", "oauth");
        assert_eq!(
            read_variant(&bag, &AUTH).unwrap_err(),
            ParamError::UnknownVariant {
                key: "authenticationType".to_string(),
                token: "oauth".to_string(),
            }
        );
    }

    #[test]
    fn test_select_and_tokens() {
        assert_eq!(AUTH.tokens(), vec!["token", "password"]);
        assert_eq!(AUTH.select("password").unwrap().token(), "password");
        assert!(AUTH.select("vcsRoot").is_err());
        assert_eq!(PASSWORD_AUTH.owned_keys(), vec!["username", "secure:password"]);
    }
}
