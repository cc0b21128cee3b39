//! Field declarations: schema entries and typed accessors.
//!
//! A [`FieldSpec`] is the untyped schema entry used by validation, linting and
//! documentation. A [`Field`] pairs a spec with its codec and is what callers
//! use to read and write a value through [`Parametrized`](super::Parametrized).

use super::bag::ParameterBag;
use super::codec::{BoolCodec, Codec, EnumCodec, IntCodec, ParamEnum, StringCodec};
use super::compound::CompoundSpec;
use super::errors::ParamError;
use std::fmt;

/// Value kind of a field, carrying whatever the kind needs to check raw values
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Plain string
    String,
    /// Boolean with its literals
    Boolean(BoolCodec),
    /// Decimal integer
    Integer,
    /// Enum with its accepted tokens
    Enum(&'static [&'static str]),
    /// Compound field with its variant table
    Compound(&'static CompoundSpec),
}

impl FieldKind {
    /// Checks that `raw` decodes under this kind
    ///
    /// # Errors
    ///
    /// Returns the same error the typed accessor would return on read.
    pub fn check(&self, key: &str, raw: &str) -> Result<(), ParamError> {
        match self {
            Self::String => Ok(()),
            Self::Boolean(codec) => codec.decode(key, raw).map(drop),
            Self::Integer => IntCodec.decode(key, raw).map(drop),
            Self::Enum(tokens) => {
                if tokens.contains(&raw) {
                    Ok(())
                } else {
                    Err(ParamError::UnknownEnumToken {
                        key: key.to_string(),
                        value: raw.to_string(),
                    })
                }
            }
            Self::Compound(spec) => spec.variant_or_err(raw).map(drop),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Boolean(codec) => write!(
                f,
                "boolean ('{}' / '{}')",
                codec.true_value(),
                codec.false_value()
            ),
            Self::Integer => write!(f, "integer"),
            Self::Enum(tokens) => write!(f, "enum [{}]", tokens.join(", ")),
            Self::Compound(spec) => write!(f, "compound [{}]", spec.tokens().join(", ")),
        }
    }
}

/// Schema entry for one named property
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Property name as exposed to callers and in validation paths
    pub name: &'static str,
    /// Bag key the property is stored under
    pub key: &'static str,
    /// Value kind
    pub kind: FieldKind,
    /// Whether the key must be present for the owner to validate
    pub mandatory: bool,
    /// Name of the field this one is a deprecated alias of
    pub deprecated_for: Option<&'static str>,
}

impl FieldSpec {
    /// Creates an optional field stored under its own name
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            key: name,
            kind,
            mandatory: false,
            deprecated_for: None,
        }
    }

    /// Creates a compound field stored under the compound's discriminator key
    #[must_use]
    pub const fn compound(name: &'static str, spec: &'static CompoundSpec) -> Self {
        let mut field = Self::new(name, FieldKind::Compound(spec));
        field.key = spec.key;
        field
    }

    /// Stores the field under `key` instead of its name
    #[must_use]
    pub const fn with_key(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }

    /// Marks the field mandatory
    #[must_use]
    pub const fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Marks the field as a deprecated alias of `replacement`
    #[must_use]
    pub const fn deprecated_for(mut self, replacement: &'static str) -> Self {
        self.deprecated_for = Some(replacement);
        self
    }

    /// Returns the compound table if this is a compound field
    #[must_use]
    pub fn as_compound(&self) -> Option<&'static CompoundSpec> {
        match self.kind {
            FieldKind::Compound(spec) => Some(spec),
            _ => None,
        }
    }
}

/// Keys under which `field` counts as set: its own key plus the keys of every
/// deprecated alias declared for it in `fields`.
#[must_use]
pub fn accepted_keys(fields: &[FieldSpec], field: &FieldSpec) -> Vec<&'static str> {
    let mut keys = vec![field.key];
    for alias in fields {
        if alias.deprecated_for == Some(field.name) && !keys.contains(&alias.key) {
            keys.push(alias.key);
        }
    }
    keys
}

/// Collects every key owned by `fields`, descending into all variants of
/// compound fields.
pub(crate) fn collect_keys(fields: &[FieldSpec], keys: &mut Vec<&'static str>) {
    for field in fields {
        if !keys.contains(&field.key) {
            keys.push(field.key);
        }
        if let FieldKind::Compound(spec) = field.kind {
            for variant in spec.variants {
                collect_keys(variant.fields, keys);
            }
        }
    }
}

/// Decodes every present value of `fields` in `bag`, following active
/// compound variants, and collects the failures.
pub(crate) fn check_fields(fields: &[FieldSpec], bag: &ParameterBag, errors: &mut Vec<ParamError>) {
    for field in fields {
        let Some(raw) = bag.get(field.key) else {
            continue;
        };
        if let Err(err) = field.kind.check(field.key, raw) {
            errors.push(err);
            continue;
        }
        if let FieldKind::Compound(spec) = field.kind {
            if let Some(variant) = spec.variant(raw) {
                check_fields(variant.fields, bag, errors);
            }
        }
    }
}

/// Typed accessor: a field spec closed over its codec
#[derive(Debug, Clone, Copy)]
pub struct Field<C> {
    spec: FieldSpec,
    codec: C,
}

/// String accessor
pub type StringField = Field<StringCodec>;
/// Boolean accessor
pub type BoolField = Field<BoolCodec>;
/// Integer accessor
pub type IntField = Field<IntCodec>;
/// Enum accessor
pub type EnumField<E> = Field<EnumCodec<E>>;

impl Field<StringCodec> {
    /// String field stored under its own name
    #[must_use]
    pub const fn string(name: &'static str) -> Self {
        Self {
            spec: FieldSpec::new(name, FieldKind::String),
            codec: StringCodec,
        }
    }
}

impl Field<BoolCodec> {
    /// Boolean field with `"true"` / `"false"` literals
    #[must_use]
    pub const fn boolean(name: &'static str) -> Self {
        Self::boolean_with(name, BoolCodec::STANDARD)
    }

    /// Boolean field with custom literals
    #[must_use]
    pub const fn boolean_with(name: &'static str, codec: BoolCodec) -> Self {
        Self {
            spec: FieldSpec::new(name, FieldKind::Boolean(codec)),
            codec,
        }
    }
}

impl Field<IntCodec> {
    /// Integer field stored under its own name
    #[must_use]
    pub const fn integer(name: &'static str) -> Self {
        Self {
            spec: FieldSpec::new(name, FieldKind::Integer),
            codec: IntCodec,
        }
    }
}

impl<E: ParamEnum> Field<EnumCodec<E>> {
    /// Enum field using the enum's own token table
    #[must_use]
    pub const fn enumeration(name: &'static str) -> Self {
        Self::enumeration_with(name, EnumCodec::of())
    }

    /// Enum field using a field-specific token table
    #[must_use]
    pub const fn enumeration_with(name: &'static str, codec: EnumCodec<E>) -> Self {
        Self {
            spec: FieldSpec::new(name, FieldKind::Enum(codec.tokens())),
            codec,
        }
    }
}

impl<C> Field<C> {
    /// Stores the field under `key` instead of its name
    #[must_use]
    pub const fn with_key(mut self, key: &'static str) -> Self {
        self.spec = self.spec.with_key(key);
        self
    }

    /// Marks the field mandatory
    #[must_use]
    pub const fn mandatory(mut self) -> Self {
        self.spec = self.spec.mandatory();
        self
    }

    /// Marks the field as a deprecated alias of `replacement`
    #[must_use]
    pub const fn deprecated_for(mut self, replacement: &'static str) -> Self {
        self.spec = self.spec.deprecated_for(replacement);
        self
    }

    /// Schema entry for this field
    #[must_use]
    pub const fn spec(&self) -> FieldSpec {
        self.spec
    }

    /// Property name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Bag key
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.spec.key
    }

    /// Codec used to read and write the value
    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }
}
