//! Prelude module for common imports

// Re-export macros
pub use crate::{param_enum, params};

pub use crate::catalog::Catalog;
pub use crate::params::{
    ApiVersion, BoolCodec, BoolField, Category, Codec, CompoundSpec, Entity, EntitySchema,
    EnumCodec, EnumField, Field, FieldKind, FieldSpec, IntField, ParamEnum, ParamError,
    ParameterBag, Parametrized, StringField, Validate, ValidationContext, ValidationError,
    Variant, VariantSpec,
};
pub use crate::settings::{FeatureSet, Settings};
