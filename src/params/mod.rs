//! Typed parameter binding and validation runtime
//!
//! Every configurable entity keeps its state in a flat [`ParameterBag`] of
//! string keys and values. Typed [`Field`] accessors translate between that
//! bag and Rust values through a [`Codec`], compound fields select one of a
//! closed set of [`Variant`]s, and [`Validate`] reports missing mandatory
//! properties as data.

pub mod access;
pub mod bag;
pub mod codec;
pub mod compound;
pub mod entity;
pub mod errors;
pub mod field;
pub mod schema;
pub mod types;
pub mod validation;

#[cfg(test)]
mod params_tests;

pub use access::Parametrized;
pub use bag::ParameterBag;
pub use codec::{BoolCodec, Codec, EnumCodec, IntCodec, ParamEnum, StringCodec};
pub use compound::{CompoundSpec, Variant, VariantSpec};
pub use entity::Entity;
pub use errors::ParamError;
pub use field::{
    accepted_keys, BoolField, EnumField, Field, FieldKind, FieldSpec, IntField, StringField,
};
pub use schema::EntitySchema;
pub use types::{ApiVersion, Category};
pub use validation::{validate_fields, Validate, ValidationContext, ValidationError};
