//! Mandatory-property validation.
//!
//! Validation never fails: it walks an entity and its active compound
//! variants and returns every problem found as data.

use super::bag::ParameterBag;
use super::compound::Variant;
use super::entity::Entity;
use super::field::{accepted_keys, FieldKind, FieldSpec};
use serde::Serialize;
use thiserror::Error;

/// One validation problem, addressed by a dotted property path
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("{}: {message}", path.join("."))]
pub struct ValidationError {
    /// Property names from the validated root to the offending field
    pub path: Vec<String>,
    /// Human readable message
    pub message: String,
}

impl ValidationError {
    /// Creates an error for `path`
    #[must_use]
    pub fn new(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Dotted property path, e.g. `provider.authType.token`
    #[must_use]
    pub fn property(&self) -> String {
        self.path.join(".")
    }
}

/// Path-tracking accumulator threaded through a validation walk
#[derive(Debug, Default)]
pub struct ValidationContext {
    path: Vec<String>,
    // Path components below this depth belong to the entity being validated
    base: usize,
    errors: Vec<ValidationError>,
}

impl ValidationContext {
    /// Creates an empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a path component
    pub fn push(&mut self, component: impl Into<String>) {
        self.path.push(component.into());
    }

    /// Pops a path component
    pub fn pop(&mut self) {
        self.path.pop();
    }

    /// Runs `f` with `component` pushed onto the path
    pub fn nested(&mut self, component: impl Into<String>, f: impl FnOnce(&mut Self)) {
        self.push(component);
        f(self);
        self.pop();
    }

    /// Runs `f` with `location` pushed as the root of a new entity. Messages
    /// name properties relative to that root.
    pub fn scoped(&mut self, location: impl Into<String>, f: impl FnOnce(&mut Self)) {
        self.push(location);
        let outer = std::mem::replace(&mut self.base, self.path.len());
        f(self);
        self.base = outer;
        self.pop();
    }

    /// Current path, dotted
    #[must_use]
    pub fn path(&self) -> String {
        self.path.join(".")
    }

    /// Records an error for the property `name` below the current path
    pub fn report(&mut self, name: &str, message: impl Into<String>) {
        let mut path = self.path.clone();
        path.push(name.to_string());
        self.errors.push(ValidationError::new(path, message));
    }

    /// Records a missing mandatory property
    pub fn missing(&mut self, name: &str) {
        let property = self
            .path
            .get(self.base..)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(name))
            .collect::<Vec<_>>()
            .join(".");
        self.report(name, format!("mandatory '{property}' property is not specified"));
    }

    /// Errors collected so far
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes the context, returning the collected errors
    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// Types that can report validation problems
pub trait Validate {
    /// Reports problems into `ctx`, relative to its current path
    fn validate_into(&self, ctx: &mut ValidationContext);

    /// Validates and returns every problem found
    fn validate(&self) -> Vec<ValidationError> {
        let mut ctx = ValidationContext::new();
        self.validate_into(&mut ctx);
        ctx.into_errors()
    }

    /// Returns true if validation finds no problem
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        if let Some(value) = self {
            value.validate_into(ctx);
        }
    }
}

/// Checks `fields` against `bag`, descending into active compound variants.
///
/// Deprecated aliases are never checked themselves; their keys count towards
/// the field they replace. With `mandatory` off only compound tokens are
/// checked.
pub fn validate_fields(
    fields: &[FieldSpec],
    bag: &ParameterBag,
    mandatory: bool,
    ctx: &mut ValidationContext,
) {
    for field in fields {
        if field.deprecated_for.is_some() {
            continue;
        }
        let present = accepted_keys(fields, field)
            .into_iter()
            .find_map(|key| bag.get(key));

        match (present, field.kind) {
            (None, _) => {
                if mandatory && field.mandatory {
                    ctx.missing(field.name);
                }
            }
            (Some(token), FieldKind::Compound(spec)) => match spec.variant(token) {
                Some(variant) => {
                    ctx.nested(field.name, |ctx| {
                        validate_fields(variant.fields, bag, mandatory, ctx);
                    });
                }
                None => {
                    tracing::warn!(key = spec.key, token, "unknown variant during validation");
                    ctx.report(
                        field.name,
                        format!(
                            "unknown value '{token}', expected one of [{}]",
                            spec.tokens().join(", ")
                        ),
                    );
                }
            },
            (Some(_), _) => {}
        }
    }
}

impl Validate for Entity {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        use super::access::Parametrized;
        validate_fields(
            self.fields(),
            self.params(),
            self.version().validates_mandatory(),
            ctx,
        );
    }
}

impl Validate for Variant {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        use super::access::Parametrized;
        validate_fields(self.fields(), self.params(), true, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_context_paths() {
        let mut ctx = ValidationContext::new();
        ctx.push("provider");
        ctx.push("authType");
        assert_eq!(ctx.path(), "provider.authType");
        ctx.missing("token");
        ctx.pop();
        ctx.pop();
        ctx.missing("title");

        let errors = ctx.into_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].property(), "provider.authType.token");
        assert_eq!(
            errors[0].message,
            "mandatory 'provider.authType.token' property is not specified"
        );
        assert_eq!(errors[1].path, vec!["title".to_string()]);
    }

    #[test]
    fn test_scoped_messages_are_relative() {
        let mut ctx = ValidationContext::new();
        ctx.scoped("buildFeatures[1]", |ctx| {
            ctx.nested("provider", |ctx| ctx.missing("authType"));
        });
        let errors = ctx.into_errors();
        assert_eq!(errors[0].property(), "buildFeatures[1].provider.authType");
        assert_eq!(
            errors[0].message,
            "mandatory 'provider.authType' property is not specified"
        );
    }

    #[test]
    fn test_pop_below_scope_root() {
        let mut ctx = ValidationContext::new();
        ctx.scoped("triggers[0]", |ctx| {
            ctx.pop();
            ctx.missing("attempts");
            ctx.push("triggers[0]");
        });
        let errors = ctx.into_errors();
        assert_eq!(errors[0].property(), "attempts");
        assert_eq!(
            errors[0].message,
            "mandatory 'attempts' property is not specified"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new(vec!["host".into()], "missing");
        assert_eq!(err.to_string(), "host: missing");
    }

    #[test]
    fn test_nested_restores_path() {
        let mut ctx = ValidationContext::new();
        ctx.nested("provider", |ctx| ctx.report("serverUrl", "bad"));
        assert_eq!(ctx.path(), "");
        assert_eq!(ctx.errors()[0].property(), "provider.serverUrl");
    }
}
