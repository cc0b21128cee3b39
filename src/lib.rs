//! # buildparams - Typed parameters for CI build-server settings
//!
//! Build features, project features and triggers of a build server are
//! stored as a type discriminator plus a flat map of string parameters.
//! buildparams binds that map to typed fields, selects compound variants,
//! and validates mandatory properties across API generations.
//!
//! ## Quick Start
//!
//! ```
//! use buildparams::prelude::*;
//! use buildparams::catalog::project_features::bugzilla;
//!
//! let tracker = Entity::new(&bugzilla::SCHEMA).configure(|t| {
//!     t.set(&bugzilla::HOST, "https://bugs.example.com");
//!     t.set(&bugzilla::DISPLAY_NAME, "Bugs");
//! });
//!
//! let errors = tracker.validate();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(
//!     errors[0].message,
//!     "mandatory 'issueIdPattern' property is not specified"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`params`]: parameter bags, codecs, fields, compounds, entities and validation
//! - [`catalog`]: schemas of the known entity kinds per API version
//! - [`settings`]: entity containers and the YAML / JSON document form
//! - [`infrastructure`]: configuration and logging

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod macros;

pub mod catalog;
pub mod infrastructure;
pub mod params;
pub mod settings;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use catalog::Catalog;
pub use infrastructure::{Config, ConfigError};
pub use params::{
    ApiVersion, Category, Entity, EntitySchema, Field, ParamError, ParameterBag, Parametrized,
    Validate, ValidationError, Variant,
};
pub use settings::{FeatureSet, Settings};

/// Version of the buildparams crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
