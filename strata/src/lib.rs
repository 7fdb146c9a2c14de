//! Core crate for the `strata` typed configuration engine.
//!
//! Applications declare configuration points as [`Declaration`]s in a
//! [`Catalog`], choose a [`NamingStrategy`] and an ordered list of
//! [`load::Loader`]s, and ask an [`Engine`] for the resulting [`ValueMap`].
//!
//! Resolution runs in four phases:
//!
//! 1. the catalog and loader list are checked for consistency; any
//!    [`ConstructionProblem`] aborts before a single loader runs;
//! 2. loaders run one after another, each able to read the values supplied by
//!    the loaders before it;
//! 3. required properties without an explicit value are reported;
//! 4. when no [`LoaderProblem`], [`ValueProblem`] or [`RequirementProblem`]
//!    was found the values are frozen into an immutable [`ValueMap`];
//!    otherwise every problem is returned together in one
//!    [`ResolutionError`].
//!
//! The first loader in the configured order to supply a value for a property
//! wins. A value that a loader sets explicitly to null counts as set and
//! suppresses the property's default.
//!
//! ```rust
//! use strata::load::{CommandLineLoader, FileLoader};
//! use strata::{Catalog, Declaration, Engine, PropertyId, PropertySpec, ValueType};
//!
//! let port = PropertyId::new("app.Server", ["http"], "PORT");
//! let catalog = Catalog::new(vec![Declaration::new(
//!     port.clone(),
//!     PropertySpec::builder(ValueType::Int).default_value(8080).build(),
//! )]);
//!
//! let engine = Engine::builder(catalog)
//!     .loader(CommandLineLoader::new(["app.Server.http.PORT=9090"]))
//!     .loader(FileLoader::from_bytes("defaults", "app.Server.http.PORT = 7070"))
//!     .build();
//!
//! let values = engine.values()?;
//! assert_eq!(values.get_i64(&port), Some(9090));
//! # Ok::<_, std::sync::Arc<strata::ResolutionError>>(())
//! ```

use std::sync::Arc;

mod catalog;
mod engine;
mod error;
pub mod load;
mod naming;
mod problem;
pub mod validate;
mod value;
mod value_map;

pub use catalog::{Aliases, Catalog, Declaration, PropertyId, PropertySpec, PropertySpecBuilder};
pub use engine::{Engine, EngineBuilder};
pub use error::ResolutionError;
pub use naming::{
    CaseInsensitiveNaming, CaseSensitiveNaming, IllegalName, Name, NamingIndex, NamingStrategy,
    PropertyNaming, check_name, uri_name,
};
pub use problem::{
    ConstructionProblem, LoaderProblem, Problem, ProblemKind, ProblemList, RequirementProblem,
    ValueProblem,
};
pub use value::{ParseError, PropValue, Trimmer, ValueType};
pub use value_map::{Provenance, ResolutionContext, ValueMap};

/// Result type returned by resolution entry points.
///
/// Errors are shared so concurrent callers observing the same failed
/// resolution receive the same report.
pub type StrataResult<T> = Result<T, Arc<ResolutionError>>;
