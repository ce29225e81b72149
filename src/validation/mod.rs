//! Validation plumbing shared by every schema.
//!
//! - [`FieldPath`] labels where in a configuration a rule was violated
//! - [`Report`] accumulates violations and warnings without short-circuiting
//! - [`ValidationError`] is the single aggregated failure callers receive
//! - [`ValidationContext`] carries the cross-module facts (module identity,
//!   app version, provided externals, shared state config) that
//!   cross-reference rules need

mod context;
mod path;
mod report;

pub use context::{ProvidedExternal, ProvidedExternals, ValidationContext};
pub use path::{FieldPath, PathSegment};
pub use report::{
    MESSAGE_SEPARATOR, Report, ValidationError, ValidationOutcome, Violation, ViolationKind,
    Warning,
};
