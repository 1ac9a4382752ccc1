//! eavsearch Core - parameter resolution and EAV query generation
//!
//! This crate provides the engine behind the `eavsearch` command:
//! - Typed search parameters (scope, attribute, comparison, value, output)
//! - The prompt primitive and the `Prompter` seam for line I/O
//! - Table-driven parameter resolution (automated or interactive)
//! - Value normalization for NULL keywords and LIKE substring search
//! - SQL generation against the per-backend-type EAV table layout
//! - Text/CSV rendering and the confirm/search/write/close pipeline
//!
//! Database access lives behind the [`catalog::CatalogSource`] trait; the
//! MySQL implementation is in `eavsearch-store`.

pub mod catalog;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod query;
pub mod render;
pub mod resolver;
pub mod runner;

// Macros reach the shared schema constants through this path.
pub use eavsearch_core_types;

// Re-export commonly used types
pub use catalog::CatalogSource;
pub use errors::{ExError, ExErrorKind, Result, SearchError};
pub use model::{
    AttributeDescriptor, Comparison, OutputFormat, OutputLocation, Parameter, ResultRow, Scope,
    SearchParams, SearchRequest, SearchValue,
};
pub use prompt::{PromptSpec, Prompter};
pub use runner::{run_search, SearchOutcome};
