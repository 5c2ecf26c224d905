//! rinse: an embedded, in-memory, schema-less query engine with a
//! declarative filter DSL.
//!
//! The engine lives in `rinse-core`; this crate adds the [`Collection`]
//! surface: insert/update/remove, queries, and the chainable
//! query/sort/select pipeline.
#![warn(unreachable_pub)]

mod collection;
mod error;
mod result;
mod sort;

pub use collection::Collection;
pub use error::CollectionError;
pub use result::ResultSet;
pub use sort::{Direction, SortSpec};

// core vocabulary, re-exported for callers
pub use rinse_core::{
    diag::{Diagnostics, Warning},
    error::QueryError,
    query::{FilterOp, Predicate, compile},
    value::Value,
};
