//! Core engine for rinse: the schema-less value model, the filter operator
//! library, the query compiler, and the linear evaluation runner.
#![warn(unreachable_pub)]

pub mod diag;
pub mod error;
pub mod path;
pub mod query;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, runners, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        diag::{Diagnostics, Warning},
        query::{FilterOp, Predicate},
        value::Value,
    };
}
