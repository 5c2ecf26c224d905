use thiserror::Error as ThisError;

///
/// QueryError
///
/// Failures raised while compiling a query document.
///
/// Compilation errors are fatal to the calling operation and surface
/// synchronously; operator-level type mismatches never land here, they
/// degrade to non-matches via [`crate::diag::Diagnostics`].
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    /// A filter-marker clause used an operator name outside the fixed set.
    #[error("unknown filter key: {name}")]
    UnknownFilter { name: String },

    /// The `$or` / `$and` operand was not an array of sub-documents.
    #[error("{key} operator requires an array of conditions")]
    LogicalOperandNotArray { key: &'static str },

    /// A query document (or a logical-combinator element) was not an object.
    #[error("query document must be an object, found {found}")]
    DocumentNotObject { found: &'static str },
}
