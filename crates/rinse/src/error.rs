use rinse_core::error::QueryError;
use thiserror::Error as ThisError;

///
/// CollectionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CollectionError {
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Collections hold object records only.
    #[error("record must be an object, found {found}")]
    RecordNotObject { found: &'static str },

    /// The identity field exists but is not a string.
    #[error("identity field '{id_key}' must be a string, found {found}")]
    NonTextIdentity { id_key: String, found: &'static str },
}
