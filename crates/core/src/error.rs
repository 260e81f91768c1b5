use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every rejected path in the service resolves to one of these variants
/// before reaching the transport boundary. The API crate maps them onto
/// HTTP status codes (404, 400, 409, 401, 500 respectively).
///
/// There is deliberately no "forbidden" variant: a resource under another
/// owner is reported as [`NotFound`](Self::NotFound), so responses never
/// confirm that a guessed id exists at all.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity does not exist -- or belongs to another owner, which is
    /// reported identically so ids cannot be probed across accounts.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An unexpected failure (hashing, token minting, store breakage).
    /// The message is for logs; clients receive a sanitized 500.
    #[error("Internal error: {0}")]
    Internal(String),
}
