//! Error types for sema-core

use thiserror::Error;

/// Core error type for named-semaphore operations.
///
/// Failure to acquire is not an error: [`crate::try_wait`] and
/// [`crate::timed_wait`] report it as `Ok(false)`. Likewise
/// [`crate::remove`] of an absent name is `Ok(false)`, not [`Error::NotFound`].
#[derive(Debug, Error)]
pub enum Error {
    /// Create on a name that already denotes a live semaphore
    #[error("semaphore '{name}' already exists")]
    AlreadyExists {
        /// The contested name
        name: String,
    },

    /// Post or wait on a name that denotes no live semaphore
    #[error("semaphore '{name}' not found")]
    NotFound {
        /// The missing name
        name: String,
    },

    /// Name rejected before reaching the OS
    #[error("invalid semaphore name '{name}': {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// What the validator objected to
        reason: String,
    },

    /// Numeric input outside the platform's accepted range
    #[error("invalid argument: {what}")]
    InvalidArgument {
        /// Description of the out-of-range input
        what: String,
    },

    /// OS-level access control rejected the operation
    #[error("permission denied for semaphore '{name}'")]
    PermissionDenied {
        /// The protected name
        name: String,
    },

    /// Post would push the counter past the platform maximum
    #[error("semaphore '{name}' counter is at its platform maximum")]
    Overflow {
        /// The saturated name
        name: String,
    },

    /// Any other OS failure, surfaced directly with its errno
    #[error("{op} failed: {source}")]
    Os {
        /// The syscall that failed
        op: &'static str,
        /// The underlying OS error
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for sema-core operations
pub type Result<T> = std::result::Result<T, Error>;
