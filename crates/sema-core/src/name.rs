//! Semaphore name validation
//!
//! Callers pass bare names ("jobs", "build-tokens"); this module checks
//! them against the rules of the POSIX `sem_open` namespace and produces
//! the leading-slash form the OS expects.

use std::ffi::CString;

use crate::error::{Error, Result};

/// Longest accepted name, in bytes.
///
/// Linux stores named semaphores as `sem.<name>` entries under `/dev/shm`,
/// which caps the name at `NAME_MAX` (255) minus that four-byte prefix.
pub const MAX_NAME_LEN: usize = 251;

/// Validate a semaphore name.
///
/// A valid name is non-empty, at most [`MAX_NAME_LEN`] bytes, and contains
/// neither `/` nor NUL. The leading slash the OS namespace uses is not part
/// of the name; it is added internally.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, "name is empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(invalid(name, "name is too long"));
    }
    if name.contains('/') {
        return Err(invalid(name, "name contains '/'"));
    }
    if name.contains('\0') {
        return Err(invalid(name, "name contains a NUL byte"));
    }
    Ok(())
}

/// Validate `name` and render it as the `/name` C string `sem_open` and
/// `sem_unlink` take.
pub(crate) fn sem_path(name: &str) -> Result<CString> {
    validate_name(name)?;
    // NUL bytes were rejected above, so the conversion cannot fail.
    CString::new(format!("/{name}")).map_err(|_| invalid(name, "name contains a NUL byte"))
}

fn invalid(name: &str, reason: &str) -> Error {
    Error::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
