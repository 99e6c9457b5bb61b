//! Sema-core - Named cross-process counting semaphores
//!
//! This crate provides:
//! - Creation and removal of named OS semaphore objects
//! - Signaling (`post`) and blocking, non-blocking, and timed waits
//! - Name validation for the OS semaphore namespace
//!
//! Semaphores are identified by a string name in an OS-wide namespace and
//! can be used by unrelated processes that agree on that name. The
//! underlying object is owned by the OS, not by any process: it survives
//! process exit until [`remove`] unlinks it. A process that creates a
//! semaphore and exits without removing it leaks the namespace entry -
//! cleanup is the caller's responsibility.
//!
//! No handle is retained between calls. Every operation opens the named
//! object, performs exactly one action, and closes it again before
//! returning, on every exit path.
//!
//! There is no cancel operation for a pending wait: a caller that must be
//! able to abort uses [`timed_wait`] with a bounded duration and re-issues.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod name;
pub mod semaphore;

pub use error::{Error, Result};
pub use name::{validate_name, MAX_NAME_LEN};
pub use semaphore::{create, post, remove, timed_wait, try_wait, wait};
