//! Command implementations, one module per semaphore operation

pub mod create;
pub mod post;
pub mod remove;
pub mod wait;
