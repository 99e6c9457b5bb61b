//! Post command implementation

use anyhow::Result;
use serde::Serialize;

/// Post command options
#[derive(Debug, Clone)]
pub struct PostOptions {
    /// Semaphore name
    pub name: String,
}

/// Outcome of a post
#[derive(Debug, Clone, Serialize)]
pub struct PostOutput {
    pub success: bool,
    pub name: String,
}

/// Run the post command
///
/// # Errors
///
/// Returns an error if the name is invalid, no semaphore with that name
/// exists, or its counter is already at the platform maximum.
pub fn run(options: &PostOptions) -> Result<PostOutput> {
    sema_core::post(&options.name)?;
    tracing::debug!(name = %options.name, "posted semaphore");
    Ok(PostOutput {
        success: true,
        name: options.name.clone(),
    })
}
