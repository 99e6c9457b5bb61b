//! Remove command implementation
//!
//! Removing an absent name is a normal outcome reported in the output,
//! not an error - unlike post/wait, which fail on a missing name.

use anyhow::Result;
use serde::Serialize;

/// Remove command options
#[derive(Debug, Clone)]
pub struct RemoveOptions {
    /// Semaphore name
    pub name: String,
}

/// Outcome of a remove
#[derive(Debug, Clone, Serialize)]
pub struct RemoveOutput {
    pub success: bool,
    pub name: String,
    /// Whether the name existed and was removed
    pub removed: bool,
}

/// Run the remove command
///
/// # Errors
///
/// Returns an error if the name is invalid or the OS denies the removal.
pub fn run(options: &RemoveOptions) -> Result<RemoveOutput> {
    let removed = sema_core::remove(&options.name)?;
    tracing::debug!(name = %options.name, removed, "removed semaphore");
    Ok(RemoveOutput {
        success: true,
        name: options.name.clone(),
        removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_reports_existence() -> Result<()> {
        let name = format!("sema-cli-test-{}-remove", std::process::id());
        sema_core::create(&name, 0)?;

        let options = RemoveOptions { name };
        assert!(run(&options)?.removed);
        assert!(!run(&options)?.removed);
        Ok(())
    }
}
