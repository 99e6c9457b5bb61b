//! Create command implementation

use anyhow::Result;
use serde::Serialize;

/// Create command options
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// Semaphore name
    pub name: String,
    /// Initial counter value
    pub value: u32,
}

/// Outcome of a create
#[derive(Debug, Clone, Serialize)]
pub struct CreateOutput {
    pub success: bool,
    pub name: String,
    pub value: u32,
}

/// Run the create command
///
/// # Errors
///
/// Returns an error if the name is invalid, a semaphore with that name
/// already exists, or the OS rejects the creation.
pub fn run(options: &CreateOptions) -> Result<CreateOutput> {
    sema_core::create(&options.name, options.value)?;
    tracing::debug!(name = %options.name, value = options.value, "created semaphore");
    Ok(CreateOutput {
        success: true,
        name: options.name.clone(),
        value: options.value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_name(tag: &str) -> String {
        format!("sema-cli-test-{}-create-{tag}", std::process::id())
    }

    #[test]
    fn test_create_then_duplicate_fails() -> Result<()> {
        let name = unique_name("dup");

        let options = CreateOptions {
            name: name.clone(),
            value: 0,
        };
        let output = run(&options)?;
        assert!(output.success);
        assert!(run(&options).is_err());

        assert!(sema_core::remove(&name)?);
        Ok(())
    }
}
