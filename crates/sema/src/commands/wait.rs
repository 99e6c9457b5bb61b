//! Wait command implementation
//!
//! Dispatches between the blocking, non-blocking, and timed wait modes.
//! Not acquiring (try-wait on a zero counter, timed wait past its
//! deadline) is a normal outcome, not an error.

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

/// How to wait
#[derive(Debug, Clone, Copy)]
pub enum WaitMode {
    /// Block until the counter is positive
    Block,
    /// Return immediately if the counter is zero
    NoBlock,
    /// Block until the counter is positive or the duration elapses
    Timeout(Duration),
}

/// Wait command options
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Semaphore name
    pub name: String,
    /// Wait mode
    pub mode: WaitMode,
}

/// Outcome of a wait
#[derive(Debug, Clone, Serialize)]
pub struct WaitOutput {
    pub success: bool,
    pub name: String,
    /// Whether the counter was decremented
    pub acquired: bool,
}

/// Run the wait command
///
/// # Errors
///
/// Returns an error if the name is invalid or no semaphore with that name
/// exists at call time.
pub fn run(options: &WaitOptions) -> Result<WaitOutput> {
    let acquired = match options.mode {
        WaitMode::Block => {
            sema_core::wait(&options.name)?;
            true
        }
        WaitMode::NoBlock => sema_core::try_wait(&options.name)?,
        WaitMode::Timeout(timeout) => sema_core::timed_wait(&options.name, timeout)?,
    };
    tracing::debug!(name = %options.name, acquired, "wait finished");
    Ok(WaitOutput {
        success: true,
        name: options.name.clone(),
        acquired,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_name(tag: &str) -> String {
        format!("sema-cli-test-{}-wait-{tag}", std::process::id())
    }

    #[test]
    fn test_no_block_reports_acquired_state() -> Result<()> {
        let name = unique_name("no-block");
        sema_core::create(&name, 1)?;

        let options = WaitOptions {
            name: name.clone(),
            mode: WaitMode::NoBlock,
        };
        assert!(run(&options)?.acquired);
        assert!(!run(&options)?.acquired);

        assert!(sema_core::remove(&name)?);
        Ok(())
    }

    #[test]
    fn test_timeout_mode_reports_timeout_as_not_acquired() -> Result<()> {
        let name = unique_name("timeout");
        sema_core::create(&name, 0)?;

        let options = WaitOptions {
            name: name.clone(),
            mode: WaitMode::Timeout(Duration::from_millis(50)),
        };
        assert!(!run(&options)?.acquired);

        assert!(sema_core::remove(&name)?);
        Ok(())
    }
}
