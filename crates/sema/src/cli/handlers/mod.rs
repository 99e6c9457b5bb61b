//! Subcommand handlers: extract arguments, run the command, format output

use std::time::Duration;

use anyhow::Result;
use clap::ArgMatches;

use crate::commands::{create, post, remove, wait};

/// Exit code for success and acquired waits.
pub const EXIT_OK: i32 = 0;
/// Exit code for a wait that did not acquire (counter at zero / timeout).
pub const EXIT_NOT_ACQUIRED: i32 = 1;

pub fn dispatch(matches: &ArgMatches) -> Result<i32> {
    match matches.subcommand() {
        Some(("create", sub_m)) => handle_create(sub_m),
        Some(("post", sub_m)) => handle_post(sub_m),
        Some(("wait", sub_m)) => handle_wait(sub_m),
        Some(("remove", sub_m)) => handle_remove(sub_m),
        _ => anyhow::bail!("Unknown command. Run 'sema --help' for usage."),
    }
}

fn name_arg(matches: &ArgMatches) -> Result<String> {
    matches
        .get_one::<String>("name")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Semaphore name required"))
}

fn handle_create(matches: &ArgMatches) -> Result<i32> {
    let options = create::CreateOptions {
        name: name_arg(matches)?,
        value: matches.get_one::<u32>("value").copied().unwrap_or(0),
    };
    let output = create::run(&options)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "✓ Created semaphore '{}' with value {}",
            output.name, output.value
        );
    }
    Ok(EXIT_OK)
}

fn handle_post(matches: &ArgMatches) -> Result<i32> {
    let options = post::PostOptions {
        name: name_arg(matches)?,
    };
    let output = post::run(&options)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("✓ Posted semaphore '{}'", output.name);
    }
    Ok(EXIT_OK)
}

fn handle_wait(matches: &ArgMatches) -> Result<i32> {
    let mode = if matches.get_flag("no-block") {
        wait::WaitMode::NoBlock
    } else if let Some(ms) = matches.get_one::<u64>("timeout-ms") {
        wait::WaitMode::Timeout(Duration::from_millis(*ms))
    } else {
        wait::WaitMode::Block
    };
    let options = wait::WaitOptions {
        name: name_arg(matches)?,
        mode,
    };
    let output = wait::run(&options)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string(&output)?);
    } else if output.acquired {
        println!("✓ Acquired semaphore '{}'", output.name);
    } else {
        println!("Semaphore '{}' not acquired", output.name);
    }
    Ok(if output.acquired {
        EXIT_OK
    } else {
        EXIT_NOT_ACQUIRED
    })
}

fn handle_remove(matches: &ArgMatches) -> Result<i32> {
    let options = remove::RemoveOptions {
        name: name_arg(matches)?,
    };
    let output = remove::run(&options)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string(&output)?);
    } else if output.removed {
        println!("✓ Removed semaphore '{}'", output.name);
    } else {
        println!("Semaphore '{}' did not exist", output.name);
    }
    Ok(EXIT_OK)
}
