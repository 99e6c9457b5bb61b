//! CLI argument definitions and command builders
//!
//! This module contains all clap command builders for the sema CLI.
//! Each function returns a configured `clap::Command` for a subcommand.

pub mod handlers;

use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("sema")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Named cross-process semaphores from the shell")
        .subcommand_required(true)
        .subcommand(cmd_create())
        .subcommand(cmd_post())
        .subcommand(cmd_wait())
        .subcommand(cmd_remove())
}

fn arg_name() -> Arg {
    Arg::new("name")
        .required(true)
        .help("Semaphore name in the OS namespace (no leading slash)")
}

fn arg_json() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON for machine parsing")
}

fn cmd_create() -> Command {
    Command::new("create")
        .about("Create a named semaphore")
        .arg(arg_name())
        .arg(
            Arg::new("value")
                .long("value")
                .value_parser(clap::value_parser!(u32))
                .default_value("0")
                .help("Initial counter value"),
        )
        .arg(arg_json())
}

fn cmd_post() -> Command {
    Command::new("post")
        .about("Increment the counter, releasing at most one waiter")
        .arg(arg_name())
        .arg(arg_json())
}

fn cmd_wait() -> Command {
    Command::new("wait")
        .about("Decrement the counter, blocking until it is positive")
        .arg(arg_name())
        .arg(
            Arg::new("no-block")
                .long("no-block")
                .action(ArgAction::SetTrue)
                .conflicts_with("timeout-ms")
                .help("Return immediately instead of blocking (exit 1 if not acquired)"),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .value_parser(clap::value_parser!(u64))
                .help("Give up after this many milliseconds (exit 1 on timeout)"),
        )
        .arg(arg_json())
}

fn cmd_remove() -> Command {
    Command::new("remove")
        .about("Remove a named semaphore from the OS namespace")
        .arg(arg_name())
        .arg(arg_json())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_subcommands_parse() {
        for line in [
            vec!["sema", "create", "jobs"],
            vec!["sema", "create", "jobs", "--value", "4", "--json"],
            vec!["sema", "post", "jobs"],
            vec!["sema", "wait", "jobs"],
            vec!["sema", "wait", "jobs", "--no-block"],
            vec!["sema", "wait", "jobs", "--timeout-ms", "250"],
            vec!["sema", "remove", "jobs", "--json"],
        ] {
            assert!(
                build_cli().try_get_matches_from(line.iter().copied()).is_ok(),
                "failed to parse {line:?}"
            );
        }
    }

    #[test]
    fn test_wait_modes_are_mutually_exclusive() {
        let line = ["sema", "wait", "jobs", "--no-block", "--timeout-ms", "10"];
        assert!(build_cli().try_get_matches_from(line).is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(build_cli().try_get_matches_from(["sema"]).is_err());
    }
}
