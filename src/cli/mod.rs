//! CLI argument parsing for worklock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Worklock: single-instance worker enforcement via a PID marker file.
///
/// A marker file records the PID of the currently registered worker.
/// Registration takes an exclusive advisory lock on the marker, checks
/// whether the recorded PID is still alive, and claims the slot by writing
/// this process's PID. Only one instance per marker can be active at a time.
#[derive(Parser, Debug)]
#[command(name = "worklock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for worklock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Provision a marker file.
    ///
    /// Creates an empty marker at the given path. The guard itself never
    /// creates markers; they must exist before `run`, `kill`, or `status`.
    Init(InitArgs),

    /// Register this process and run a command as the unit of work.
    ///
    /// Fails without running the command if a live worker is already
    /// registered in the marker.
    Run(RunArgs),

    /// Terminate the worker currently registered in the marker.
    ///
    /// Sends a best-effort termination request to the recorded PID if it is
    /// still alive. The marker is not cleared.
    Kill(KillArgs),

    /// Inspect a marker: recorded PID, liveness, and age.
    Status(StatusArgs),
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Path to the marker file to create.
    #[arg(long, value_name = "PATH")]
    pub marker: PathBuf,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the marker file (must already exist).
    #[arg(long, value_name = "PATH")]
    pub marker: PathBuf,

    /// Give up after this many seconds if the marker lock is contended,
    /// instead of blocking indefinitely.
    #[arg(long, value_name = "SECS")]
    pub lock_timeout: Option<u64>,

    /// The command to run once registered, with its arguments.
    #[arg(required = true, trailing_var_arg = true)]
    pub command: Vec<String>,
}

/// Arguments for the `kill` command.
#[derive(Parser, Debug)]
pub struct KillArgs {
    /// Path to the marker file (must already exist).
    #[arg(long, value_name = "PATH")]
    pub marker: PathBuf,
}

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Path to the marker file (must already exist).
    #[arg(long, value_name = "PATH")]
    pub marker: PathBuf,

    /// Emit the status report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
