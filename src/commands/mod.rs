//! Command implementations for worklock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command resolves a marker path from its arguments
//! and drives the registration guard in `crate::worker`.

use crate::cli::{Command, InitArgs, KillArgs, RunArgs, StatusArgs};
use worklock::error::{Result, WorklockError};
use worklock::worker::{MarkerLock, ProcessOracle, SystemProcesses, Worker};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init(args) => cmd_init(args),
        Command::Run(args) => cmd_run(args),
        Command::Kill(args) => cmd_kill(args),
        Command::Status(args) => cmd_status(args),
    }
}

/// Execute the `worklock init` command.
///
/// Provisions an empty marker file. **Idempotent**: an existing marker is
/// left untouched, including any recorded PID.
fn cmd_init(args: InitArgs) -> Result<()> {
    // create_new decides existence atomically; a concurrent init must not
    // turn the loser's AlreadyExists into a failure.
    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&args.marker)
    {
        Ok(_) => {
            println!("Created marker: {}", args.marker.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            println!("Marker already exists: {}", args.marker.display());
            Ok(())
        }
        Err(e) => Err(WorklockError::Marker(format!(
            "failed to create marker '{}': {}",
            args.marker.display(),
            e
        ))),
    }
}

/// Execute the `worklock run` command.
///
/// Registers this process in the marker and runs the given command as the
/// unit of work. The command's own outcome is reported but does not undo a
/// successful registration.
fn cmd_run(args: RunArgs) -> Result<()> {
    let (program, program_args) = args.command.split_first().ok_or_else(|| {
        WorklockError::UserError("no command given; pass one after `--`".to_string())
    })?;

    let mut outcome: Option<std::io::Result<ExitStatus>> = None;
    let worker = Worker::new(&args.marker, || {
        println!(
            "Registered as pid {}; running `{}`.",
            std::process::id(),
            args.command.join(" ")
        );
        outcome = Some(
            std::process::Command::new(program)
                .args(program_args)
                .status(),
        );
    });

    let worker = match args.lock_timeout {
        Some(secs) => worker.with_lock_timeout(Duration::from_secs(secs)),
        None => worker,
    };

    worker.try_start()?;

    // Registration already succeeded; the command's outcome is informational.
    match outcome {
        Some(Ok(status)) if status.success() => println!("Command completed successfully."),
        Some(Ok(status)) => println!("Command exited with {}.", status),
        Some(Err(e)) => eprintln!("Warning: command failed to launch: {}", e),
        None => {}
    }

    Ok(())
}

/// Execute the `worklock kill` command.
fn cmd_kill(args: KillArgs) -> Result<()> {
    let worker = Worker::new(&args.marker, || {});
    let pid = worker.try_kill()?;

    println!("Sent termination request to pid {}.", pid);
    println!("The marker is not cleared; it becomes reclaimable once the process exits.");
    Ok(())
}

/// Status report for one marker file.
#[derive(Debug, Serialize)]
struct MarkerStatus {
    /// Marker file path.
    marker: String,

    /// Text recorded in the marker, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    recorded: Option<String>,

    /// Whether the recorded PID names a live worker process.
    live: bool,

    /// The live owner's PID, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    live_pid: Option<u32>,

    /// Age of the marker file (last modification), human-readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<String>,
}

/// Execute the `worklock status` command.
///
/// Inspects the marker under the advisory lock so the report is a consistent
/// snapshot of the registration state.
fn cmd_status(args: StatusArgs) -> Result<()> {
    let status = inspect_marker(&args.marker, &SystemProcesses)?;

    if args.json {
        let json = serde_json::to_string_pretty(&status).map_err(|e| {
            WorklockError::UserError(format!("failed to serialize status: {}", e))
        })?;
        println!("{}", json);
        return Ok(());
    }

    match &status.age {
        Some(age) => println!("Marker: {} (age {})", status.marker, age),
        None => println!("Marker: {}", status.marker),
    }
    match (&status.recorded, status.live_pid) {
        (Some(recorded), Some(pid)) => {
            println!("Recorded: {} (live, pid {})", recorded, pid);
        }
        (Some(recorded), None) => println!("Recorded: {} (not live)", recorded),
        (None, _) => println!("Recorded: none"),
    }

    Ok(())
}

/// Build a status report for the marker at `path`, under the marker lock.
fn inspect_marker<O: ProcessOracle>(path: &Path, oracle: &O) -> Result<MarkerStatus> {
    let (recorded, live_pid) = {
        let mut lock = MarkerLock::acquire(path)?;
        let recorded = lock.read_recorded_pid()?;
        let live_pid = oracle.recorded_live_pid(&recorded);
        (recorded, live_pid)
        // lock released here
    };
    let age = marker_age(path).map(|d| age_string(&d));

    Ok(MarkerStatus {
        marker: path.display().to_string(),
        recorded: (!recorded.is_empty()).then(|| recorded.trim().to_string()),
        live: live_pid.is_some(),
        live_pid,
        age,
    })
}

/// Age of the marker file since its last modification.
fn marker_age(path: &Path) -> Option<ChronoDuration> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let modified: DateTime<Utc> = modified.into();
    Some(Utc::now().signed_duration_since(modified))
}

/// Format an age as a human-readable string.
fn age_string(age: &ChronoDuration) -> String {
    let minutes = age.num_minutes();
    let hours = age.num_hours();
    let days = age.num_days();

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}
