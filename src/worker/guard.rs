//! The registration protocol: claim a marker, run the work, kill an owner.

use super::marker::MarkerLock;
use super::process::{ProcessOracle, SystemProcesses};
use crate::error::{Result, WorklockError};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Turns the calling process into an exclusive worker for one marker file.
///
/// A `Worker` binds a marker-file path to a unit of work. `start()` registers
/// this process as the marker's owner, rejecting if a previously recorded
/// owner is still alive, and only then runs the work. `kill()` terminates
/// whatever live process currently holds the claim.
///
/// The worker holds no file handle between calls; multiple `Worker` instances
/// built against the same path (in the same or different processes) compete
/// for the same exclusion domain.
///
/// # Example
///
/// ```no_run
/// use worklock::worker::Worker;
///
/// let worker = Worker::new("/var/run/reports.pid", || {
///     // long-running job, executed only if no other instance is live
/// });
/// if !worker.start() {
///     eprintln!("another instance is already running");
/// }
/// ```
pub struct Worker<F, O = SystemProcesses> {
    /// Path to the marker file.
    marker_path: PathBuf,

    /// The unit of work, run once after a successful claim.
    work: F,

    /// Liveness/termination capability.
    oracle: O,

    /// Optional bound on how long to wait for the marker lock.
    lock_timeout: Option<Duration>,
}

impl<F: FnOnce()> Worker<F> {
    /// Create a worker bound to `marker_path` that runs `work` once
    /// registration succeeds.
    ///
    /// The marker file must already exist; provisioning it is the caller's
    /// responsibility (see `worklock init`).
    pub fn new<P: AsRef<Path>>(marker_path: P, work: F) -> Self {
        Self {
            marker_path: marker_path.as_ref().to_path_buf(),
            work,
            oracle: SystemProcesses,
            lock_timeout: None,
        }
    }
}

impl<F: FnOnce(), O: ProcessOracle> Worker<F, O> {
    /// Replace the process oracle. Used by tests to substitute a fake
    /// process table.
    pub fn with_oracle<O2: ProcessOracle>(self, oracle: O2) -> Worker<F, O2> {
        Worker {
            marker_path: self.marker_path,
            work: self.work,
            oracle,
            lock_timeout: self.lock_timeout,
        }
    }

    /// Bound the wait for the marker lock instead of blocking indefinitely.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }

    /// Register this process and run the unit of work.
    ///
    /// Returns `true` iff this invocation claimed the marker and ran the
    /// work; `false` if a live owner was found or the marker/lock was
    /// unavailable. Failures inside the unit of work are not observed: once
    /// registered, `start` reports success regardless of what the work does.
    pub fn start(self) -> bool {
        match self.try_start() {
            Ok(()) => true,
            Err(err) => {
                eprintln!("worklock: {}", err);
                false
            }
        }
    }

    /// Register this process and run the unit of work, reporting rejection
    /// reasons as structured errors.
    ///
    /// The marker lock is held only across the registration decision (read
    /// recorded PID → liveness check → claim) and is released before the
    /// work runs, so the work may take arbitrarily long without holding a
    /// file lock.
    ///
    /// # Errors
    ///
    /// * `WorklockError::AlreadyRunning` - a live owner holds the claim
    /// * `WorklockError::Marker` - the marker could not be opened, read, or written
    /// * `WorklockError::Lock` - the advisory lock could not be acquired
    pub fn try_start(self) -> Result<()> {
        self.register()?;
        (self.work)();
        Ok(())
    }

    /// Terminate the live process currently registered in the marker.
    ///
    /// Returns `true` iff a live owner was found and a termination request
    /// sent; `false` when the marker is empty or stale, or on marker/lock
    /// failure.
    pub fn kill(&self) -> bool {
        match self.try_kill() {
            Ok(_) => true,
            Err(err) => {
                eprintln!("worklock: {}", err);
                false
            }
        }
    }

    /// Terminate the live registered owner, returning its PID.
    ///
    /// Termination is best-effort fire-and-forget: the signal is sent after
    /// the marker lock is released (signal delivery mutates no marker state),
    /// and no exit confirmation is awaited. The marker is deliberately not
    /// cleared; a later `start` relies on the liveness check finding the PID
    /// gone once the OS reaps it.
    ///
    /// # Errors
    ///
    /// * `WorklockError::NothingToKill` - the marker is empty or records a dead process
    /// * `WorklockError::Marker` - the marker could not be opened or read
    /// * `WorklockError::Lock` - the advisory lock could not be acquired
    pub fn try_kill(&self) -> Result<u32> {
        let pid = {
            let mut lock = self.acquire_lock()?;
            let recorded = lock.read_recorded_pid()?;
            self.oracle
                .recorded_live_pid(&recorded)
                .ok_or(WorklockError::NothingToKill)?
            // lock released here
        };

        self.oracle.terminate(pid);
        Ok(pid)
    }

    /// The registration decision, executed entirely under the marker lock.
    fn register(&self) -> Result<()> {
        let mut lock = self.acquire_lock()?;

        let recorded = lock.read_recorded_pid()?;
        if let Some(pid) = self.oracle.recorded_live_pid(&recorded) {
            return Err(WorklockError::AlreadyRunning(pid));
        }

        // Recorded PID is absent, stale, or garbage: claim the slot.
        lock.claim(std::process::id())
    }

    fn acquire_lock(&self) -> Result<MarkerLock> {
        match self.lock_timeout {
            Some(timeout) => MarkerLock::acquire_timeout(&self.marker_path, timeout),
            None => MarkerLock::acquire(&self.marker_path),
        }
    }
}
