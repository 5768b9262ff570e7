//! Process table access: liveness snapshots and termination requests.

use sysinfo::System;

/// Capability for checking recorded PIDs against the live process table and
/// requesting termination.
///
/// Injected into the guard so tests can substitute a fake process table
/// instead of enumerating real processes.
pub trait ProcessOracle {
    /// Snapshot of the PIDs of currently running processes belonging to the
    /// same runtime family as this worker.
    fn live_pids(&self) -> Vec<u32>;

    /// Request termination of `pid`. Fire-and-forget: no confirmation that
    /// the target exited is obtained or awaited.
    fn terminate(&self, pid: u32);

    /// Check whether the text recorded in a marker names a live process.
    ///
    /// Trims incidental whitespace before matching. Empty or non-numeric
    /// content is simply not live, never an error.
    fn recorded_live_pid(&self, recorded: &str) -> Option<u32> {
        let token = recorded.trim();
        if token.is_empty() {
            return None;
        }
        let pid: u32 = token.parse().ok()?;
        if self.live_pids().contains(&pid) {
            Some(pid)
        } else {
            None
        }
    }
}

/// Production oracle backed by the OS process table.
///
/// The liveness universe is restricted to processes whose executable name
/// matches this process's own, so a recorded PID that has been reused by an
/// unrelated program does not count as a live worker.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcesses;

impl ProcessOracle for SystemProcesses {
    fn live_pids(&self) -> Vec<u32> {
        let sys = System::new_all();

        let own_name = sysinfo::get_current_pid()
            .ok()
            .and_then(|pid| sys.process(pid))
            .map(|p| p.name().to_os_string());

        let Some(own_name) = own_name else {
            // Can't identify our own process; treat the table as empty so a
            // stale marker never blocks registration forever.
            return Vec::new();
        };

        sys.processes()
            .iter()
            .filter(|(_, process)| process.name() == own_name.as_os_str())
            .map(|(pid, _)| pid.as_u32())
            .collect()
    }

    #[cfg(unix)]
    fn terminate(&self, pid: u32) {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        let _ = signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
    }

    #[cfg(not(unix))]
    fn terminate(&self, pid: u32) {
        let sys = System::new_all();
        if let Some(process) = sys.process(sysinfo::Pid::from_u32(pid)) {
            process.kill();
        }
    }
}
