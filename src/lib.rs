//! Worklock: single-instance worker enforcement via a PID marker file.
//!
//! Ensures only one instance of a logical worker task is active at a time on
//! a host. Coordination happens entirely through a filesystem-resident marker
//! file guarded by OS-level exclusive advisory locks, so it is safe across
//! fully independent process invocations (cron jobs, supervised daemons, CLI
//! tools that must not overlap a prior run of themselves).
//!
//! The core type is [`worker::Worker`]: bind it to a marker path and a unit
//! of work, then call `start()`. If the marker records a PID that is still
//! alive, the work never runs; otherwise the marker is claimed with this
//! process's PID and the work executes. `kill()` terminates whatever live
//! process currently holds the claim.
//!
//! This is a single-host primitive, not a distributed lock, job scheduler,
//! or process supervisor.

pub mod error;
pub mod exit_codes;
pub mod worker;
