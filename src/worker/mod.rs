//! Registration guard subsystem for worklock.
//!
//! This module implements single-instance worker enforcement on one host:
//! - **Marker lock** (`marker.rs`): exclusive advisory locking of the PID
//!   marker file for the duration of any registration-state inspection or
//!   mutation.
//! - **Liveness check** (`process.rs`): deciding whether the PID recorded in
//!   the marker corresponds to a process that is still running.
//! - **Registration protocol** (`guard.rs`): claiming the marker by writing
//!   this process's PID once the slot is proven free, and terminating a
//!   previously registered owner.
//!
//! # Marker Files
//!
//! A marker is a single small text file whose whole content is one decimal
//! PID (or empty). It must be provisioned externally before first use: the
//! guard opens it read+write but never creates it. All coordination state
//! lives in the marker; the guard itself is stateless and restart-safe.
//!
//! # Locking
//!
//! Coordination is between independent OS processes, so exclusion uses
//! OS-level advisory file locks (flock semantics via `fs2`), not in-process
//! synchronization. The lock serializes the whole read → liveness-check →
//! claim sequence, so at most one contender can register per marker at a
//! time. RAII guards release the lock on every exit path.
//!
//! Advisory locks are only honored by cooperating processes, and may not
//! work on network filesystems that do not implement them.

mod guard;
mod marker;
mod process;


// Re-export public API
pub use guard::Worker;
pub use marker::MarkerLock;
pub use process::{ProcessOracle, SystemProcesses};
