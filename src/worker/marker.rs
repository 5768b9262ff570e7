//! Exclusive advisory locking and I/O on the PID marker file.

use crate::error::{Result, WorklockError};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Delay between attempts when waiting on a contended lock with a deadline.
const RETRY_INTERVAL: Duration = Duration::from_millis(25);

/// An exclusively locked handle to a marker file.
///
/// Holds the advisory lock (and the open file) for its entire lifetime.
/// Dropping the handle releases the lock and closes the file, so every exit
/// path through a critical section releases the lock.
#[derive(Debug)]
pub struct MarkerLock {
    /// The locked marker file handle.
    file: File,

    /// Path to the marker file (for error messages).
    path: PathBuf,
}

impl MarkerLock {
    /// Open the marker file and take a blocking exclusive advisory lock.
    ///
    /// The marker must already exist and be openable for read+write; a
    /// missing file is a hard failure, not auto-creation. Blocks until the
    /// lock is obtainable.
    ///
    /// # Errors
    ///
    /// * `WorklockError::Marker` - the file could not be opened
    /// * `WorklockError::Lock` - the advisory lock could not be taken
    pub fn acquire<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = open_marker(path)?;

        file.lock_exclusive().map_err(|e| {
            WorklockError::Lock(format!(
                "failed to lock marker '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Open the marker file and take an exclusive advisory lock, waiting at
    /// most `timeout` for a contended lock.
    ///
    /// Retries a non-blocking lock attempt on a short interval until the
    /// deadline passes, then fails with a contention error.
    ///
    /// # Errors
    ///
    /// * `WorklockError::Marker` - the file could not be opened
    /// * `WorklockError::Lock` - the lock was still held when the timeout expired
    pub fn acquire_timeout<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        let file = open_marker(path)?;
        let deadline = Instant::now() + timeout;

        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    return Ok(Self {
                        file,
                        path: path.to_path_buf(),
                    });
                }
                Err(e) => {
                    if Instant::now() >= deadline {
                        return Err(WorklockError::Lock(format!(
                            "timed out after {:?} waiting for marker '{}': {}",
                            timeout,
                            path.display(),
                            e
                        )));
                    }
                    thread::sleep(RETRY_INTERVAL);
                }
            }
        }
    }

    /// Path to the locked marker file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the PID recorded in the marker.
    ///
    /// Repositions to the start of the file and returns its first line.
    /// An empty file yields an empty string. Content is decoded lossily:
    /// arbitrary bytes are never a read error, they simply fail the liveness
    /// match downstream like any other garbage.
    pub fn read_recorded_pid(&mut self) -> Result<String> {
        self.file.seek(SeekFrom::Start(0)).map_err(|e| {
            WorklockError::Marker(format!(
                "failed to seek in marker '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let mut bytes = Vec::new();
        self.file.read_to_end(&mut bytes).map_err(|e| {
            WorklockError::Marker(format!(
                "failed to read marker '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let contents = String::from_utf8_lossy(&bytes);
        Ok(contents.lines().next().unwrap_or_default().to_string())
    }

    /// Claim the marker: truncate it and write `pid` as its entire content.
    ///
    /// Writes the decimal PID with no surrounding whitespace or trailing
    /// newline, so the whole file content is exactly one textual token.
    pub fn claim(&mut self, pid: u32) -> Result<()> {
        let write = |file: &mut File| -> std::io::Result<()> {
            file.seek(SeekFrom::Start(0))?;
            file.set_len(0)?;
            file.write_all(pid.to_string().as_bytes())?;
            file.flush()
        };

        write(&mut self.file).map_err(|e| {
            WorklockError::Marker(format!(
                "failed to write pid to marker '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl Drop for MarkerLock {
    fn drop(&mut self) {
        // Closing the descriptor releases the lock too; explicit unlock keeps
        // the release immediate and errors here are not actionable.
        let _ = FileExt::unlock(&self.file);
    }
}

/// Open the marker file for read+write without creating it.
fn open_marker(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| {
            WorklockError::Marker(format!(
                "failed to open marker '{}': {}",
                path.display(),
                e
            ))
        })
}
