//! Exit code constants for the worklock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid request)
//! - 2: Rejected (a live worker already holds the marker, or nothing to kill)
//! - 3: Marker file failure (missing, unopenable, unreadable)
//! - 4: Lock acquisition failure (contention or timeout)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an invalid request.
pub const USER_ERROR: i32 = 1;

/// Rejected: a live worker is already registered, or kill found nothing live.
pub const REJECTED: i32 = 2;

/// Marker file failure: missing, unopenable, unreadable, or unwritable.
pub const MARKER_FAILURE: i32 = 3;

/// Lock acquisition failure: the advisory lock could not be obtained.
pub const LOCK_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, REJECTED, MARKER_FAILURE, LOCK_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_have_expected_values() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(REJECTED, 2);
        assert_eq!(MARKER_FAILURE, 3);
        assert_eq!(LOCK_FAILURE, 4);
    }
}
