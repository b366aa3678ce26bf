//! Exit code constants for the scrip CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state)
//! - 2: Safety failure (critical validation issues present)
//! - 3: Store failure (record store unreadable or corrupt)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid state, or malformed input.
pub const USER_ERROR: i32 = 1;

/// Safety failure: critical validation issues block the requested operation.
pub const SAFETY_FAILURE: i32 = 2;

/// Store failure: the record store could not be read or written.
pub const STORE_FAILURE: i32 = 3;
