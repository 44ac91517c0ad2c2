//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Answer was graded but not accepted
pub const WRONG_ANSWER: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (broken content)
pub const DATAERR: i32 = 65;

/// Cannot open input (unknown shape or node)
pub const NOINPUT: i32 = 66;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
