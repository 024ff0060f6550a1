//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                                        |
//! |------|----------------------------------------------------------------|
//! | 0    | Success (both CSV files written)                               |
//! | 1    | Any failure: bad arguments, bad folder, no workbooks, missing  |
//! |      | selections file, unreadable workbook, write failure            |
//!
//! Usage errors deliberately share code 1 rather than clap's default 2.

/// Success - both output tables written.
pub const EXIT_SUCCESS: u8 = 0;

/// Failure - configuration, usage, or runtime error.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments.
pub const EXIT_USAGE: u8 = EXIT_ERROR;
