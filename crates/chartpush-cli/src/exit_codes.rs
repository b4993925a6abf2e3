//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// IO error - chart package or output file unreadable/unwritable
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;

/// Repository unreachable - connection, DNS or TLS failure (EX_UNAVAILABLE)
pub const NETWORK_ERROR: i32 = 69;

/// Repository answered with a non-success status (EX_PROTOCOL)
pub const REMOTE_ERROR: i32 = 76;

/// Authentication failed - token exchange or challenge problems (EX_NOPERM)
pub const AUTH_ERROR: i32 = 77;

/// Configuration error - bad repository file or client options (EX_CONFIG)
pub const CONFIG_ERROR: i32 = 78;
