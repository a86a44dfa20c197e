//! Fatal-error policy: log, then stop.
//!
//! Two classes are unrecoverable by design — host resource exhaustion and
//! invariant violation. Neither gets a retry or a degraded mode: the
//! process reports and terminates deterministically.

use std::fmt::Display;

/// Log `reason` to stderr and abort the process.
pub fn halt(reason: impl Display) -> ! {
    eprintln!("fatal: {reason}");
    std::process::abort();
}
