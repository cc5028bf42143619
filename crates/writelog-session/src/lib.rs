//! writelog Session - Start, submit and finish against one log file
//!
//! A [`WriteLogSession`] borrows the caller's [`LogRegistry`] and [`Host`].
//! Keep-alive sessions leave their handle in the registry, so the next
//! session on the same path reuses it and skips the header check.
//!
//! [`LogRegistry`]: writelog_logs::LogRegistry
//! [`Host`]: writelog_host::Host

mod session;

pub use session::{SessionOptions, SessionState, SubmitOutcome, WriteLogSession};
