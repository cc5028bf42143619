//! writelog Host - Preference actions and host collaborators
//!
//! The preference engine decides whether a message is emitted, suppressed or
//! ends the process. Everything it cannot decide alone (prompting, showing
//! text, terminating) goes through the [`Host`] trait:
//! - [`ConsoleHost`] for terminals
//! - `mock::RecordingHost` for tests (feature `mock`)

mod console;
mod countdown;
mod mirror;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod preference;

pub use console::ConsoleHost;
pub use countdown::{countdown_text, run_countdown};
pub use mirror::mirror;
pub use preference::{Action, Decision, InquireAnswer, PreferenceEngine};

use writelog_core::Severity;

/// Where the host shows a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Regular output, colored by severity
    Output(Severity),
    /// Uncolored interactive text (confirmation prompts, help)
    Prompt,
    Warning,
    Error,
    Verbose,
    Debug,
}

/// Capabilities the write path needs from its environment
pub trait Host {
    /// Route a message to one of the host channels
    fn write(&mut self, message: &str, channel: Channel);

    /// Show `prompt` and read one line of input; `None` when input is exhausted
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Request a debugger break for `category`. Returns whether a debugger
    /// actually handled it.
    fn debug_break(&mut self, category: &str) -> bool;

    /// Show a live countdown of `seconds`, blocking until it reaches zero.
    /// `[seconds]` in `template` is replaced by the remaining seconds.
    fn countdown(&mut self, seconds: u32, template: &str);

    /// End the process
    fn terminate(&mut self);
}
