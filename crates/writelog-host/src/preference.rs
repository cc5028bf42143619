//! Preference action decision table

use std::str::FromStr;
use tracing::debug;
use writelog_core::{Preference, PreferenceState};

use crate::{Channel, Host};

const INQUIRE_PROMPT: &str =
    "[Y] Yes  [A] Yes to All  [H] Halt Command  [S] Suspend  [?] Help (default is \"Y\")";

const INQUIRE_HELP: &str = "Y - Continue with only the next step of the operation.
A - Continue with all the steps of the operation.
H - Stop this command.
S - Pause the current pipeline and return to the command prompt.";

/// What a preference asks for, before any host interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Emit,
    Suppress,
    Stop,
    Inquire,
    Break,
}

impl From<Preference> for Action {
    fn from(preference: Preference) -> Self {
        match preference {
            Preference::Continue => Action::Emit,
            Preference::SilentlyContinue | Preference::Ignore => Action::Suppress,
            Preference::Stop => Action::Stop,
            Preference::Inquire => Action::Inquire,
            Preference::Break => Action::Break,
        }
    }
}

/// Final outcome for a pending message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Suppress,
    Emit,
    Terminate,
}

/// Answer to the confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquireAnswer {
    Yes,
    YesToAll,
    Halt,
    Suspend,
    Help,
}

impl FromStr for InquireAnswer {
    type Err = String;

    /// Empty input selects the default answer, Yes
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "" | "Y" => Ok(InquireAnswer::Yes),
            "A" => Ok(InquireAnswer::YesToAll),
            "H" => Ok(InquireAnswer::Halt),
            "S" => Ok(InquireAnswer::Suspend),
            "?" => Ok(InquireAnswer::Help),
            _ => Err(format!("Unknown answer: {}", s.trim())),
        }
    }
}

/// Applies configured preferences to pending messages
pub struct PreferenceEngine<'a> {
    preferences: &'a PreferenceState,
}

impl<'a> PreferenceEngine<'a> {
    pub fn new(preferences: &'a PreferenceState) -> Self {
        Self { preferences }
    }

    /// Pure lookup: the action configured for `category`
    pub fn action(&self, category: &str) -> Action {
        self.preferences.get(category).into()
    }

    /// Decide what happens to `message`, interacting with `host` for
    /// prompts, breaks and stop conditions. A `Terminate` decision has
    /// already asked the host to end the process.
    pub fn evaluate<H: Host + ?Sized>(&self, host: &mut H, category: &str, message: &str) -> Decision {
        let action = self.action(category);
        debug!("Preference {} -> {:?}", category, action);

        match action {
            Action::Emit => Decision::Emit,
            Action::Suppress => Decision::Suppress,
            Action::Stop => {
                host.write(
                    &format!(
                        "The running command stopped because the preference variable \"{}\" or common parameter is set to Stop: {}",
                        category, message
                    ),
                    Channel::Error,
                );
                host.terminate();
                Decision::Terminate
            }
            Action::Inquire => match inquire(host) {
                InquireAnswer::Halt => {
                    host.write(
                        "The running command stopped because the user selected the Stop option.",
                        Channel::Error,
                    );
                    host.terminate();
                    Decision::Terminate
                }
                InquireAnswer::Suspend => {
                    host.terminate();
                    Decision::Terminate
                }
                _ => Decision::Emit,
            },
            Action::Break => {
                if !host.debug_break(category) {
                    debug!("No debugger handled the break for {}", category);
                }
                Decision::Emit
            }
        }
    }
}

/// Ask for confirmation until a decisive answer is given
fn inquire<H: Host + ?Sized>(host: &mut H) -> InquireAnswer {
    host.write("", Channel::Prompt);
    host.write("Confirm", Channel::Prompt);
    host.write("Continue with this operation?", Channel::Prompt);

    loop {
        let Some(input) = host.read_line(INQUIRE_PROMPT) else {
            return InquireAnswer::Yes;
        };

        match input.parse::<InquireAnswer>() {
            Ok(InquireAnswer::Help) => host.write(INQUIRE_HELP, Channel::Prompt),
            Ok(answer) => return answer,
            Err(_) => continue,
        }
    }
}
