//! Mock host for testing

use std::collections::VecDeque;

use crate::{Channel, Host};

/// A host that records everything it is asked to do and answers prompts
/// from a script. `terminate` is recorded instead of exiting.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Messages routed to the host, in order
    messages: Vec<(String, Channel)>,
    /// Scripted answers for `read_line`
    answers: VecDeque<String>,
    /// Number of prompts shown
    prompts: usize,
    /// Categories that requested a debugger break
    breaks: Vec<String>,
    /// Countdowns shown, with their rendered template
    countdowns: Vec<(u32, String)>,
    /// Number of termination requests
    terminations: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host that answers prompts with `answers`, in order
    pub fn with_answers(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[(String, Channel)] {
        &self.messages
    }

    /// Check if a message containing `text` was routed to `channel`
    pub fn was_written(&self, text: &str, channel: Channel) -> bool {
        self.messages
            .iter()
            .any(|(message, c)| *c == channel && message.contains(text))
    }

    pub fn prompts(&self) -> usize {
        self.prompts
    }

    pub fn breaks(&self) -> Vec<String> {
        self.breaks.clone()
    }

    pub fn countdowns(&self) -> &[(u32, String)] {
        &self.countdowns
    }

    pub fn terminations(&self) -> usize {
        self.terminations
    }
}

impl Host for RecordingHost {
    fn write(&mut self, message: &str, channel: Channel) {
        self.messages.push((message.to_string(), channel));
    }

    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        self.prompts += 1;
        self.answers.pop_front()
    }

    fn debug_break(&mut self, category: &str) -> bool {
        self.breaks.push(category.to_string());
        false
    }

    fn countdown(&mut self, seconds: u32, template: &str) {
        self.countdowns.push((seconds, template.to_string()));
    }

    fn terminate(&mut self) {
        self.terminations += 1;
    }
}
