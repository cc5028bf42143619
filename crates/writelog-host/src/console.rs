//! Terminal host

use colored::{Color, Colorize};
use console::Term;
use dialoguer::Input;
use std::io::{self, BufRead, Write};
use tracing::debug;
use writelog_core::Severity;

use crate::countdown::{countdown_text, run_countdown};
use crate::{Channel, Host};

/// Host backed by the process's terminal
pub struct ConsoleHost {
    interactive: bool,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self {
            interactive: atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout),
        }
    }
}

impl Default for ConsoleHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Color used when mirroring an entry of `severity`
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Information => Color::BrightCyan,
        Severity::Attention => Color::BrightYellow,
        Severity::Success => Color::BrightGreen,
        _ => Color::BrightWhite,
    }
}

/// Show `prompt` on `out` and read one line from `input`
fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Option<String> {
    let _ = write!(out, "{}: ", prompt);
    let _ = out.flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

impl Host for ConsoleHost {
    fn write(&mut self, message: &str, channel: Channel) {
        match channel {
            Channel::Output(severity) => println!("{}", message.color(severity_color(severity))),
            Channel::Prompt => eprintln!("{}", message),
            Channel::Warning => eprintln!("{} {}", "WARNING:".yellow(), message.yellow()),
            Channel::Error => eprintln!("{}", message.red()),
            Channel::Verbose => eprintln!("{} {}", "VERBOSE:".yellow(), message.yellow()),
            Channel::Debug => eprintln!("{} {}", "DEBUG:".yellow(), message.yellow()),
        }
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if self.interactive {
            return Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .ok();
        }

        read_answer(&mut io::stdin().lock(), &mut io::stderr(), prompt)
    }

    fn debug_break(&mut self, category: &str) -> bool {
        debug!("Break requested by {}, no debugger attached", category);
        false
    }

    fn countdown(&mut self, seconds: u32, template: &str) {
        let term = Term::stdout();
        let _ = term.write_line("");
        run_countdown(seconds, |remaining| {
            let _ = term.clear_line();
            let _ = term.write_str(&countdown_text(template, remaining));
        });
        let _ = term.write_line("");
    }

    fn terminate(&mut self) {
        debug!("Terminating process");
        let _ = io::stdout().flush();
        std::process::exit(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors() {
        assert_eq!(severity_color(Severity::Information), Color::BrightCyan);
        assert_eq!(severity_color(Severity::Attention), Color::BrightYellow);
        assert_eq!(severity_color(Severity::Success), Color::BrightGreen);
        assert_eq!(severity_color(Severity::Error), Color::BrightWhite);
    }

    #[test]
    fn test_read_answer_prompts_on_given_writer() {
        let mut input = io::Cursor::new("h\r\nignored\n");
        let mut prompt_out = Vec::new();

        let answer = read_answer(&mut input, &mut prompt_out, "Continue?");

        assert_eq!(answer.as_deref(), Some("h"));
        assert_eq!(String::from_utf8(prompt_out).unwrap(), "Continue?: ");
    }

    #[test]
    fn test_read_answer_at_end_of_input() {
        let mut input = io::Cursor::new("");
        let mut prompt_out = Vec::new();

        assert_eq!(read_answer(&mut input, &mut prompt_out, "Continue?"), None);
    }
}
