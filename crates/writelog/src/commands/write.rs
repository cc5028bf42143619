//! Write command implementation - one log entry per message

use anyhow::{bail, Result};
use std::io::{self, BufRead};
use tracing::debug;
use writelog_core::Severity;
use writelog_host::{ConsoleHost, Host};
use writelog_logs::LogRegistry;
use writelog_session::{SessionOptions, SubmitOutcome, WriteLogSession};

use crate::cli::WriteArgs;
use crate::output::{print_write_summary, WriteSummary};

pub fn execute(args: WriteArgs) -> Result<()> {
    let mut config = super::load_config(args.path.clone())?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    for assignment in &args.preferences {
        config.preferences.apply_assignment(assignment)?;
    }
    let path = super::log_path(&config)?;

    let messages = collect_messages(args.messages)?;
    if messages.is_empty() {
        bail!("No message given; pass one as an argument or pipe lines on stdin");
    }

    let options = SessionOptions {
        mode: config.mode,
        out_host: config.out_host || args.out_host,
        hide_log_dir: args.hide_log_dir,
        replace_log: args.replace_log,
        preferences: config.preferences,
    };
    let run = WriteRun {
        messages,
        severity: args.severity,
        no_details: args.no_details,
        terminate: args.terminate,
        terminate_in: args.terminate_in,
    };

    let mut registry = LogRegistry::new();
    let mut host = ConsoleHost::new();
    run.execute(&mut registry, &mut host, options, &path)
}

/// One `write` invocation against a host
struct WriteRun {
    messages: Vec<String>,
    severity: Severity,
    no_details: bool,
    terminate: bool,
    terminate_in: u32,
}

impl WriteRun {
    /// Submit every message, report, then finish the session.
    /// Failed writes are reported as an error before any countdown or
    /// termination can end the process with a success status.
    fn execute<H: Host + ?Sized>(
        &self,
        registry: &mut LogRegistry,
        host: &mut H,
        options: SessionOptions,
        path: &std::path::Path,
    ) -> Result<()> {
        let mut session = WriteLogSession::new(registry, host, options);
        session.start(path)?;

        let mut summary = WriteSummary::new(session.path());
        for message in &self.messages {
            match session.submit(message, self.severity, self.no_details)? {
                SubmitOutcome::Written => summary.written += 1,
                SubmitOutcome::Suppressed => summary.suppressed += 1,
                SubmitOutcome::Failed => summary.failed += 1,
                SubmitOutcome::Terminated => break,
            }
        }
        debug!(
            "Wrote {} of {} message(s) to {}",
            summary.written,
            self.messages.len(),
            summary.path
        );

        print_write_summary(&summary);

        if summary.failed > 0 {
            drop(session);
            registry.close_all();
            bail!("{} message(s) could not be written", summary.failed);
        }

        if !session.finish(self.terminate, self.terminate_in) {
            bail!("Failed to close {}", summary.path);
        }
        Ok(())
    }
}

/// Messages from the command line, or stdin lines when none were given and
/// stdin is not a terminal
fn collect_messages(messages: Vec<String>) -> Result<Vec<String>> {
    if !messages.is_empty() || atty::is(atty::Stream::Stdin) {
        return Ok(messages);
    }

    let stdin = io::stdin();
    let lines = stdin.lock().lines().collect::<io::Result<Vec<_>>>()?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;
    use writelog_host::mock::RecordingHost;
    use writelog_logs::LogFile;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run(messages: &[&str], severity: Severity) -> WriteRun {
        WriteRun {
            messages: messages.iter().map(|m| m.to_string()).collect(),
            severity,
            no_details: false,
            terminate: false,
            terminate_in: 0,
        }
    }

    #[test]
    fn test_failed_fatal_write_errors_without_terminating() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        fs::write(&path, "").unwrap();
        let mut registry = LogRegistry::new();
        registry.insert(LogFile::with_writer(path.clone(), FailingWriter));
        let mut host = RecordingHost::new();

        let err = run(&["disk full"], Severity::Fatal)
            .execute(&mut registry, &mut host, SessionOptions::default(), &path)
            .unwrap_err();

        assert!(err.to_string().contains("could not be written"));
        assert!(host.countdowns().is_empty());
        assert_eq!(host.terminations(), 0);
        assert!(!registry.is_open(&path));
    }

    #[test]
    fn test_written_fatal_counts_down_and_terminates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        let mut registry = LogRegistry::new();
        let mut host = RecordingHost::new();

        run(&["boom"], Severity::Fatal)
            .execute(&mut registry, &mut host, SessionOptions::default(), &path)
            .unwrap();

        assert_eq!(host.countdowns().len(), 1);
        assert_eq!(host.terminations(), 1);
        assert!(fs::read_to_string(&path)
            .unwrap()
            .contains("boom --> Exited the script"));
    }
}
