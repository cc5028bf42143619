//! Write-log session lifecycle

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use writelog_core::{
    validate_log_path, Error, LogEntry, LoggingMode, PreferenceState, Result, Severity,
    DEFAULT_FATAL_TERMINATE_SECS, FATAL_SUFFIX, TERMINATE_MESSAGE,
};
use writelog_host::{mirror, Channel, Decision, Host, PreferenceEngine};
use writelog_logs::{hide_directory, LogRegistry, SessionHeader};

/// Per-session switches
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub mode: LoggingMode,
    /// Mirror written entries to the host
    pub out_host: bool,
    /// Hide the log directory the first time the log is opened
    pub hide_log_dir: bool,
    /// Empty the log before the session starts
    pub replace_log: bool,
    pub preferences: PreferenceState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unopened,
    Open,
    Closed,
    Terminated,
}

/// What became of a submitted message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Written,
    /// Hidden by the debug or verbose preference
    Suppressed,
    /// The entry could not be written to the log file
    Failed,
    /// A preference ended the process; nothing further is processed
    Terminated,
}

/// One Start → Submit* → Finish run against a single log file
pub struct WriteLogSession<'a, H: Host + ?Sized> {
    registry: &'a mut LogRegistry,
    host: &'a mut H,
    options: SessionOptions,
    path: PathBuf,
    state: SessionState,
    last_severity: Option<Severity>,
}

impl<'a, H: Host + ?Sized> WriteLogSession<'a, H> {
    pub fn new(registry: &'a mut LogRegistry, host: &'a mut H, options: SessionOptions) -> Self {
        Self {
            registry,
            host,
            options,
            path: PathBuf::new(),
            state: SessionState::Unopened,
            last_severity: None,
        }
    }

    /// Current log path. Changes when the log directory gets hidden.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Open the log at `path` and write the session header if this registry
    /// has not initialized the path yet.
    pub fn start(&mut self, path: &Path) -> Result<()> {
        if self.state != SessionState::Unopened {
            return Ok(());
        }
        validate_log_path(path)?;

        if self.options.replace_log {
            self.registry.clear(path)?;
        }

        let initialized = self.registry.is_initialized(path) && path.exists();
        self.registry.open(path)?;

        let path = if initialized {
            debug!("Log already initialized: {}", path.display());
            path.to_path_buf()
        } else {
            match self.initialize(path) {
                Ok(path) => path,
                Err(e) => {
                    // A retried start begins afresh
                    self.registry.close(path);
                    return Err(e);
                }
            }
        };

        self.path = path;
        self.state = SessionState::Open;
        Ok(())
    }

    /// Hide the directory if requested, write the header, and mark the log
    /// initialized. Returns the path the session continues under.
    fn initialize(&mut self, path: &Path) -> Result<PathBuf> {
        let path = if self.options.hide_log_dir {
            self.hide(path)?
        } else {
            path.to_path_buf()
        };

        if let Err(e) = self.write_header(&path) {
            self.registry.close(&path);
            return Err(e);
        }
        self.registry.mark_initialized(&path);
        Ok(path)
    }

    fn hide(&mut self, path: &Path) -> Result<PathBuf> {
        let Some(hidden) = hide_directory(path)? else {
            return Ok(path.to_path_buf());
        };

        self.registry.relocate(path, &hidden)?;
        self.host.write(
            &format!(
                "Log path has been hidden and changed location to '{}'. Please use this path from now on",
                hidden.display()
            ),
            Channel::Output(Severity::Attention),
        );
        Ok(hidden)
    }

    fn write_header(&mut self, path: &Path) -> Result<()> {
        let header = SessionHeader::current();
        if header.is_present_in(path)? {
            debug!("Session header already present in {}", path.display());
            return Ok(());
        }

        let separated = !writelog_logs::is_empty(path)?;
        let written = self
            .registry
            .get_mut(path)
            .is_some_and(|file| file.append_line(&header.block(separated)));
        if !written {
            warn!("Failed to write session header to {}", path.display());
        }
        Ok(())
    }

    /// Write one message. Debug and verbose messages pass through their
    /// preference first; every other severity is always written.
    pub fn submit(&mut self, message: &str, severity: Severity, no_details: bool) -> Result<SubmitOutcome> {
        match self.state {
            SessionState::Unopened => return Err(Error::NotStarted),
            SessionState::Terminated => return Ok(SubmitOutcome::Terminated),
            SessionState::Open | SessionState::Closed => {}
        }

        if let Err(e) = self.registry.open(&self.path) {
            warn!("Failed to reopen log: {}", e);
            return Ok(SubmitOutcome::Failed);
        }
        self.state = SessionState::Open;
        self.last_severity = Some(severity);

        let mut message = message.to_string();
        if severity == Severity::Fatal {
            message.push_str(FATAL_SUFFIX);
        }

        if let Some(category) = severity.write_category() {
            let engine = PreferenceEngine::new(&self.options.preferences);
            match engine.evaluate(&mut *self.host, category, &message) {
                Decision::Emit => {}
                Decision::Suppress => return Ok(SubmitOutcome::Suppressed),
                Decision::Terminate => return Ok(self.terminated()),
            }
        }

        let entry = LogEntry::new(severity, message, !no_details);
        let written = self
            .registry
            .get_mut(&self.path)
            .is_some_and(|file| file.append(&entry));

        if written
            && self.options.out_host
            && mirror(&mut *self.host, &self.options.preferences, severity, entry.text())
                == Decision::Terminate
        {
            return Ok(self.terminated());
        }

        Ok(if written {
            SubmitOutcome::Written
        } else {
            SubmitOutcome::Failed
        })
    }

    fn terminated(&mut self) -> SubmitOutcome {
        self.state = SessionState::Terminated;
        SubmitOutcome::Terminated
    }

    /// End the session: close the file unless keeping it alive, then count
    /// down and terminate when requested. A fatal last entry terminates after
    /// the default countdown unless termination was configured explicitly.
    /// Returns false when closing the file failed.
    pub fn finish(&mut self, terminate: bool, terminate_in: u32) -> bool {
        if self.state == SessionState::Terminated {
            return true;
        }

        let mut closed = true;
        if self.state == SessionState::Open {
            if self.options.mode.closes_file() {
                if self.options.mode == LoggingMode::Close {
                    if let Some(file) = self.registry.get_mut(&self.path) {
                        file.append(&LogEntry::raw(""));
                    }
                }
                closed = self.registry.close(&self.path);
            }
            self.state = SessionState::Closed;
        }

        let mut terminate_in = terminate_in;
        if self.last_severity == Some(Severity::Fatal) && !terminate && terminate_in == 0 {
            terminate_in = DEFAULT_FATAL_TERMINATE_SECS;
        }

        if terminate || terminate_in > 0 {
            if terminate_in > 0 {
                self.host.countdown(terminate_in, TERMINATE_MESSAGE);
            }
            info!("Terminating after log session on {}", self.path.display());
            self.host.terminate();
            self.state = SessionState::Terminated;
        }

        closed
    }
}
