//! Process execution for backends.
//!
//! This module defines the [`ProcessRunner`] trait and provides implementations:
//! - [`SystemRunner`]: Spawns the real program and waits for it
//! - [`RecordingRunner`]: Records invocations without running anything, for tests

use crate::errors::{EdaError, EdaResult};
use log::{debug, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

/// Trait for executing external tools.
///
/// Runners own output streaming and the mapping of failures to errors. They
/// never retry.
pub trait ProcessRunner: Send + Sync {
    /// Run `command` with `args` in `cwd` and block until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`EdaError::Io`] if `cwd` is not a directory,
    /// [`EdaError::ToolNotFound`] if the program cannot be started and
    /// [`EdaError::ToolFailed`] if it exits unsuccessfully.
    fn run(&self, command: &str, args: &[String], cwd: &Path) -> EdaResult<()>;
}

fn command_line(command: &str, args: &[String]) -> String {
    std::iter::once(command)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runner that spawns real processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &str, args: &[String], cwd: &Path) -> EdaResult<()> {
        let line = command_line(command, args);
        info!("Running '{line}' in {}", cwd.display());

        // A missing working directory also surfaces as NotFound from spawn
        if !cwd.is_dir() {
            return Err(EdaError::io(
                cwd,
                std::io::Error::new(ErrorKind::NotFound, "working directory does not exist"),
            ));
        }

        let status = Command::new(command)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => EdaError::ToolNotFound {
                    command: command.to_string(),
                },
                _ => EdaError::io(cwd, e),
            })?;

        if !status.success() {
            return Err(EdaError::ToolFailed {
                command: line,
                code: status.code(),
            });
        }

        debug!("'{line}' finished successfully");
        Ok(())
    }
}

/// One recorded call to [`RecordingRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    /// The command and its arguments joined by spaces.
    pub fn command_line(&self) -> String {
        command_line(&self.command, &self.args)
    }
}

/// Runner that only records what it was asked to run.
///
/// **Note**: This runner is for testing. Clones share the same record, so a
/// test can keep one handle while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// All invocations so far, oldest first.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|record| record.clone())
            .unwrap_or_default()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, command: &str, args: &[String], cwd: &Path) -> EdaResult<()> {
        debug!("Recording '{}'", command_line(command, args));
        if let Ok(mut record) = self.invocations.lock() {
            record.push(Invocation {
                command: command.to_string(),
                args: args.to_vec(),
                cwd: cwd.to_path_buf(),
            });
        }
        Ok(())
    }
}
