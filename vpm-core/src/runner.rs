//! Execution of external commands
//!
//! Everything that touches the host system goes through [`CommandRunner`],
//! which keeps the rest of the crate testable without a real package manager.

use std::fmt;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use log::debug;

use crate::action_log::ActionLog;

/// A single external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Run with root privileges
    pub elevated: bool,
    /// Discard stdout and stderr
    pub quiet: bool,
}

impl Invocation {
    /// Builds an invocation from an argument vector, program first
    fn from_argv(argv: Vec<String>, elevated: bool, quiet: bool) -> Self {
        let mut parts = argv.into_iter();
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
            elevated,
            quiet,
        }
    }

    /// Unprivileged command with its output suppressed
    pub fn quiet(argv: Vec<String>) -> Self {
        Self::from_argv(argv, false, true)
    }

    /// Privileged command attached to the terminal
    pub fn elevated(argv: Vec<String>) -> Self {
        Self::from_argv(argv, true, false)
    }

    /// Program followed by its arguments
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// Runs commands and probes for executables
pub trait CommandRunner {
    /// Returns whether `program` can be found on PATH
    fn is_available(&self, program: &str) -> bool;

    /// Runs the command to completion and returns whether it exited with status zero
    fn run(&self, invocation: &Invocation) -> Result<bool>;
}

/// Runs commands on the host via `std::process`
pub struct SystemRunner {
    needs_sudo: bool,
    action_log: Option<ActionLog>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self {
            needs_sudo: !running_as_root(),
            action_log: None,
        }
    }

    /// Records every elevated command and its result in `log`
    pub fn with_action_log(mut self, log: ActionLog) -> Self {
        self.action_log = Some(log);
        self
    }

    pub fn action_log(&self) -> Option<&ActionLog> {
        self.action_log.as_ref()
    }

    fn build_command(&self, invocation: &Invocation) -> Command {
        let mut cmd = if invocation.elevated && self.needs_sudo {
            let mut cmd = Command::new("sudo");
            cmd.arg(&invocation.program);
            cmd
        } else {
            Command::new(&invocation.program)
        };
        cmd.args(&invocation.args);

        if invocation.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        cmd
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, invocation: &Invocation) -> Result<bool> {
        debug!(
            "Running: {}{}",
            if invocation.elevated && self.needs_sudo { "sudo " } else { "" },
            invocation
        );

        let result = self
            .build_command(invocation)
            .status()
            .with_context(|| format!("Failed to execute {}", invocation.program));

        if invocation.elevated {
            if let Some(ref log) = self.action_log {
                match &result {
                    Ok(status) => log.command(&invocation.to_string(), status.code()),
                    Err(e) => log.error(&format!("{}: {:#}", invocation, e)),
                }
            }
        }

        let status = result?;
        debug!("{} exited with {}", invocation.program, status);
        Ok(status.success())
    }
}

#[cfg(unix)]
fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn running_as_root() -> bool {
    false
}
