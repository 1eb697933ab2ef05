//! External process execution with incremental output capture.
//!
//! This module runs exactly one svn client command to completion and
//! captures both output streams. Stdout is read line by line so that a
//! progress callback can observe long-running operations (checkout, update)
//! as they happen; stderr is collected on a helper thread to avoid pipe
//! deadlock.
//!
//! # Public API
//! - [`CommandResult`]: Captured outcome of one invocation
//! - [`execute`]: Run an invocation, optionally streaming progress
//!
//! The executor never interprets stderr; classification is the caller's
//! job. Its only hard error is failing to launch the process at all, which
//! means the client binary is missing or misconfigured.

use crate::core::error::{Result, SvnBridgeError};
use crate::core::invocation::SvnInvocation;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};

/// Per-line progress observer for long-running commands.
pub type ProgressFn<'a> = &'a dyn Fn(&str);

/// Captured outcome of one external command invocation.
///
/// Created per execution and discarded once consumed; the engine keeps no
/// command history.
#[derive(Debug)]
pub struct CommandResult {
    pub program: String,
    pub args: Vec<String>,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl CommandResult {
    /// True when the process exited zero and wrote nothing to stderr.
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0) && self.stderr.trim().is_empty()
    }

    /// True when the command succeeded and produced stdout content.
    pub fn has_output(&self) -> bool {
        !self.stdout.trim().is_empty()
    }

    /// Classified failure for this result, or `Ok(())` on success.
    ///
    /// Nonzero exit with empty stderr still fails, as Generic.
    pub fn into_failure_check(self) -> Result<CommandResult> {
        if self.succeeded() {
            Ok(self)
        } else if self.stderr.trim().is_empty() {
            Err(SvnBridgeError::from_stderr(format!(
                "{} exited with code {:?}",
                self.program, self.exit_code
            )))
        } else {
            Err(SvnBridgeError::from_stderr(self.stderr))
        }
    }
}

/// Run one invocation to completion, capturing stdout and stderr.
///
/// When `progress` is given it is invoked once per stdout line, in order,
/// while the process runs. Returns [`SvnBridgeError::LaunchFailed`] only if
/// the process could not be spawned.
pub fn execute(invocation: &SvnInvocation, progress: Option<ProgressFn>) -> Result<CommandResult> {
    log::debug!("executing: {}", invocation.display_line());

    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .current_dir(&invocation.working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            log::error!("failed to launch '{}': {e}", invocation.program);
            SvnBridgeError::launch_failed(&invocation.program, e)
        })?;

    // Drain stderr on a helper thread so neither pipe can fill and stall
    // the child while we read stdout line by line.
    let mut stderr_pipe = child.stderr.take().expect("stderr was piped");
    let stderr_handle = std::thread::spawn(move || {
        let mut buf = String::new();
        let _ = stderr_pipe.read_to_string(&mut buf);
        buf
    });

    let stdout_pipe = child.stdout.take().expect("stdout was piped");
    let mut stdout = String::new();
    for line in BufReader::new(stdout_pipe).lines() {
        let line = line?;
        if let Some(observer) = progress {
            observer(&line);
        }
        stdout.push_str(&line);
        stdout.push('\n');
    }

    let status = child.wait()?;
    let stderr = stderr_handle.join().unwrap_or_default();

    let result = CommandResult {
        program: invocation.program.clone(),
        args: invocation.args.clone(),
        stdout,
        stderr,
        exit_code: status.code(),
    };
    log::debug!(
        "{} finished with code {:?} ({} stdout bytes)",
        result.program,
        result.exit_code,
        result.stdout.len()
    );
    Ok(result)
}
