//! Command invocation records for the external svn client.
//!
//! An [`SvnInvocation`] captures everything needed to run one client
//! command: program name, argument vector, and working directory. Arguments
//! are passed argv-style through `std::process::Command`, so no shell
//! quoting is involved; the only escaping that affects correctness is the
//! peg-revision rule handled by [`escape_target`].

use std::path::{Path, PathBuf};

/// One external command, built up before execution and discarded after.
#[derive(Debug, Clone, PartialEq)]
pub struct SvnInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl SvnInvocation {
    /// Start an invocation for a subcommand like "status" or "commit".
    pub fn new(program: &str, subcommand: &str, working_dir: &Path) -> Self {
        SvnInvocation {
            program: program.to_string(),
            args: vec![
                subcommand.to_string(),
                // Suppress interactive prompts; the engine has no terminal.
                "--non-interactive".to_string(),
            ],
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// Append a literal argument (a switch or a non-path operand).
    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Append an argument only when the flag is set.
    pub fn arg_if(self, condition: bool, arg: &str) -> Self {
        if condition {
            self.arg(arg)
        } else {
            self
        }
    }

    /// Append asset path targets, applying peg-revision escaping to each.
    pub fn targets<S: AsRef<str>>(mut self, paths: &[S]) -> Self {
        for path in paths {
            self.args.push(escape_target(path.as_ref()));
        }
        self
    }

    /// Single-line rendering for logs.
    pub fn display_line(&self) -> String {
        format!("{} {}", self.program, self.args.join(" "))
    }
}

/// Escape a target path for the svn command line.
///
/// A path containing '@' would be read as a peg-revision specifier; a
/// trailing '@' terminates the target and resolves the ambiguity.
pub fn escape_target(path: &str) -> String {
    if path.contains('@') {
        format!("{path}@")
    } else {
        path.to_string()
    }
}
