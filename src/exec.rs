//! Subprocess execution.
//!
//! Every external program (the build tool and compiler probes) is launched
//! through [`CommandRunner`] so the parser pipeline and the standard resolver
//! can be tested against fake results instead of a real toolchain.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Result of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run external programs synchronously.
pub trait CommandRunner {
    /// Run `program` in `cwd` and capture stdout and stderr.
    fn capture(&self, program: &Path, args: &[String], cwd: &Path) -> io::Result<ProcessOutput>;

    /// Run `program` in `cwd` with all output discarded, returning only its exit code.
    fn exit_code(&self, program: &Path, args: &[String], cwd: &Path) -> io::Result<Option<i32>>;
}

/// Runs real processes with `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(&self, program: &Path, args: &[String], cwd: &Path) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn exit_code(&self, program: &Path, args: &[String], cwd: &Path) -> io::Result<Option<i32>> {
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.code())
    }
}
