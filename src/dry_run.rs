//! Obtaining the dry-run command trace.
//!
//! Lines either come from running the build tool in no-execute mode
//! (`make -n`) or from a previously saved log.

use crate::exec::CommandRunner;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// How to invoke the build tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub targets: Vec<String>,
    /// Pass `-B` so targets that are up to date are still printed
    pub always_make: bool,
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self {
            program: PathBuf::from("make"),
            args: Vec::new(),
            targets: Vec::new(),
            always_make: false,
        }
    }
}

impl BuildCommand {
    /// Full argument list, dry-run flag first.
    pub fn arguments(&self) -> Vec<String> {
        let mut args = vec!["-n".to_string()];
        if self.always_make {
            args.push("-B".to_string());
        }
        args.extend(self.args.iter().cloned());
        args.extend(self.targets.iter().cloned());
        args
    }

    /// Human readable command line for progress output
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.arguments());
        parts.join(" ")
    }
}

/// Failures that abort the run before anything is written.
#[derive(Debug)]
pub enum DryRunError {
    /// The build tool could not be started
    Spawn { program: String, source: io::Error },
    /// The build tool exited unsuccessfully
    Failed { code: Option<i32>, stderr: String },
    /// The dry run printed nothing
    EmptyOutput,
    /// A saved log could not be read
    Io(io::Error),
}

impl std::fmt::Display for DryRunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DryRunError::Spawn { program, source } => {
                write!(f, "Failed to run '{}': {}", program, source)
            }
            DryRunError::Failed { code, stderr } => {
                match code {
                    Some(code) => write!(f, "Dry run failed with exit code {}", code)?,
                    None => write!(f, "Dry run was terminated by a signal")?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, "\n{}", stderr)?;
                }
                Ok(())
            }
            DryRunError::EmptyOutput => write!(f, "Dry run produced no output"),
            DryRunError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for DryRunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DryRunError::Spawn { source, .. } => Some(source),
            DryRunError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DryRunError {
    fn from(e: io::Error) -> Self {
        DryRunError::Io(e)
    }
}

/// Run the build tool in `dir` and return its dry-run output lines.
pub fn run_dry_run(
    command: &BuildCommand,
    dir: &Path,
    runner: &dyn CommandRunner,
) -> Result<Vec<String>, DryRunError> {
    let output = runner
        .capture(&command.program, &command.arguments(), dir)
        .map_err(|source| DryRunError::Spawn {
            program: command.program.display().to_string(),
            source,
        })?;

    if !output.success() {
        return Err(DryRunError::Failed {
            code: output.code,
            stderr: output.stderr,
        });
    }

    into_lines(&output.stdout)
}

/// Read dry-run lines from a saved log, `-` meaning stdin.
pub fn read_log(path: &Path) -> Result<Vec<String>, DryRunError> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let bytes = std::fs::read(path)?;
        String::from_utf8_lossy(&bytes).to_string()
    };
    into_lines(&content)
}

fn into_lines(text: &str) -> Result<Vec<String>, DryRunError> {
    if text.trim().is_empty() {
        return Err(DryRunError::EmptyOutput);
    }
    Ok(text.lines().map(|l| l.to_string()).collect())
}
