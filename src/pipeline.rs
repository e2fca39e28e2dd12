//! Parse-then-resolve pipeline shared by the `generate` and `inspect` commands.

use crate::compiler::CompilerMatcher;
use crate::exec::CommandRunner;
use crate::parser::parse_dry_run;
use crate::properties::ResolvedConfig;
use crate::standard::{ProbeAttempt, ProbeSettings, resolve_standards};
use std::path::PathBuf;

/// Inputs to [`extract`] besides the dry-run lines.
#[derive(Debug, Clone)]
pub struct ExtractSettings {
    /// Directory the build runs in; relative include paths resolve against it
    pub project_dir: PathBuf,
    /// Configuration name written to the properties file
    pub name: String,
    pub matcher: CompilerMatcher,
    pub probe: ProbeSettings,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub config: ResolvedConfig,
    /// Lines recognized as compiler invocations; zero means nothing would be built
    pub invocations: usize,
    pub skipped_includes: Vec<String>,
    pub probe_attempts: Vec<ProbeAttempt>,
}

impl Extraction {
    pub fn nothing_built(&self) -> bool {
        self.invocations == 0
    }
}

pub fn extract<S: AsRef<str>>(
    lines: &[S],
    settings: &ExtractSettings,
    runner: &dyn CommandRunner,
) -> Extraction {
    let ctx = parse_dry_run(lines, &settings.matcher, &settings.project_dir);

    let standards = resolve_standards(
        &ctx.standards,
        &ctx.options.compiler_path,
        &settings.matcher,
        &settings.probe,
        runner,
    );

    Extraction {
        config: ResolvedConfig::new(&settings.name, ctx.options, &standards),
        invocations: ctx.invocations,
        skipped_includes: ctx.skipped_includes,
        probe_attempts: standards.attempts,
    }
}
