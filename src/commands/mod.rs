//! CLI command handlers
//!
//! `generate` and `inspect` share the same front half: load the project
//! config, obtain dry-run lines and run the extraction pipeline.

pub mod doctor;
pub mod generate;
pub mod inspect;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::compiler::CompilerMatcher;
use crate::config::{ToolConfig, load_config};
use crate::dry_run::{read_log, run_dry_run};
use crate::exec::CommandRunner;
use crate::pipeline::{ExtractSettings, Extraction, extract};
use crate::properties::default_configuration_name;
use crate::ui;

/// Options common to every command that reads a dry run.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Project directory, `make` runs here
    pub directory: PathBuf,
    /// Saved dry-run log instead of running make (`-` for stdin)
    pub input: Option<PathBuf>,
    /// Build tool override
    pub make: Option<String>,
    pub always_make: bool,
    pub targets: Vec<String>,
    /// Configuration name override
    pub name: Option<String>,
    pub no_probe: bool,
    pub verbose: bool,
}

/// Config file merged with command-line overrides, plus the extraction result.
pub struct Collected {
    pub project_dir: PathBuf,
    pub config: ToolConfig,
    pub extraction: Extraction,
}

pub(crate) fn collect(opts: &SourceOptions, runner: &dyn CommandRunner) -> Result<Collected> {
    let project_dir = opts.directory.canonicalize().with_context(|| {
        format!(
            "Project directory {} does not exist",
            opts.directory.display()
        )
    })?;
    let mut config = load_config(&project_dir)?;
    apply_overrides(&mut config, opts);

    let lines = match &opts.input {
        Some(log) => {
            ui::detail(opts.verbose, &format!("Reading dry run from {}", log.display()));
            read_log(log).with_context(|| format!("Failed to read {}", log.display()))?
        }
        None => {
            let command = config.build_command();
            let pb = ui::spinner(format!("Running {}...", command.display()));
            let result = run_dry_run(&command, &project_dir, runner);
            pb.finish_and_clear();
            result.context("Dry run failed, nothing was written")?
        }
    };
    ui::detail(opts.verbose, &format!("{} lines of dry-run output", lines.len()));

    let settings = ExtractSettings {
        project_dir: project_dir.clone(),
        name: config
            .output
            .name
            .clone()
            .unwrap_or_else(|| default_configuration_name().to_string()),
        matcher: CompilerMatcher::new(&config.compilers.extra),
        probe: config.probe.settings(),
    };
    let extraction = extract(&lines, &settings, runner);
    report(&extraction, opts.verbose);

    Ok(Collected {
        project_dir,
        config,
        extraction,
    })
}

fn apply_overrides(config: &mut ToolConfig, opts: &SourceOptions) {
    if let Some(make) = &opts.make {
        config.make.program = make.clone();
    }
    if opts.always_make {
        config.make.always_make = true;
    }
    if !opts.targets.is_empty() {
        config.make.targets = opts.targets.clone();
    }
    if let Some(name) = &opts.name {
        config.output.name = Some(name.clone());
    }
    if opts.no_probe {
        config.probe.enabled = false;
    }
}

fn report(extraction: &Extraction, verbose: bool) {
    for skipped in &extraction.skipped_includes {
        ui::detail(
            verbose,
            &format!("Skipped include path '{}' (not found)", skipped),
        );
    }
    for attempt in &extraction.probe_attempts {
        let verdict = if attempt.accepted { "accepted" } else { "rejected" };
        ui::detail(
            verbose,
            &format!(
                "Probe {} -std={}: {}",
                attempt.language, attempt.standard, verdict
            ),
        );
    }
}

/// Resolve a possibly relative path against the project directory.
pub(crate) fn project_path(project_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}
