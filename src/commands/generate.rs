//! `mkprops generate`: run the pipeline and write `c_cpp_properties.json`.

use anyhow::Result;
use colored::*;
use std::path::{Path, PathBuf};

use super::{SourceOptions, collect, project_path};
use crate::exec::CommandRunner;
use crate::ui;

pub const DEFAULT_OUTPUT: &str = ".vscode/c_cpp_properties.json";

/// Generate the properties file, returning the path written.
pub fn generate(
    opts: &SourceOptions,
    output: Option<&Path>,
    runner: &dyn CommandRunner,
) -> Result<PathBuf> {
    ui::step("Deriving IntelliSense configuration from make dry run...");

    let collected = collect(opts, runner)?;
    let extraction = &collected.extraction;

    if extraction.nothing_built() {
        ui::warn("Nothing built: no compiler invocations found in the dry run.");
        println!(
            "   {} Targets may be up to date. Try {} or {} first.",
            "💡".yellow(),
            "--always-make".cyan(),
            "make clean".cyan()
        );
    }

    let output = output
        .map(Path::to_path_buf)
        .or_else(|| collected.config.output.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let output = project_path(&collected.project_dir, &output);

    let config = &extraction.config;
    config.write_to(&output)?;

    println!(
        "   {} compiler invocation(s), {} include path(s), {} define(s)",
        extraction.invocations.to_string().bold(),
        config.include_paths().len().to_string().bold(),
        config.defines().len().to_string().bold()
    );
    println!(
        "   cStandard: {}  cppStandard: {}",
        display_standard(config.c_standard()),
        display_standard(config.cpp_standard())
    );
    ui::success(&format!("Wrote {}", output.display()));
    Ok(output)
}

fn display_standard(standard: &str) -> ColoredString {
    if standard.is_empty() {
        "(unknown)".dimmed()
    } else {
        standard.green()
    }
}
