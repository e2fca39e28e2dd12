//! Project configuration (`mkprops.toml`).
//!
//! Every table and field is optional; command-line flags override what is
//! read here.

use crate::dry_run::BuildCommand;
use crate::standard::{DEFAULT_C_PROBES, DEFAULT_CPP_PROBES, ProbeSettings};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "mkprops.toml";

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(default)]
    pub make: MakeConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub compilers: CompilersConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MakeConfig {
    #[serde(default = "default_make_program")]
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub always_make: bool,
}

impl Default for MakeConfig {
    fn default() -> Self {
        Self {
            program: default_make_program(),
            args: Vec::new(),
            targets: Vec::new(),
            always_make: false,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Relative paths are resolved against the project directory
    pub path: Option<PathBuf>,
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompilersConfig {
    #[serde(default)]
    pub extra: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_c_probes")]
    pub c: Vec<String>,
    #[serde(default = "default_cpp_probes")]
    pub cpp: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            c: default_c_probes(),
            cpp: default_cpp_probes(),
        }
    }
}

impl ProbeConfig {
    pub fn settings(&self) -> ProbeSettings {
        ProbeSettings {
            enabled: self.enabled,
            c: self.c.clone(),
            cpp: self.cpp.clone(),
        }
    }
}

impl ToolConfig {
    pub fn build_command(&self) -> BuildCommand {
        BuildCommand {
            program: PathBuf::from(&self.make.program),
            args: self.make.args.clone(),
            targets: self.make.targets.clone(),
            always_make: self.make.always_make,
        }
    }
}

fn default_make_program() -> String {
    "make".to_string()
}

fn default_true() -> bool {
    true
}

fn default_c_probes() -> Vec<String> {
    DEFAULT_C_PROBES.iter().map(|s| s.to_string()).collect()
}

fn default_cpp_probes() -> Vec<String> {
    DEFAULT_CPP_PROBES.iter().map(|s| s.to_string()).collect()
}

/// Load `mkprops.toml` from `project_dir`, falling back to defaults when absent.
pub fn load_config(project_dir: &Path) -> Result<ToolConfig> {
    let path = project_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ToolConfig::default());
    }

    let config_str = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {} - check file permissions", path.display()))?;
    toml::from_str(&config_str).with_context(|| {
        format!(
            "Failed to parse {} - check for syntax errors or unknown keys",
            path.display()
        )
    })
}
