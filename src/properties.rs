//! `c_cpp_properties.json` model and writer.

use crate::parser::CompileOptionSet;
use crate::standard::ResolvedStandards;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Schema version of the VS Code C/C++ properties file
pub const PROPERTIES_VERSION: u32 = 4;

/// Default configuration name for the host platform, as VS Code names them.
pub fn default_configuration_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "Win32"
    } else if cfg!(target_os = "macos") {
        "Mac"
    } else {
        "Linux"
    }
}

/// Final configuration, built once from the parse and resolve results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    name: String,
    include_paths: Vec<String>,
    defines: Vec<String>,
    compiler_path: String,
    c_standard: String,
    cpp_standard: String,
}

impl ResolvedConfig {
    pub fn new(name: &str, options: CompileOptionSet, standards: &ResolvedStandards) -> Self {
        // BTreeSet iteration is already lexicographic
        Self {
            name: name.to_string(),
            include_paths: options.include_paths.into_iter().collect(),
            defines: options.defines.into_iter().collect(),
            compiler_path: options.compiler_path,
            c_standard: standards.c.clone(),
            cpp_standard: standards.cpp.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn include_paths(&self) -> &[String] {
        &self.include_paths
    }

    pub fn defines(&self) -> &[String] {
        &self.defines
    }

    pub fn compiler_path(&self) -> &str {
        &self.compiler_path
    }

    pub fn c_standard(&self) -> &str {
        &self.c_standard
    }

    pub fn cpp_standard(&self) -> &str {
        &self.cpp_standard
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        let document = PropertiesFile {
            configurations: vec![ConfigurationEntry {
                name: &self.name,
                include_path: &self.include_paths,
                defines: &self.defines,
                compiler_path: &self.compiler_path,
                c_standard: &self.c_standard,
                cpp_standard: &self.cpp_standard,
            }],
            version: PROPERTIES_VERSION,
        };
        serde_json::to_string_pretty(&document).context("Failed to serialize configuration")
    }

    /// Write the JSON document to `path`, creating parent directories.
    ///
    /// The content goes to a temporary file next to `path` which is then
    /// renamed over it, so a failed write leaves any previous file untouched.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.write_all(b"\n"))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tmp.persist(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PropertiesFile<'a> {
    configurations: Vec<ConfigurationEntry<'a>>,
    version: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigurationEntry<'a> {
    name: &'a str,
    include_path: &'a [String],
    defines: &'a [String],
    compiler_path: &'a str,
    c_standard: &'a str,
    cpp_standard: &'a str,
}
