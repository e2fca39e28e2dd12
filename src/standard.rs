//! C/C++ standard resolution.
//!
//! Standards come from `-std=` flags whenever the build used them. When a
//! language has no flag, the compiler is probed: a tiny source file is compiled
//! with each candidate `-std=` value, newest first, and the first one that
//! compiles is taken.

use crate::compiler::CompilerMatcher;
use crate::exec::CommandRunner;
use crate::parser::StandardCandidates;
use std::fs;
use std::path::Path;

/// Default probe order for C, newest first
pub const DEFAULT_C_PROBES: &[&str] = &["c17", "c11", "c99", "c89"];

/// Default probe order for C++, newest first
pub const DEFAULT_CPP_PROBES: &[&str] = &["c++17", "c++14", "c++11", "c++03", "c++98"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Cpp,
}

impl Language {
    /// Value for the compiler's `-x` option
    fn driver_language(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "c++",
        }
    }

    fn probe_file(self) -> &'static str {
        match self {
            Language::C => "probe.c",
            Language::Cpp => "probe.cpp",
        }
    }

    fn probe_source(self) -> &'static str {
        match self {
            Language::C => "int main(void) { return 0; }\n",
            Language::Cpp => "int main() { return 0; }\n",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::C => write!(f, "C"),
            Language::Cpp => write!(f, "C++"),
        }
    }
}

/// Probe behaviour, usually taken from the `[probe]` config table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    pub enabled: bool,
    pub c: Vec<String>,
    pub cpp: Vec<String>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            c: DEFAULT_C_PROBES.iter().map(|s| s.to_string()).collect(),
            cpp: DEFAULT_CPP_PROBES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One compiler run made while probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeAttempt {
    pub language: Language,
    pub standard: String,
    pub accepted: bool,
}

/// Final standards. An empty string means the standard could not be determined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStandards {
    pub c: String,
    pub cpp: String,
    pub attempts: Vec<ProbeAttempt>,
}

/// Pick the C and C++ standards, probing `compiler` for whichever one the
/// flags left undetermined.
pub fn resolve_standards(
    candidates: &StandardCandidates,
    compiler: &str,
    matcher: &CompilerMatcher,
    settings: &ProbeSettings,
    runner: &dyn CommandRunner,
) -> ResolvedStandards {
    let mut resolved = ResolvedStandards {
        c: candidates.first_c().map(normalize_standard).unwrap_or_default(),
        cpp: candidates
            .first_cpp()
            .map(normalize_standard)
            .unwrap_or_default(),
        attempts: Vec::new(),
    };

    if !resolved.c.is_empty() && !resolved.cpp.is_empty() {
        return resolved;
    }
    if !settings.enabled || !matcher.is_compiler(compiler) {
        return resolved;
    }

    // Dropping the directory removes the probe sources and objects.
    let Ok(scratch) = tempfile::Builder::new().prefix("mkprops-probe-").tempdir() else {
        return resolved;
    };
    let compiler = Path::new(compiler);

    if resolved.c.is_empty() {
        resolved.c = probe_language(
            Language::C,
            &settings.c,
            compiler,
            scratch.path(),
            runner,
            &mut resolved.attempts,
        )
        .unwrap_or_default();
    }
    if resolved.cpp.is_empty() {
        resolved.cpp = probe_language(
            Language::Cpp,
            &settings.cpp,
            compiler,
            scratch.path(),
            runner,
            &mut resolved.attempts,
        )
        .unwrap_or_default();
    }

    resolved
}

fn probe_language(
    language: Language,
    standards: &[String],
    compiler: &Path,
    scratch: &Path,
    runner: &dyn CommandRunner,
    attempts: &mut Vec<ProbeAttempt>,
) -> Option<String> {
    let source = scratch.join(language.probe_file());
    fs::write(&source, language.probe_source()).ok()?;
    let object = scratch.join(format!("{}.o", language.probe_file()));

    for standard in standards {
        let args = vec![
            "-x".to_string(),
            language.driver_language().to_string(),
            format!("-std={}", standard),
            "-c".to_string(),
            source.to_string_lossy().to_string(),
            "-o".to_string(),
            object.to_string_lossy().to_string(),
        ];

        let accepted = matches!(runner.exit_code(compiler, &args, scratch), Ok(Some(0)));
        attempts.push(ProbeAttempt {
            language,
            standard: standard.clone(),
            accepted,
        });
        if accepted {
            return Some(standard.clone());
        }
    }
    None
}

/// Map a `-std=` value to the spelling IntelliSense understands.
///
/// GCC and Clang accept draft names (`c++1z`), ISO names (`iso9899:2011`) and
/// duplicates (`c18`); VS Code only knows the final revision names. Unknown
/// values are returned unchanged.
pub fn normalize_standard(value: &str) -> String {
    let lower = value.trim().to_lowercase();
    let (prefix, rest) = if let Some(rest) = lower.strip_prefix("gnu") {
        ("gnu", rest)
    } else if let Some(rest) = lower.strip_prefix('c') {
        ("c", rest)
    } else {
        return match lower.as_str() {
            "iso9899:1990" | "iso9899:199409" => "c89".to_string(),
            "iso9899:1999" | "iso9899:199x" => "c99".to_string(),
            "iso9899:2011" => "c11".to_string(),
            "iso9899:2017" | "iso9899:2018" => "c17".to_string(),
            "iso9899:2024" => "c23".to_string(),
            _ => value.to_string(),
        };
    };

    let revision = match rest {
        // C revisions
        "89" | "90" => Some("89"),
        "99" | "9x" => Some("99"),
        "11" | "1x" => Some("11"),
        "17" | "18" => Some("17"),
        "23" | "2x" => Some("23"),

        // C++ revisions
        "++98" => Some("++98"),
        "++03" => Some("++03"),
        "++11" | "++0x" => Some("++11"),
        "++14" | "++1y" => Some("++14"),
        "++17" | "++1z" => Some("++17"),
        "++20" | "++2a" => Some("++20"),
        "++23" | "++2b" => Some("++23"),
        "++26" | "++2c" => Some("++26"),
        _ => None,
    };

    match revision {
        Some(revision) => format!("{}{}", prefix, revision),
        None => value.to_string(),
    }
}
