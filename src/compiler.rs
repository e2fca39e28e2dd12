//! Compiler recognition and path resolution.
//!
//! Decides whether the leading token of a dry-run line names a GCC-style
//! compiler driver, and turns that token into the path written to
//! `compilerPath`.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Compiler driver names recognized out of the box
pub const DEFAULT_COMPILERS: &[&str] = &["gcc", "g++", "cc", "c++", "clang", "clang++"];

/// Wrappers and driver helpers whose names end like a compiler but never compile
const NOT_COMPILERS: &[&str] = &[
    "distcc",
    "icecc",
    "cc1",
    "cc1plus",
    "gcc-ar",
    "gcc-nm",
    "gcc-ranlib",
];

static VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d+(\.\d+)*$").expect("valid version suffix pattern"));

/// MinGW thread-model variants shipped by Debian and Ubuntu
const THREAD_MODEL_SUFFIXES: &[&str] = &["-posix", "-win32"];

/// Matches executable names against a list of known compiler drivers.
///
/// A program matches when its basename ends in a known name once an `.exe`
/// extension, a MinGW thread-model suffix (`-posix`, `-win32`) and a numeric
/// version suffix are removed. That covers cross toolchains
/// (`arm-none-eabi-gcc`), MPI wrappers (`mpicc`) and GCC's build-tree `xgcc`.
/// Names in a short deny list (`distcc`, `cc1`, `gcc-ar`, ...) never match.
#[derive(Debug, Clone)]
pub struct CompilerMatcher {
    names: Vec<String>,
}

impl Default for CompilerMatcher {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl CompilerMatcher {
    pub fn new(extra: &[String]) -> Self {
        let mut names: Vec<String> = DEFAULT_COMPILERS.iter().map(|s| s.to_string()).collect();
        for name in extra {
            let name = name.trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        Self { names }
    }

    pub fn is_compiler(&self, program: &str) -> bool {
        let base = basename(program);
        if base.is_empty() {
            return false;
        }

        let base = strip_exe(base);
        let base = THREAD_MODEL_SUFFIXES
            .iter()
            .find_map(|suffix| base.strip_suffix(*suffix))
            .unwrap_or(base);
        let stem = VERSION_SUFFIX.replace(base, "");
        let base: &str = &stem;

        if NOT_COMPILERS.contains(&base) {
            return false;
        }
        self.names.iter().any(|name| base.ends_with(name.as_str()))
    }
}

/// Resolve the leading token of an invocation to the path reported as `compilerPath`.
///
/// Absolute paths are kept verbatim. Anything else is looked up on `PATH`;
/// tokens containing a separator resolve relative to `cwd`. A token that
/// cannot be resolved is returned unchanged.
pub fn resolve_compiler_path(program: &str, cwd: &Path) -> String {
    if Path::new(program).is_absolute() {
        return program.to_string();
    }

    match which::which_in(program, std::env::var_os("PATH"), cwd) {
        Ok(path) => path.to_string_lossy().to_string(),
        Err(_) => program.to_string(),
    }
}

fn basename(program: &str) -> &str {
    program.rsplit(['/', '\\']).next().unwrap_or(program)
}

fn strip_exe(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() > 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".exe") {
        // the suffix is ASCII, so the cut lands on a char boundary
        &name[..name.len() - 4]
    } else {
        name
    }
}
