//! Dry-run output parser.
//!
//! Scans the command trace printed by `make -n`, picks out the lines that
//! invoke a compiler and accumulates their `-I`, `-D` and `-std=` options.
//!
//! ## Example
//!
//! ```rust
//! use mkprops::compiler::CompilerMatcher;
//! use mkprops::parser::parse_dry_run;
//! use std::path::Path;
//!
//! let lines = ["echo building", "gcc -DDEBUG -std=c11 -c main.c"];
//! let ctx = parse_dry_run(lines, &CompilerMatcher::default(), Path::new("."));
//! assert_eq!(ctx.invocations, 1);
//! assert!(ctx.options.defines.contains("DEBUG"));
//! ```

mod directory;
pub mod tokens;

use crate::compiler::{CompilerMatcher, resolve_compiler_path};
use directory::DirectoryStack;
use std::collections::BTreeSet;
use std::path::Path;

/// Include paths, defines and compiler path gathered from all invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptionSet {
    /// Canonical absolute include directories
    pub include_paths: BTreeSet<String>,
    /// `NAME` or `NAME=VALUE`, stored exactly as written
    pub defines: BTreeSet<String>,
    /// Compiler of the last recognized invocation
    pub compiler_path: String,
}

/// `-std=` values seen for each language, in first-seen order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardCandidates {
    pub c: Vec<String>,
    pub cpp: Vec<String>,
}

impl StandardCandidates {
    /// Record a `-std=` value; values containing `++` are C++ standards.
    pub fn add(&mut self, value: &str) {
        let list = if value.contains("++") {
            &mut self.cpp
        } else {
            &mut self.c
        };
        if !list.iter().any(|v| v == value) {
            list.push(value.to_string());
        }
    }

    pub fn first_c(&self) -> Option<&str> {
        self.c.first().map(String::as_str)
    }

    pub fn first_cpp(&self) -> Option<&str> {
        self.cpp.first().map(String::as_str)
    }
}

/// Everything the parser learned from a dry-run trace.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    pub options: CompileOptionSet,
    pub standards: StandardCandidates,
    /// Number of lines recognized as compiler invocations
    pub invocations: usize,
    /// `-I` values dropped because they could not be canonicalized
    pub skipped_includes: Vec<String>,
}

/// Line-by-line parser holding the recursive-make directory state.
pub struct DryRunParser<'a> {
    matcher: &'a CompilerMatcher,
    dirs: DirectoryStack,
}

impl<'a> DryRunParser<'a> {
    pub fn new(matcher: &'a CompilerMatcher, root: &Path) -> Self {
        Self {
            matcher,
            dirs: DirectoryStack::new(root),
        }
    }

    /// Feed one line of dry-run output into `ctx`.
    pub fn parse_line(&mut self, ctx: &mut ParseContext, line: &str) {
        let line = line.trim();
        if line.is_empty() || self.dirs.observe(line) {
            return;
        }

        let (program, rest) = tokens::split_leading(line);
        if !self.matcher.is_compiler(program) {
            return;
        }

        let args = tokens::tokenize(rest);
        if args.iter().any(|a| is_dependency_scan(a)) {
            return;
        }

        ctx.invocations += 1;
        let cwd = self.dirs.current();
        ctx.options.compiler_path = resolve_compiler_path(program, cwd);

        let mut iter = args.iter().peekable();
        while let Some(arg) = iter.next() {
            if let Some(value) = arg.strip_prefix("-I") {
                let Some(value) = flag_value(value, &mut iter) else {
                    continue;
                };
                match cwd.join(&value).canonicalize() {
                    Ok(path) => {
                        ctx.options
                            .include_paths
                            .insert(path.to_string_lossy().to_string());
                    }
                    Err(_) => ctx.skipped_includes.push(value),
                }
            } else if let Some(value) = arg.strip_prefix("-D") {
                if let Some(value) = flag_value(value, &mut iter) {
                    ctx.options.defines.insert(value);
                }
            } else if let Some(value) = arg.strip_prefix("-std=") {
                if !value.is_empty() {
                    ctx.standards.add(value);
                }
            }
        }
    }
}

/// Parse a whole dry-run trace. Relative paths resolve against `root` until a
/// recursive make reports entering another directory.
pub fn parse_dry_run<I, S>(lines: I, matcher: &CompilerMatcher, root: &Path) -> ParseContext
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ctx = ParseContext::default();
    let mut parser = DryRunParser::new(matcher, root);
    for line in lines {
        parser.parse_line(&mut ctx, line.as_ref());
    }
    ctx
}

/// `-M` and `-MM` only emit dependency rules, they never compile.
fn is_dependency_scan(arg: &str) -> bool {
    arg == "-M" || arg == "-MM"
}

/// Value of a `-I`/`-D` flag: glued (`-Idir`) or the next token (`-I dir`).
/// A flag with nothing usable after it yields `None`.
fn flag_value<'t, I>(glued: &str, iter: &mut std::iter::Peekable<I>) -> Option<String>
where
    I: Iterator<Item = &'t String>,
{
    if !glued.is_empty() {
        return Some(glued.to_string());
    }
    match iter.peek() {
        Some(next) if !next.is_empty() && !next.starts_with('-') => iter.next().cloned(),
        _ => None,
    }
}
