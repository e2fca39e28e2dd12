//! # mkprops - IntelliSense configuration from a make dry run
//!
//! mkprops runs `make -n`, reads the compiler command lines it would execute
//! and writes a VS Code `c_cpp_properties.json` with the include paths,
//! defines, compiler and language standards the build actually uses.
//!
//! ## Quick Start
//!
//! ```bash
//! # In a directory with a Makefile
//! mkprops generate
//!
//! # From a saved log
//! make -n -B > dryrun.log
//! mkprops generate --input dryrun.log
//! ```
//!
//! ## Module Organization
//!
//! - [`parser`] - Dry-run output parsing
//! - [`standard`] - C/C++ standard resolution and compiler probing
//! - [`properties`] - `c_cpp_properties.json` model and writer
//! - [`commands`] - CLI command handlers

/// CLI command handlers.
pub mod commands;

/// Compiler name recognition and path lookup.
pub mod compiler;

/// Configuration file parsing (`mkprops.toml`).
pub mod config;

/// Running the build tool in dry-run mode, or reading a saved trace.
pub mod dry_run;

/// Subprocess execution behind a testable trait.
pub mod exec;

/// Dry-run output parsing.
pub mod parser;

/// Parse and resolve in one step.
pub mod pipeline;

/// `c_cpp_properties.json` output.
pub mod properties;

/// C/C++ standard resolution.
pub mod standard;

/// Terminal UI utilities.
pub mod ui;
