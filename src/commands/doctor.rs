//! Doctor command handler
//!
//! Handles `mkprops doctor`: reports whether the build tool and the usual
//! compiler drivers can be found, and whether `mkprops.toml` parses.

use anyhow::{Result, bail};
use colored::*;
use std::path::Path;

use crate::compiler::DEFAULT_COMPILERS;
use crate::config::{CONFIG_FILE, load_config};

/// Run the `mkprops doctor` command in `project_dir`
pub fn run_doctor(project_dir: &Path) -> Result<()> {
    println!("{} Running System Doctor...", "🚑".red());
    println!("-------------------------------");

    print!("Checking OS... ");
    println!(
        "{} ({})",
        std::env::consts::OS.green(),
        std::env::consts::ARCH.cyan()
    );

    print!("Checking {}... ", CONFIG_FILE);
    let config = match load_config(project_dir) {
        Ok(config) => {
            if project_dir.join(CONFIG_FILE).exists() {
                println!("{}", "OK".green());
            } else {
                println!("{}", "Not present (using defaults)".yellow());
            }
            config
        }
        Err(e) => {
            println!("{}", "Invalid".red());
            bail!("{} is invalid: {:#}", CONFIG_FILE, e);
        }
    };

    print!("Checking {}... ", config.make.program);
    match which::which(&config.make.program) {
        Ok(path) => println!("{} ({})", "Found".green(), path.display()),
        Err(_) => println!("{}", "Not Found (required unless --input is used)".red()),
    }

    let names = DEFAULT_COMPILERS
        .iter()
        .map(|s| s.to_string())
        .chain(config.compilers.extra.iter().cloned());
    let mut found_any = false;
    for name in names {
        print!("Checking {}... ", name);
        match which::which(&name) {
            Ok(path) => {
                found_any = true;
                println!("{} ({})", "Found".green(), path.display());
            }
            Err(_) => println!("{}", "Not Found".yellow()),
        }
    }
    if !found_any {
        println!(
            "{} No compiler on PATH: standards can only come from -std= flags.",
            "!".yellow()
        );
    }

    Ok(())
}
