//! # mkprops CLI Entry Point
//!
//! Parses CLI arguments using clap and routes commands to the handlers in
//! [`mkprops::commands`].

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use mkprops::commands::{self, SourceOptions};
use mkprops::exec::SystemRunner;

#[derive(Parser)]
#[command(name = "mkprops")]
#[command(
    about = "Generate VS Code c_cpp_properties.json from a make dry run",
    version = env!("CARGO_PKG_VERSION")
)]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dry run and write c_cpp_properties.json
    Generate {
        #[command(flatten)]
        source: SourceArgs,
        /// Output file [default: .vscode/c_cpp_properties.json]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the extracted configuration without writing it
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Check that make and a compiler are available
    Doctor {
        /// Project directory
        #[arg(short = 'C', long, default_value = ".")]
        directory: PathBuf,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

#[derive(Args)]
struct SourceArgs {
    /// Project directory (where make runs)
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,
    /// Read the dry-run output from a file instead of running make (`-` for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Build tool to run [default: make]
    #[arg(long)]
    make: Option<String>,
    /// Pass -B to make so up-to-date targets are printed too
    #[arg(short = 'B', long)]
    always_make: bool,
    /// Configuration name [default: Linux, Mac or Win32]
    #[arg(long)]
    name: Option<String>,
    /// Never compile test programs to detect the language standard
    #[arg(long)]
    no_probe: bool,
    /// Show skipped include paths and probe results
    #[arg(short, long)]
    verbose: bool,
    /// Make targets
    targets: Vec<String>,
}

impl From<SourceArgs> for SourceOptions {
    fn from(args: SourceArgs) -> Self {
        SourceOptions {
            directory: args.directory,
            input: args.input,
            make: args.make,
            always_make: args.always_make,
            targets: args.targets,
            name: args.name,
            no_probe: args.no_probe,
            verbose: args.verbose,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { source, output } => {
            commands::generate::generate(&source.into(), output.as_deref(), &SystemRunner)?;
            Ok(())
        }
        Commands::Inspect { source } => commands::inspect::inspect(&source.into(), &SystemRunner),
        Commands::Doctor { directory } => commands::doctor::run_doctor(&directory),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}
