//! `mkprops inspect`: show what would be written, without writing it.

use anyhow::Result;
use colored::*;

use super::{SourceOptions, collect};
use crate::exec::CommandRunner;
use crate::properties::ResolvedConfig;
use crate::ui::Table;

pub fn inspect(opts: &SourceOptions, runner: &dyn CommandRunner) -> Result<()> {
    let collected = collect(opts, runner)?;
    let extraction = &collected.extraction;

    println!(
        "{} {} ({} compiler invocation(s))",
        "🔍".cyan(),
        extraction.config.name().bold(),
        extraction.invocations
    );
    summary_table(&extraction.config).print();

    if extraction.nothing_built() {
        println!("{} Nothing built.", "!".yellow());
    }
    Ok(())
}

fn summary_table(config: &ResolvedConfig) -> Table {
    let mut table = Table::new(&["Setting", "Value"]);
    table.add_row(vec![
        "compilerPath".to_string(),
        config.compiler_path().to_string(),
    ]);
    table.add_row(vec![
        "cStandard".to_string(),
        config.c_standard().to_string(),
    ]);
    table.add_row(vec![
        "cppStandard".to_string(),
        config.cpp_standard().to_string(),
    ]);
    for path in config.include_paths() {
        table.add_row(vec!["includePath".to_string(), path.clone()]);
    }
    for define in config.defines() {
        table.add_row(vec!["defines".to_string(), define.clone()]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CompileOptionSet;
    use crate::standard::ResolvedStandards;

    #[test]
    fn test_summary_rows() {
        let mut options = CompileOptionSet::default();
        options.defines.insert("B".to_string());
        options.defines.insert("A=1".to_string());
        options.include_paths.insert("/inc".to_string());
        options.compiler_path = "/usr/bin/cc".to_string();
        let config = ResolvedConfig::new("Linux", options, &ResolvedStandards::default());

        let lines: Vec<String> = summary_table(&config)
            .render(120)
            .into_iter()
            .map(|l| console::strip_ansi_codes(&l).to_string())
            .collect();

        // borders + header + 3 fixed rows + 1 include + 2 defines
        assert_eq!(lines.len(), 3 + 1 + 3 + 1 + 2);
        assert!(lines[3].contains("/usr/bin/cc"));
        assert!(lines[6].contains("/inc"));
        assert!(lines[7].contains("A=1"));
        assert!(lines[8].contains(" B "));
    }
}
