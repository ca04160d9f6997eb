//! declgen — generate reference pages and binding scaffolds from C++
//! declaration trees.
//!
//! - **docs**: `declgen docs trees/*.json -o docs/reference -e doc/examples`
//! - **scaffold**: `declgen scaffold trees/foo.json -o src/foo_h5.cpp`

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use declgen::model::Filter;
use declgen::pipeline::{self, DocsConfig, ScaffoldConfig};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "declgen",
    about = "Generate reference pages and h5 binding scaffolds from C++ declaration trees"
)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write one page per class and per function
    Docs {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Directory example files are looked up in
        #[arg(short = 'e', long, default_value = ".")]
        examples: PathBuf,

        /// Output format: rst (default), json
        #[arg(short = 'f', long, default_value = "rst")]
        format: String,
    },
    /// Write h5_write/h5_read functions for every class
    Scaffold {
        #[command(flatten)]
        input: InputArgs,

        /// Output file
        #[arg(short = 'o', long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Declaration tree files, directories or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Only document declarations inside this namespace.
    /// Can be specified multiple times.
    #[arg(short = 'n', long = "namespace")]
    namespaces: Vec<String>,

    /// Only document declarations defined in this file
    /// (default: the file each tree was parsed from)
    #[arg(long)]
    source_file: Option<String>,
}

impl InputArgs {
    fn filter(&self) -> Filter {
        Filter {
            file: self.source_file.clone(),
            namespaces: self.namespaces.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .filter_level(cli.verbose.log_level_filter())
        .init();

    match cli.command {
        Command::Docs {
            input,
            output,
            examples,
            format,
        } => {
            let units = load(&input)?;
            let config = DocsConfig {
                output_dir: output,
                examples_dir: examples,
                filter: input.filter(),
                format,
            };
            let report = pipeline::generate_docs(&units, &config)?;
            log::info!(
                "{} pages written, {} failed",
                report.written.len(),
                report.failed.len()
            );
            // Each failure was already logged as it happened.
            if !report.is_success() {
                std::process::exit(1);
            }
        }
        Command::Scaffold { input, output } => {
            let units = load(&input)?;
            let config = ScaffoldConfig {
                output,
                filter: input.filter(),
            };
            pipeline::generate_scaffold(&units, &config)?;
        }
    }
    Ok(())
}

fn load(input: &InputArgs) -> Result<Vec<declgen::ast::TranslationUnit>> {
    let paths = expand_globs(&input.inputs)?;
    if paths.is_empty() {
        anyhow::bail!("no declaration trees found");
    }
    pipeline::load_units(&paths).context("failed to load declaration trees")
}

/// File extension of declaration tree files.
const TREE_EXTENSION: &str = "json";

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for tree files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for tree files (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|e| e.to_str()) == Some(TREE_EXTENSION) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            log::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directories_yield_json_files_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        let files = expand_globs(&[dir.path().to_string_lossy().to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.json", "b.json"]);
    }

    #[test]
    fn duplicate_inputs_collapse() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.json");
        fs::write(&file, "{}").unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        let files = expand_globs(&[file.to_string_lossy().to_string(), pattern]).unwrap();
        assert_eq!(files, [file]);
    }
}
