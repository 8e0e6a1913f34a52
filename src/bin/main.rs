use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jast::ast::{dump_tree, SourceId, SourcePrinter};
use jast::batch::{self, BatchSummary};
use jast::config::{Config, LanguageLevel};
use jast::parser::{self, tokenize};

#[derive(Parser)]
#[command(name = "jast")]
#[command(about = "Java source parser")]
#[command(version)]
struct Cli {
    /// Java language level, e.g. 8, 17 or 21 (overrides JAST_LANGUAGE_LEVEL)
    #[arg(long, global = true, value_name = "N")]
    level: Option<LanguageLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a Java file
    Lex {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show token locations
        #[arg(short, long)]
        locations: bool,
    },

    /// Parse a Java file and show the result
    Parse {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the node tree with kinds and positions
        #[arg(long, conflicts_with = "print")]
        tree: bool,

        /// Pretty-print the parsed source
        #[arg(long)]
        print: bool,
    },

    /// Parse every Java file under the given paths and report failures
    Check {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(level) = cli.level {
        config = config.with_language_level(level);
    }
    log::debug!("language level {}", config.language_level);

    match &cli.command {
        Commands::Lex { input, locations } => lex_file(input, *locations)?,
        Commands::Parse { input, tree, print } => parse_file(input, config, *tree, *print)?,
        Commands::Check { paths } => return check(paths, config),
    }

    Ok(ExitCode::SUCCESS)
}

fn lex_file(input: &Path, locations: bool) -> Result<()> {
    let source = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let tokens = tokenize(&source).map_err(|e| anyhow::anyhow!("Lexical error: {}", e))?;

    for token in tokens {
        if locations {
            println!("{:?} at {}", token.kind, token.location());
        } else {
            println!("{:?}: '{}'", token.kind, token.lexeme);
        }
    }

    Ok(())
}

fn parse_file(input: &Path, config: Config, tree: bool, print: bool) -> Result<()> {
    let source = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let unit = parser::parse_source_with(&source, config, SourceId::from_path(input))
        .with_context(|| format!("parsing {}", input.display()))?;

    if tree {
        print!("{}", dump_tree(unit.as_node()));
    } else if print {
        print!("{}", SourcePrinter::new().print_unit(&unit));
    } else {
        println!(
            "{}: {} imports, {} type declarations{}",
            input.display(),
            unit.imports.len(),
            unit.types.len(),
            if unit.is_module_info() { ", module declaration" } else { "" }
        );
    }

    Ok(())
}

fn check(paths: &[PathBuf], config: Config) -> Result<ExitCode> {
    let mut files = Vec::new();
    for path in paths {
        files.extend(batch::collect_java_files(path)?);
    }
    let results = batch::parse_files(&files, config);

    for file in &results {
        if let Some(err) = file.error() {
            eprintln!("{}", err);
        }
    }

    let summary = BatchSummary::of(&results);
    println!("{} files: {} parsed, {} unparseable", summary.total(), summary.parsed, summary.unparseable);

    Ok(if summary.unparseable == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
