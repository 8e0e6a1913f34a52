//! Parallel parsing of many source files with Rayon.
//!
//! Every file is parsed independently. A file that cannot be read or parsed
//! yields an `Unparseable` outcome and the rest of the batch continues.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::ast::{CompilationUnit, SourceId};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser;

/// What parsing a single file produced.
#[derive(Debug)]
pub enum FileOutcome {
    Parsed(CompilationUnit),
    /// Stand-in for a file that failed to read or parse.
    Unparseable(Error),
}

#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl ParsedFile {
    pub fn unit(&self) -> Option<&CompilationUnit> {
        match &self.outcome {
            FileOutcome::Parsed(unit) => Some(unit),
            FileOutcome::Unparseable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match &self.outcome {
            FileOutcome::Parsed(_) => None,
            FileOutcome::Unparseable(err) => Some(err),
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.unit().is_some()
    }
}

/// Read and parse one file; its path becomes the unit's source id.
pub fn parse_file(path: &Path, config: Config) -> Result<CompilationUnit> {
    let source = fs::read_to_string(path)?;
    parser::parse_source_with(&source, config, SourceId::from_path(path)).map_err(|err| Error::in_file(path, err))
}

/// Parse `paths` in parallel, preserving their order in the result.
pub fn parse_files<P: AsRef<Path> + Sync>(paths: &[P], config: Config) -> Vec<ParsedFile> {
    log::debug!("parsing {} files", paths.len());
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let outcome = match parse_file(path, config) {
                Ok(unit) => FileOutcome::Parsed(unit),
                Err(err) => {
                    log::warn!("{}", err);
                    FileOutcome::Unparseable(err)
                }
            };
            ParsedFile { path: path.to_path_buf(), outcome }
        })
        .collect()
}

/// Every `.java` file under `root` (or `root` itself if it is a file), sorted.
pub fn collect_java_files(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "java") {
            files.push(entry.into_path());
        }
    }
    files.sort();
    log::debug!("found {} java files under {}", files.len(), root.display());
    Ok(files)
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub parsed: usize,
    pub unparseable: usize,
}

impl BatchSummary {
    pub fn of(files: &[ParsedFile]) -> Self {
        let parsed = files.iter().filter(|f| f.is_parsed()).count();
        Self { parsed, unparseable: files.len() - parsed }
    }

    pub fn total(&self) -> usize {
        self.parsed + self.unparseable
    }
}
