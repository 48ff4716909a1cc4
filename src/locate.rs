use std::collections::HashMap;
use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::diagnostics::{self, Error, Severity};
use crate::modules::ModuleLocator;
use crate::parser::{self, ast::{SourceFile, TypeSpec}};
use crate::span::{FileSet, Span};

/// A package as seen by one resolution: its import path, package-clause
/// name, directory, and every file read from it so far.
#[derive(Debug, Clone)]
pub struct ResolvedModule {
    pub path: String,
    pub name: String,
    pub dir: PathBuf,
    pub files: FileSet,
}

impl ResolvedModule {
    /// `file:line:col` of a span taken from one of this module's files.
    pub fn location(&self, span: Span) -> Option<String> {
        let (path, _) = self.files.get_source(span.file_id)?;
        let (line, col) = self.files.line_col(span)?;
        Some(format!("{}:{line}:{col}", path.display()))
    }
}

/// A file left out of a package scan because it could not be read or parsed.
#[derive(Debug)]
pub struct Skipped {
    pub path: PathBuf,
    pub source: Arc<str>,
    pub reason: SkipReason,
}

#[derive(Debug)]
pub enum SkipReason {
    Read(std::io::Error),
    Parse(Error),
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            SkipReason::Read(e) => write!(f, "skipped {}: {e}", self.path.display()),
            SkipReason::Parse(e) => write!(f, "skipped {}: {e}", self.path.display()),
        }
    }
}

impl Skipped {
    /// Print to stderr, with the offending source line for parse failures.
    pub fn render(&self) {
        match &self.reason {
            SkipReason::Parse(err) => diagnostics::render(
                Severity::Warning,
                &format!("skipped {}", self.path.display()),
                &self.source,
                err,
            ),
            SkipReason::Read(_) => eprintln!("warning: {self}"),
        }
    }
}

/// Incremental scan of one package's files: those already parsed, in file
/// order, and those not read yet.
#[derive(Debug)]
pub(crate) struct PackageScan {
    path: String,
    dir: PathBuf,
    files: FileSet,
    parsed: Vec<SourceFile>,
    pending: VecDeque<PathBuf>,
}

impl PackageScan {
    pub(crate) fn open(locator: &dyn ModuleLocator, path: &str) -> Result<Self, Error> {
        let pkg = locator.locate(path)?;
        Ok(Self {
            path: pkg.import_path,
            dir: pkg.dir,
            files: FileSet::new(),
            parsed: Vec::new(),
            pending: pkg.files.into(),
        })
    }

    /// First type spec named `ident`, reading further files only as needed.
    pub(crate) fn find(
        &mut self,
        ident: &str,
        skipped: &mut Vec<Skipped>,
    ) -> Result<(ResolvedModule, TypeSpec), Error> {
        if let Some(found) = self.search(0, ident) {
            return Ok(found);
        }
        while let Some(file) = self.pending.pop_front() {
            let Some(parsed) = self.read(&file, skipped) else { continue };
            self.parsed.push(parsed);
            if let Some(found) = self.search(self.parsed.len() - 1, ident) {
                return Ok(found);
            }
        }
        Err(Error::symbol_not_found(ident, &self.path))
    }

    fn search(&self, from: usize, ident: &str) -> Option<(ResolvedModule, TypeSpec)> {
        self.parsed[from..].iter().find_map(|file| {
            let spec = file.type_specs().find(|spec| spec.node.name.node == ident)?;
            let module = ResolvedModule {
                path: self.path.clone(),
                name: file.package.node.clone(),
                dir: self.dir.clone(),
                files: self.files.clone(),
            };
            debug!(
                path = %self.path,
                ident,
                package = %file.package.node,
                at = %module.location(spec.span).unwrap_or_default(),
                "found type spec"
            );
            Some((module, spec.node.clone()))
        })
    }

    fn read(&mut self, file: &Path, skipped: &mut Vec<Skipped>) -> Option<SourceFile> {
        let source: Arc<str> = match std::fs::read_to_string(file) {
            Ok(text) => text.into(),
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping unreadable file");
                record(skipped, Skipped { path: file.to_path_buf(), source: Arc::from(""), reason: SkipReason::Read(e) });
                return None;
            }
        };
        let id = self.files.len() as u32;
        match parser::parse_file(&source, id) {
            Ok(parsed) => {
                self.files.add_file(file.to_path_buf(), source);
                Some(parsed)
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping unparsable file");
                record(skipped, Skipped { path: file.to_path_buf(), source, reason: SkipReason::Parse(e) });
                None
            }
        }
    }
}

fn record(skipped: &mut Vec<Skipped>, entry: Skipped) {
    if !skipped.iter().any(|s| s.path == entry.path) {
        skipped.push(entry);
    }
}

/// Package scans kept for the duration of one top-level call, keyed by import path.
#[derive(Debug, Default)]
pub(crate) struct ModuleCache {
    packages: HashMap<String, PackageScan>,
}

impl ModuleCache {
    pub(crate) fn scan(&mut self, locator: &dyn ModuleLocator, path: &str) -> Result<&mut PackageScan, Error> {
        use std::collections::hash_map::Entry;

        match self.packages.entry(path.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(PackageScan::open(locator, path)?)),
        }
    }
}

/// Locate `ident` in the package at `path`, through `cache` when given.
pub(crate) fn type_spec(
    locator: &dyn ModuleLocator,
    cache: Option<&mut ModuleCache>,
    path: &str,
    ident: &str,
    skipped: &mut Vec<Skipped>,
) -> Result<(ResolvedModule, TypeSpec), Error> {
    debug!(path, ident, "locating type spec");
    match cache {
        Some(cache) => cache.scan(locator, path)?.find(ident, skipped),
        None => PackageScan::open(locator, path)?.find(ident, skipped),
    }
}
