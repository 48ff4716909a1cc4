use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Byte-offset span in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub file_id: u32,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end, file_id: 0 }
    }

    pub fn with_file(start: usize, end: usize, file_id: u32) -> Self {
        Self { start, end, file_id }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0, file_id: 0 }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span { start: self.start.min(other.start), end: self.end.max(other.end), file_id: self.file_id }
    }
}

/// A value annotated with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    pub fn dummy(node: T) -> Self {
        Self { node, span: Span::dummy() }
    }
}

/// Position map shared by every file of one package: maps file_id -> (path, source).
///
/// Spans produced while parsing a package all index into the same `FileSet`, so
/// a position taken from any of its files can be mapped back to `file:line:col`.
/// Sources are reference counted; cloning a `FileSet` does not copy text.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: Vec<(PathBuf, Arc<str>)>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: PathBuf, source: impl Into<Arc<str>>) -> u32 {
        let id = self.files.len() as u32;
        self.files.push((path, source.into()));
        id
    }

    pub fn get_source(&self, file_id: u32) -> Option<(&Path, &str)> {
        self.files.get(file_id as usize).map(|(p, s)| (p.as_path(), &**s))
    }

    /// 1-based line and column of the start of `span`.
    pub fn line_col(&self, span: Span) -> Option<(usize, usize)> {
        let (_, source) = self.get_source(span.file_id)?;
        let before = source.get(..span.start)?;
        let line = before.matches('\n').count() + 1;
        let col = before.rfind('\n').map_or(before.len(), |nl| before.len() - nl - 1) + 1;
        Some((line, col))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
