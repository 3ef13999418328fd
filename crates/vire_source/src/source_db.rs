//! Owned source text and span resolution.

use crate::span::{FileId, Span};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// One loaded source file with a precomputed line table.
#[derive(Debug)]
pub struct SourceFile {
    /// Path shown in diagnostics.
    pub path: PathBuf,
    /// Full text.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(path: PathBuf, content: String) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i as u32 + 1),
        );
        Self {
            path,
            content,
            line_starts,
        }
    }

    /// 1-based line and column of a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        (line as u32 + 1, offset - self.line_starts[line] + 1)
    }

    /// Text of a 1-based line without its terminator.
    pub fn line_text(&self, line: u32) -> &str {
        let idx = line.saturating_sub(1) as usize;
        let Some(&start) = self.line_starts.get(idx) else {
            return "";
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&next| next as usize - 1)
            .unwrap_or(self.content.len());
        self.content[start as usize..end].trim_end_matches('\r')
    }
}

/// A span turned into human coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// File path.
    pub file_path: PathBuf,
    /// 1-based line of the first byte.
    pub line: u32,
    /// 1-based column of the first byte.
    pub column: u32,
    /// 1-based column one past the last byte on the first line.
    pub end_column: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path.display(), self.line)
    }
}

/// Every source file of a compilation session.
#[derive(Debug, Default)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a file from disk.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Registers in-memory text under `name`.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(name.into(), content));
        id
    }

    /// Looks up a file; `None` for [`FileId::DUMMY`] or foreign ids.
    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Resolves a span, or `None` when it has no backing file.
    pub fn resolve_span(&self, span: Span) -> Option<ResolvedSpan> {
        let file = self.get_file(span.file)?;
        let (line, column) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.max(span.start));
        let end_column = if end_line == line {
            end_col.max(column + 1)
        } else {
            file.line_text(line).len() as u32 + 1
        };
        Some(ResolvedSpan {
            file_path: file.path.clone(),
            line,
            column,
            end_column,
        })
    }
}
