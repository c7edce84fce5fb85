//! Loaded source files, addressed by [`FileId`].
//!
//! The emitter needs the file name and line text for every diagnostic, so
//! the driver registers each file here as it is read. Ids are handed out in
//! registration order; the entry file is registered first.

use std::path::{Path, PathBuf};

use zeus_ir::FileId;

use crate::span_utils::LineOffsetTable;

#[derive(Clone, Debug)]
pub struct SourceFile {
    path: PathBuf,
    content: String,
    lines: LineOffsetTable,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let lines = LineOffsetTable::build(&content);
        SourceFile {
            path: path.into(),
            content,
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path as shown in diagnostics.
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn lines(&self) -> &LineOffsetTable {
        &self.lines
    }
}

#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and return its id.
    pub fn add(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> FileId {
        let index = u32::try_from(self.files.len()).unwrap_or(u32::MAX);
        self.files.push(SourceFile::new(path, content));
        FileId::new(index)
    }

    pub fn get(&self, file: FileId) -> Option<&SourceFile> {
        self.files.get(file.index())
    }

    /// Id of an already registered path.
    pub fn find(&self, path: &Path) -> Option<FileId> {
        self.files
            .iter()
            .position(|f| f.path == path)
            .and_then(|i| u32::try_from(i).ok())
            .map(FileId::new)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| (FileId::new(u32::try_from(i).unwrap_or(u32::MAX)), f))
    }
}
