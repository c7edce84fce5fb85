//! Reading source files and following `#import`s.
//!
//! Files are discovered in waves: the entry file, then every file it
//! imports, then every file those import, and so on. All files of one wave
//! are independent, so with more than one job they are lexed and parsed
//! on the worker pool. File ids are handed out in discovery order, which
//! makes the result the same for any number of jobs.
//!
//! Import paths are relative to the importing file's directory and are
//! normalized lexically, so `lib.zs` and `./dir/../lib.zs` name one file.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use zeus_check::Program;
use zeus_diagnostic::{Diagnostic, SourceMap};
use zeus_ir::{FileId, Module, Span, StringInterner};

use crate::pool::WorkerPool;
use crate::problem::IntoDiagnostic;
use crate::DriverError;

/// A file waiting to be read, with the `#import` that named it.
struct Pending {
    id: FileId,
    path: PathBuf,
    origin: Option<(FileId, Span)>,
}

enum Parsed {
    Ok { content: String, module: Module },
    Failed { content: String, diagnostic: Diagnostic },
    Unreadable(io::Error),
}

fn file_id(index: usize) -> FileId {
    FileId::new(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Read, lex and parse `entry` and everything it imports.
///
/// Every file read is registered in `sources` under the same id it gets in
/// the returned [`Program`], including a file that failed to lex or parse,
/// so the diagnostic can show its source line.
#[tracing::instrument(level = "debug", skip(interner, sources))]
pub fn load_program(
    entry: &Path,
    interner: &Arc<StringInterner>,
    jobs: usize,
    sources: &mut SourceMap,
) -> Result<Program, Diagnostic> {
    let pool = (jobs > 1).then(|| WorkerPool::new(jobs));
    let mut program = Program::new();

    let entry = normalize(entry);
    let mut known: FxHashMap<PathBuf, FileId> = FxHashMap::default();
    known.insert(entry.clone(), FileId::ENTRY);
    let mut discovered = 1;
    let mut wave = vec![Pending {
        id: FileId::ENTRY,
        path: entry,
        origin: None,
    }];

    while !wave.is_empty() {
        tracing::debug!(files = wave.len(), "parse wave");
        let parsed = parse_wave(pool.as_ref(), &wave, interner)
            .map_err(|error| error.into_diagnostic(FileId::ENTRY))?;

        let mut next = Vec::new();
        for (pending, parsed) in wave.into_iter().zip(parsed) {
            let module = match parsed {
                Parsed::Ok { content, module } => {
                    sources.add(&pending.path, content);
                    module
                }
                Parsed::Failed {
                    content,
                    diagnostic,
                } => {
                    sources.add(&pending.path, content);
                    return Err(diagnostic);
                }
                Parsed::Unreadable(source) => return Err(unreadable(pending, source)),
            };

            let id = program.add_file(pending.path.display().to_string(), module);
            let base = pending.path.parent().unwrap_or_else(|| Path::new(""));
            let mut deps = SmallVec::new();
            for import in &program.file(id).module.imports {
                let path = normalize(&base.join(interner.lookup(import.path)));
                let dep = *known.entry(path.clone()).or_insert_with(|| {
                    let dep = file_id(discovered);
                    discovered += 1;
                    next.push(Pending {
                        id: dep,
                        path,
                        origin: Some((id, import.span)),
                    });
                    dep
                });
                deps.push(dep);
            }
            program.file_mut(id).deps = deps;
        }
        wave = next;
    }

    tracing::debug!(files = program.len(), "program loaded");
    Ok(program)
}

fn parse_wave(
    pool: Option<&WorkerPool>,
    wave: &[Pending],
    interner: &Arc<StringInterner>,
) -> Result<Vec<Parsed>, DriverError> {
    match pool {
        Some(pool) if wave.len() > 1 => {
            let interner = Arc::clone(interner);
            let tasks = wave
                .iter()
                .map(|pending| (pending.id, pending.path.clone()))
                .collect();
            pool.map(tasks, move |(id, path)| read_and_parse(id, &path, &interner))
        }
        _ => Ok(wave
            .iter()
            .map(|pending| read_and_parse(pending.id, &pending.path, interner))
            .collect()),
    }
}

fn read_and_parse(id: FileId, path: &Path, interner: &StringInterner) -> Parsed {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => return Parsed::Unreadable(error),
    };
    let module = zeus_lexer::lex(&content)
        .map_err(|error| error.into_diagnostic(id))
        .and_then(|tokens| {
            zeus_parse::parse(&tokens, &content, interner)
                .map_err(|error| error.into_diagnostic(id))
        });
    match module {
        Ok(module) => Parsed::Ok { content, module },
        Err(diagnostic) => Parsed::Failed {
            content,
            diagnostic,
        },
    }
}

/// The entry file is reported on its own; an imported file at the
/// `#import` that named it.
fn unreadable(pending: Pending, source: io::Error) -> Diagnostic {
    match pending.origin {
        None => DriverError::Read {
            path: pending.path,
            source,
        }
        .into_diagnostic(pending.id),
        Some((file, span)) => DriverError::Import {
            path: pending.path,
            source,
        }
        .into_diagnostic(file)
        .with_location(file, span),
    }
}

/// Drop `.` components and fold `..` into the preceding directory.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
