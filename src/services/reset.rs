//! Best-effort "Reset Content and Settings".

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// An entry that could not be removed during a reset.
#[derive(Debug)]
pub struct DeletionFailure {
    pub path: Utf8PathBuf,
    pub error: io::Error,
}

/// Outcome of a reset. Failures are collected rather than raised; callers
/// decide whether a partial reset should stop further automation.
#[derive(Debug, Default)]
pub struct ResetReport {
    pub failures: Vec<DeletionFailure>,
    pub recreate_error: Option<io::Error>,
}

impl ResetReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.recreate_error.is_none()
    }
}

fn utf8_lossy(path: &Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf())
        .unwrap_or_else(|p| Utf8PathBuf::from(p.to_string_lossy().into_owned()))
}

/// Symbolic links are removed as links; their targets are never visited.
fn remove_entry(path: &Path, file_type: fs::FileType) -> io::Result<()> {
    if file_type.is_dir() {
        fs::remove_dir(path)
    } else {
        // directory symlinks on Windows need remove_dir
        fs::remove_file(path).or_else(|e| {
            if file_type.is_symlink() {
                fs::remove_dir(path)
            } else {
                Err(e)
            }
        })
    }
}

/// Delete `dir` and everything under it, then recreate it empty.
///
/// Deletion is depth-first and keeps going past failures. Recreation is
/// attempted whatever happened before.
pub fn reset_directory(dir: &Utf8Path) -> ResetReport {
    let mut report = ResetReport::default();

    if fs::symlink_metadata(dir).is_ok() {
        let walker = WalkDir::new(dir)
            .follow_links(false)
            .follow_root_links(false)
            .contents_first(true);

        for entry in walker {
            let outcome = entry
                .map_err(|e| {
                    let path = e.path().map(utf8_lossy).unwrap_or_else(|| dir.to_path_buf());
                    (path, io::Error::other(e))
                })
                .and_then(|entry| {
                    remove_entry(entry.path(), entry.file_type())
                        .map_err(|e| (utf8_lossy(entry.path()), e))
                });

            if let Err((path, error)) = outcome {
                tracing::warn!("Cannot delete {}: {}. Is a simulator still running?", path, error);
                report.failures.push(DeletionFailure { path, error });
            }
        }
    }

    if let Err(e) = fs::create_dir_all(dir) {
        tracing::warn!("Couldn't re-create {}: {}", dir, e);
        report.recreate_error = Some(e);
    }

    report
}
