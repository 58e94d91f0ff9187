//! Resume locator — deterministic lookup of the applicant's resume file.

use std::path::{Path, PathBuf};

use tracing::debug;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// Returns the first `.pdf`/`.docx` file in the configured directory,
/// scanning in filename order so repeated requests pick the same file.
pub fn find_resume(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_resume_extension(path))
        .collect();
    candidates.sort();

    let found = candidates.into_iter().next();
    match &found {
        Some(path) => debug!("resume: using {}", path.display()),
        None => debug!("resume: no pdf/docx found in {}", dir.display()),
    }
    found
}

fn has_resume_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            RESUME_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}
