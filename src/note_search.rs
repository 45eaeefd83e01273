//! Keyword search over a folder of plain-text notes

use std::fs::{self, DirEntry};
use std::io;
use std::path::Path;
use tracing::debug;

use crate::error::NoteSearchError;

/// Names of the note files in `dir` whose content contains `term`, ignoring
/// case. Only files with one of `extensions` are opened. Files that can't be
/// read as UTF-8 text are skipped.
pub fn search_notes(
    dir: &Path,
    term: &str,
    extensions: &[String],
) -> Result<Vec<String>, NoteSearchError> {
    if !dir.is_dir() {
        return Err(NoteSearchError::NotADirectory(dir.to_path_buf()));
    }
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Err(NoteSearchError::EmptyTerm);
    }

    let entries = fs::read_dir(dir).map_err(|source| NoteSearchError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut matches: Vec<String> = entries
        .filter_map(|entry| matching_note(entry, &needle, extensions))
        .collect();
    matches.sort();
    Ok(matches)
}

fn matching_note(
    entry: io::Result<DirEntry>,
    needle: &str,
    extensions: &[String],
) -> Option<String> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            debug!("Skipping unreadable entry: {}", e);
            return None;
        }
    };

    let path = entry.path();
    if !path.is_file() || !has_note_extension(&path, extensions) {
        return None;
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Skipping {}: {}", path.display(), e);
            return None;
        }
    };

    content
        .to_lowercase()
        .contains(needle)
        .then(|| entry.file_name().to_string_lossy().into_owned())
}

fn has_note_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}
