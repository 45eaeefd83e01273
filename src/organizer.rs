//! Sort a folder's files into category subfolders by extension

use std::collections::BTreeMap;
use std::fs::{self, DirEntry};
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::OrganizeError;

pub const CATCH_ALL: &str = "Other";

/// Extension lookup table. Checked in order, first match wins.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("Images", &["jpg", "jpeg", "png", "gif", "webp"]),
    ("Documents", &["pdf", "docx", "txt", "xlsx"]),
    ("Videos", &["mp4", "mov", "avi"]),
    ("Audio", &["mp3", "flac"]),
    ("Archives", &["zip", "rar", "7z"]),
    ("Code", &["py", "js", "html", "css", "java"]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    pub file: String,
    pub category: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveFailure {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct OrganizeReport {
    pub moved: Vec<MovedFile>,
    pub failures: Vec<MoveFailure>,
}

impl OrganizeReport {
    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }

    pub fn counts_by_category(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for moved in &self.moved {
            *counts.entry(moved.category).or_insert(0) += 1;
        }
        counts
    }
}

pub fn category_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());

    ext.and_then(|ext| {
        CATEGORIES
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map(|(name, _)| *name)
    })
    .unwrap_or(CATCH_ALL)
}

pub fn organize(dir: &Path) -> Result<OrganizeReport, OrganizeError> {
    if !dir.is_dir() {
        return Err(OrganizeError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| OrganizeError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut report = OrganizeReport::default();
    for entry in entries {
        organize_entry(dir, entry, &mut report);
    }

    Ok(report)
}

/// Name recorded for a directory entry that couldn't be read at all.
pub const UNREADABLE_ENTRY: &str = "(unreadable entry)";

fn organize_entry(dir: &Path, entry: io::Result<DirEntry>, report: &mut OrganizeReport) {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            warn!("Failed to read an entry of {}: {}", dir.display(), e);
            report.failures.push(MoveFailure {
                file: UNREADABLE_ENTRY.to_string(),
                reason: e.to_string(),
            });
            return;
        }
    };

    let path = entry.path();
    if path.is_dir() {
        return;
    }

    let file = entry.file_name().to_string_lossy().into_owned();
    let category = category_for(&file);
    let target_dir = dir.join(category);

    let result = fs::create_dir_all(&target_dir)
        .and_then(|_| fs::rename(&path, target_dir.join(entry.file_name())));

    match result {
        Ok(()) => {
            debug!("Moved {} to {}", file, category);
            report.moved.push(MovedFile { file, category });
        }
        Err(e) => {
            warn!("Failed to move {}: {}", file, e);
            report.failures.push(MoveFailure {
                file,
                reason: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_category_lookup() {
        assert_eq!(category_for("a.jpg"), "Images");
        assert_eq!(category_for("Holiday.PNG"), "Images");
        assert_eq!(category_for("notes.txt"), "Documents");
        assert_eq!(category_for("backup.tar.7z"), "Archives");
        assert_eq!(category_for("a.xyz"), CATCH_ALL);
        assert_eq!(category_for("Makefile"), CATCH_ALL);
    }

    #[test]
    fn test_organize_moves_into_categories() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.jpg"), b"img").unwrap();
        fs::write(temp.path().join("a.xyz"), b"???").unwrap();
        fs::create_dir(temp.path().join("projects")).unwrap();

        let report = organize(temp.path()).unwrap();

        assert_eq!(report.moved_count(), 2);
        assert!(report.failures.is_empty());
        assert!(temp.path().join("Images").join("a.jpg").is_file());
        assert!(temp.path().join("Other").join("a.xyz").is_file());
        assert!(!temp.path().join("a.jpg").exists());
        assert!(temp.path().join("projects").is_dir());
        assert!(!temp.path().join("Other").join("projects").exists());
    }

    #[test]
    fn test_organize_counts_by_category() {
        let temp = tempdir().unwrap();
        for name in ["x.mp3", "y.flac", "z.pdf"] {
            fs::write(temp.path().join(name), b"").unwrap();
        }

        let counts = organize(temp.path()).unwrap().counts_by_category();
        assert_eq!(counts.get("Audio"), Some(&2));
        assert_eq!(counts.get("Documents"), Some(&1));
    }

    #[test]
    fn test_organize_rejects_missing_dir() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");

        assert!(matches!(
            organize(&missing),
            Err(OrganizeError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_organize_reports_failure_and_continues() {
        let temp = tempdir().unwrap();
        // A plain file squatting on the catch-all name blocks that folder.
        fs::write(temp.path().join(CATCH_ALL), b"").unwrap();
        fs::write(temp.path().join("a.xyz"), b"???").unwrap();
        fs::write(temp.path().join("b.pdf"), b"doc").unwrap();

        let report = organize(temp.path()).unwrap();

        let mut failed: Vec<&str> = report.failures.iter().map(|f| f.file.as_str()).collect();
        failed.sort();
        assert_eq!(failed, vec![CATCH_ALL, "a.xyz"]);
        assert_eq!(report.moved_count(), 1);
        assert!(temp.path().join("Documents").join("b.pdf").is_file());
        assert!(temp.path().join("a.xyz").is_file());
    }

    #[test]
    fn test_unreadable_entry_is_reported() {
        let temp = tempdir().unwrap();
        let mut report = OrganizeReport::default();

        organize_entry(
            temp.path(),
            Err(io::Error::other("stale handle")),
            &mut report,
        );

        assert_eq!(report.moved_count(), 0);
        assert_eq!(
            report.failures,
            vec![MoveFailure {
                file: UNREADABLE_ENTRY.to_string(),
                reason: "stale handle".to_string(),
            }]
        );
    }
}
