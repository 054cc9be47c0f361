//! Document discovery on disk.
//!
//! Finds candidate document files under a content root. Discovery is
//! deterministic (results are sorted by path before being returned),
//! skips hidden files and directories, and filters by extension.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{Error, Result};

/// Find all candidate document files under `root`, recursively.
///
/// Hidden entries (names starting with `.`) are skipped. The result is
/// sorted by path.
///
/// # Errors
///
/// Returns [`Error::ContentRootMissing`] if `root` does not exist, or an
/// I/O error if a directory cannot be read.
pub fn discover_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::ContentRootMissing {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    visit_dir(root, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

fn visit_dir(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if is_hidden(&path) {
            trace!("Skipping hidden entry {}", path.display());
            continue;
        }

        if path.is_dir() {
            visit_dir(&path, extensions, files)?;
        } else if has_extension(&path, extensions) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn md_extensions() -> Vec<String> {
        vec!["md".to_string(), "markdown".to_string()]
    }

    #[test]
    fn test_discover_files_flat() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("one.md"), "x").unwrap();
        std::fs::write(temp.path().join("two.md"), "x").unwrap();
        std::fs::write(temp.path().join("skip.txt"), "x").unwrap();

        let files = discover_files(temp.path(), &md_extensions()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_discover_files_nested() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("root.md"), "x").unwrap();
        let posts = temp.path().join("posts");
        std::fs::create_dir(&posts).unwrap();
        std::fs::write(posts.join("nested.md"), "x").unwrap();

        let files = discover_files(temp.path(), &md_extensions()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_discover_files_sorted() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("zebra.md"), "x").unwrap();
        std::fs::write(temp.path().join("alpha.md"), "x").unwrap();

        let files = discover_files(temp.path(), &md_extensions()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["alpha.md", "zebra.md"]);
    }

    #[test]
    fn test_discover_files_skips_hidden() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("visible.md"), "x").unwrap();
        std::fs::write(temp.path().join(".hidden.md"), "x").unwrap();
        let hidden_dir = temp.path().join(".git");
        std::fs::create_dir(&hidden_dir).unwrap();
        std::fs::write(hidden_dir.join("inside.md"), "x").unwrap();

        let files = discover_files(temp.path(), &md_extensions()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_discover_files_extension_case_insensitive() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("upper.MD"), "x").unwrap();

        let files = discover_files(temp.path(), &md_extensions()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_discover_files_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let result = discover_files(&missing, &md_extensions());
        assert!(matches!(result, Err(Error::ContentRootMissing { .. })));
    }

    #[test]
    fn test_discover_files_empty_root() {
        let temp = TempDir::new().unwrap();
        let files = discover_files(temp.path(), &md_extensions()).unwrap();
        assert!(files.is_empty());
    }
}
