use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Artifact;

/// The target path cannot be stressed: it does not exist, is not
/// executable, or is a directory with nothing runnable in it.
#[derive(Debug, thiserror::Error)]
pub enum InvalidTarget {
    #[error("File is not executable: {}", .0.display())]
    NotExecutable(PathBuf),
    #[error("No executables found in directory.")]
    NoExecutables,
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Expands a target path into the ordered list of executables to stress.
///
/// A file resolves to itself; a directory resolves to its direct entries
/// that pass the platform executability test, in listing order. Paths are
/// absolutized so reports stay meaningful regardless of the working
/// directory.
pub fn discover(target: &Path) -> Result<Vec<Artifact>, InvalidTarget> {
    if target.is_file() {
        if !is_executable(target) {
            return Err(InvalidTarget::NotExecutable(target.to_path_buf()));
        }
        return Ok(vec![Artifact::new(absolute(target)?)]);
    }

    if target.is_dir() {
        let entries =
            fs::read_dir(target).map_err(|_| InvalidTarget::InvalidPath(target.to_path_buf()))?;
        let mut artifacts = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if is_executable(&path) {
                artifacts.push(Artifact::new(absolute(&path)?));
            }
        }
        if artifacts.is_empty() {
            return Err(InvalidTarget::NoExecutables);
        }
        return Ok(artifacts);
    }

    Err(InvalidTarget::InvalidPath(target.to_path_buf()))
}

fn absolute(path: &Path) -> Result<PathBuf, InvalidTarget> {
    std::path::absolute(path).map_err(|_| InvalidTarget::InvalidPath(path.to_path_buf()))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.is_file()
        && fs::metadata(path)
            .map(|meta| meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
    const RUNNABLE_EXTENSIONS: [&str; 3] = ["exe", "bat", "cmd"];

    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| RUNNABLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("binstress_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).expect("Failed to create scratch dir");
        dir
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, executable: bool) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").expect("Failed to write script");
        let mode = if executable { 0o755 } else { 0o644 };
        fs::set_permissions(&path, fs::Permissions::from_mode(mode))
            .expect("Failed to set permissions");
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_single_executable_file() {
        let dir = scratch_dir();
        let script = write_script(&dir, "runner.sh", true);

        let artifacts = discover(&script).expect("Resolution should succeed");

        assert_eq!(artifacts.len(), 1);
        assert!(artifacts[0].path.is_absolute());
        assert_eq!(artifacts[0].name(), "runner.sh");
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_rejects_non_executable_file() {
        let dir = scratch_dir();
        let script = write_script(&dir, "data.txt", false);

        let result = discover(&script);

        assert!(matches!(result, Err(InvalidTarget::NotExecutable(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_directory_filters_to_executables() {
        let dir = scratch_dir();
        write_script(&dir, "a.sh", true);
        write_script(&dir, "b.sh", true);
        write_script(&dir, "notes.txt", false);
        fs::create_dir(dir.join("subdir")).expect("Failed to create subdir");

        let artifacts = discover(&dir).expect("Resolution should succeed");

        let mut names: Vec<String> = artifacts
            .iter()
            .map(|artifact| artifact.name().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.sh", "b.sh"]);
        assert!(artifacts.iter().all(|artifact| artifact.path.is_absolute()));
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = scratch_dir();

        let result = discover(&dir);

        assert!(matches!(result, Err(InvalidTarget::NoExecutables)));
        assert_eq!(
            result.unwrap_err().to_string(),
            "No executables found in directory."
        );
    }

    #[test]
    fn test_discover_missing_path() {
        let missing = scratch_dir().join("does_not_exist");

        let result = discover(&missing);

        assert!(matches!(result, Err(InvalidTarget::InvalidPath(_))));
    }
}
