use std::path::{Path, PathBuf};

use tracing::debug;

/// Directory a report should be written to.
///
/// Uses `configured` when it names an existing directory; otherwise falls back
/// to the current working directory. The check runs on every call so a
/// directory deleted after it was configured is noticed.
pub fn resolve_export_directory(configured: Option<&Path>) -> PathBuf {
    match configured {
        Some(dir) if dir.is_dir() => dir.to_path_buf(),
        other => {
            if let Some(dir) = other {
                debug!(dir = %dir.display(), "export directory missing, using working directory");
            }
            current_dir()
        }
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn uses_configured_directory_when_present() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(resolve_export_directory(Some(dir.path())), dir.path());
    }

    #[test]
    fn falls_back_to_working_directory_when_unset() {
        assert_eq!(
            resolve_export_directory(None),
            std::env::current_dir().unwrap()
        );
    }

    #[test]
    fn falls_back_when_configured_directory_was_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_path_buf();
        dir.close().unwrap();

        assert_eq!(
            resolve_export_directory(Some(&path)),
            std::env::current_dir().unwrap()
        );
    }

    #[test]
    fn falls_back_when_configured_path_is_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();

        assert_eq!(
            resolve_export_directory(Some(file.path())),
            std::env::current_dir().unwrap()
        );
    }
}
