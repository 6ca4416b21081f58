use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;
use tracing::debug;

/// Write `data` to `path`, creating missing parent directories.
///
/// A "not found" failure creates the parent chain and retries the write
/// once. Any other error, or a second failure, is returned as is.
pub fn create_file(data: &str, path: &Path) -> io::Result<()> {
    match fs::write(path, data) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if let Some(parent) = path.parent() {
                debug!(dir = %parent.display(), "creating missing directories");
                fs::create_dir_all(parent)?;
            }
            fs::write(path, data)
        }
        result => result,
    }
}

/// Whether anything exists at `path`. Errors other than "not found" propagate.
pub fn is_file_exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_create_file_in_existing_directory() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.md");

        create_file("# Bonjour\n", &path)?;

        assert_eq!(fs::read_to_string(&path)?, "# Bonjour\n");
        Ok(())
    }

    #[test]
    fn test_create_file_creates_nested_directories() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("i18n/fr/docs/guide.mdx");

        create_file("contenu", &path)?;

        assert_eq!(fs::read(&path)?, b"contenu");
        Ok(())
    }

    #[test]
    fn test_create_file_overwrites() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.md");

        create_file("first", &path)?;
        create_file("second", &path)?;

        assert_eq!(fs::read_to_string(&path)?, "second");
        Ok(())
    }

    #[test]
    fn test_create_file_propagates_other_errors() -> Result<()> {
        let dir = tempdir()?;
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory")?;

        let err = create_file("x", &blocker.join("out.md")).unwrap_err();

        assert_ne!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }

    #[test]
    fn test_is_file_exists_before_and_after_write() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("a/b/c.md");

        assert!(!is_file_exists(&path)?);
        create_file("hello", &path)?;
        assert!(is_file_exists(&path)?);
        assert!(is_file_exists(dir.path())?);
        Ok(())
    }

    #[test]
    fn test_is_file_exists_propagates_other_errors() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("plain.md");
        fs::write(&file, "not a directory")?;

        let err = is_file_exists(&file.join("child.md")).unwrap_err();

        assert_ne!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_create_file_retries_once_then_returns_error() -> Result<()> {
        let dir = tempdir()?;
        // The parent exists, but the link points into a directory that does not.
        let link = dir.path().join("out.md");
        std::os::unix::fs::symlink(dir.path().join("missing/target.md"), &link)?;

        let err = create_file("x", &link).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!dir.path().join("missing").exists());
        Ok(())
    }
}
