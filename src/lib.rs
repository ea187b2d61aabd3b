pub mod cli;
pub mod error;
pub mod fence;
mod splice;

use log::info;

use std::{fs, io::Write, path::Path};
use tempfile::NamedTempFile;

pub use error::{Error, MarkerKind, Result};
pub use fence::{Fence, TargetRegion, END_MARKER, START_MARKER};
pub use splice::{lines, replace_block};

/// Document updated by the `helpsplice` binary, relative to the working directory.
pub const README_PATH: &str = "README.md";

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces `path` with `contents` through a temporary file in the same
/// directory, so a failed write never leaves a truncated document behind.
/// Symlinks are followed, so the file they point to is the one replaced.
/// The document keeps its permissions.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_failure = |source: std::io::Error| Error::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let target = fs::canonicalize(path).map_err(write_failure)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(&target).map_err(write_failure)?.permissions();

    let mut temp = NamedTempFile::new_in(dir).map_err(write_failure)?;
    temp.write_all(contents.as_bytes()).map_err(write_failure)?;
    temp.as_file().sync_all().map_err(write_failure)?;
    fs::set_permissions(temp.path(), permissions).map_err(write_failure)?;

    temp.persist(&target).map_err(|err| write_failure(err.error))?;
    Ok(())
}

/// Splices `replacement` into the fenced block of the document at
/// `document_path` and rewrites the document. The document is left
/// untouched when its markers cannot be found.
pub fn update_document(document_path: &Path, replacement: &str, fence: &Fence) -> Result<()> {
    let document = read_text(document_path)?;
    let updated = replace_block(&document, replacement, fence)?;

    write_atomic(document_path, &updated)?;

    info!(
        "Updated {} with {} line(s) of help text",
        document_path.display(),
        lines(replacement).len()
    );
    Ok(())
}

/// Replaces the ```` ```text ```` block of `README.md` in the working
/// directory with the contents of `help_path`.
pub fn update_readme(help_path: &Path) -> Result<()> {
    let help = read_text(help_path)?;
    update_document(Path::new(README_PATH), &help, &Fence::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const README: &str = "# Title\n```text\nold help\n```\nend\n";

    #[test]
    fn updates_document_in_place() {
        let dir = tempdir().unwrap();
        let readme = dir.path().join("README.md");
        fs::write(&readme, README).unwrap();

        update_document(&readme, "new help\n", &Fence::default()).unwrap();

        assert_eq!(fs::read_to_string(&readme).unwrap(), "# Title\n```text\nnew help\n```\nend\n");
        // temp file was renamed, nothing left over
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_marker_leaves_document_untouched() {
        let dir = tempdir().unwrap();
        let readme = dir.path().join("README.md");
        fs::write(&readme, "# Title\n```text\nno end\n").unwrap();

        let err = update_document(&readme, "new help\n", &Fence::default()).unwrap_err();

        assert!(matches!(err, Error::MarkerNotFound { kind: MarkerKind::End, .. }));
        assert_eq!(fs::read_to_string(&readme).unwrap(), "# Title\n```text\nno end\n");
    }

    #[test]
    fn missing_document() {
        let dir = tempdir().unwrap();
        let err = update_document(&dir.path().join("README.md"), "x\n", &Fence::default()).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn read_text_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("help.txt");
        let err = read_text(&path).unwrap_err();
        assert!(err.to_string().contains("help.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let readme = dir.path().join("README.md");
        fs::write(&readme, README).unwrap();
        fs::set_permissions(&readme, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&readme, "replaced\n").unwrap();

        let mode = fs::metadata(&readme).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(fs::read_to_string(&readme).unwrap(), "replaced\n");
    }

    #[cfg(unix)]
    #[test]
    fn write_follows_symlink() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        let real = dir.path().join("docs").join("README.md");
        fs::write(&real, "```text\nold\n```\n").unwrap();
        let link = dir.path().join("README.md");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        update_document(&link, "new\n", &Fence::default()).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "```text\nnew\n```\n");
    }

    #[cfg(unix)]
    #[test]
    fn failed_write_keeps_document() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir(&docs).unwrap();
        let readme = docs.join("README.md");
        fs::write(&readme, README).unwrap();
        fs::set_permissions(&docs, fs::Permissions::from_mode(0o555)).unwrap();

        // privileged users can still create files in a read-only directory
        if fs::write(docs.join("writable"), "").is_ok() {
            fs::set_permissions(&docs, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = update_document(&readme, "new help\n", &Fence::default());
        fs::set_permissions(&docs, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(Error::WriteFailure { .. })));
        assert_eq!(fs::read_to_string(&readme).unwrap(), README);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("README.md");
        let err = write_atomic(&path, "x\n").unwrap_err();
        assert!(matches!(err, Error::WriteFailure { .. }));
    }
}
