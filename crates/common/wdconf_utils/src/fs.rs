use camino::Utf8Path;
use std::fs as std_fs;
use std::io;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;

/// What happened to a managed file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileUpdate {
    /// The file didn't exist and has been created
    Created,
    /// The file existed with a different content and has been replaced
    Updated,
    /// The file already had the expected content and has not been touched
    Unchanged,
}

impl FileUpdate {
    pub fn is_changed(self) -> bool {
        self != FileUpdate::Unchanged
    }
}

/// Write file to filesystem atomically using std::fs synchronously.
///
/// The content is written to a uniquely named file in the destination directory,
/// then renamed over the destination. The destination keeps its permissions,
/// a new file is created with mode 0o644.
pub fn atomically_write_file_sync(dest: impl AsRef<Path>, content: &[u8]) -> io::Result<()> {
    let dest = dest.as_ref();
    let dest_dir = parent_dir(dest);
    let permissions = match std_fs::metadata(dest) {
        Ok(metadata) => metadata.permissions(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => std_fs::Permissions::from_mode(0o644),
        Err(err) => return Err(err),
    };

    // Write the content on a temp file, removed on drop if anything fails
    let mut file = tempfile::Builder::new()
        .prefix(".wdconf")
        .tempfile_in(&dest_dir)?;
    file.write_all(content)?;

    // Ensure the content reach the disk
    file.flush()?;
    file.as_file().set_permissions(permissions)?;
    file.as_file().sync_all()?;

    // Move the temp file to its destination
    file.persist(dest).map_err(|err| err.error)?;

    // Ensure the new name reach the disk
    let dir = std_fs::File::open(dest_dir)?;
    dir.sync_all()?;

    Ok(())
}

/// Atomically write a file, unless it already has the given content.
///
/// Missing parent directories are created.
pub fn write_file_if_changed(dest: &Utf8Path, content: &str) -> io::Result<FileUpdate> {
    let update = match std_fs::read(dest) {
        Ok(current) if current == content.as_bytes() => {
            tracing::debug!("{dest} is up to date");
            return Ok(FileUpdate::Unchanged);
        }
        Ok(_) => FileUpdate::Updated,
        Err(err) if err.kind() == io::ErrorKind::NotFound => FileUpdate::Created,
        Err(err) => return Err(err),
    };

    if let Some(dir) = dest.parent().filter(|dir| !dir.as_str().is_empty()) {
        std_fs::create_dir_all(dir)?;
    }
    atomically_write_file_sync(dest, content.as_bytes())?;
    tracing::info!("Wrote {dest}");

    Ok(update)
}

/// Remove a file, returning `false` if there was nothing to remove.
pub fn remove_file_if_exists(path: &Utf8Path) -> io::Result<bool> {
    match std_fs::remove_file(path) {
        Ok(()) => {
            tracing::info!("Removed {path}");
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        None => Path::new("/").into(),
        Some(path) if path.as_os_str().is_empty() => Path::new(".").into(),
        Some(dir) => dir.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::tempdir;

    fn utf8(path: PathBuf) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path).unwrap()
    }

    #[test]
    fn atomically_write_file_file_sync() {
        let temp_dir = tempdir().unwrap();
        let destination_path = temp_dir.path().join("watchdog.conf");

        atomically_write_file_sync(&destination_path, b"watchdog-timeout = 60\n").unwrap();

        assert_eq!(
            std_fs::read(&destination_path).unwrap(),
            b"watchdog-timeout = 60\n"
        );
        assert_eq!(std_fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn a_leftover_temp_file_does_not_block_writes() {
        let temp_dir = tempdir().unwrap();
        let dest = utf8(temp_dir.path().join("watchdog.conf"));
        std_fs::write(temp_dir.path().join("watchdog.conf.tmp"), "partial").unwrap();

        assert_eq!(
            write_file_if_changed(&dest, "softdog\n").unwrap(),
            FileUpdate::Created
        );
        assert_eq!(
            write_file_if_changed(&dest, "iTCO_wdt\n").unwrap(),
            FileUpdate::Updated
        );
        assert_eq!(std_fs::read_to_string(&dest).unwrap(), "iTCO_wdt\n");
    }

    #[test]
    fn written_files_are_world_readable() {
        let temp_dir = tempdir().unwrap();
        let dest = temp_dir.path().join("watchdog.conf");

        atomically_write_file_sync(&dest, b"softdog\n").unwrap();

        let mode = std_fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn write_creates_missing_directories() {
        let temp_dir = tempdir().unwrap();
        let dest = utf8(temp_dir.path().join("etc/modules-load.d/watchdog.conf"));

        let update = write_file_if_changed(&dest, "softdog\n").unwrap();

        assert_eq!(update, FileUpdate::Created);
        assert_eq!(std_fs::read_to_string(&dest).unwrap(), "softdog\n");
    }

    #[test]
    fn same_content_is_not_rewritten() {
        let temp_dir = tempdir().unwrap();
        let dest = utf8(temp_dir.path().join("watchdog.conf"));

        assert_eq!(
            write_file_if_changed(&dest, "softdog\n").unwrap(),
            FileUpdate::Created
        );
        assert_eq!(
            write_file_if_changed(&dest, "softdog\n").unwrap(),
            FileUpdate::Unchanged
        );
        assert_eq!(
            write_file_if_changed(&dest, "iTCO_wdt\n").unwrap(),
            FileUpdate::Updated
        );
        assert_eq!(std_fs::read_to_string(&dest).unwrap(), "iTCO_wdt\n");
    }

    #[test]
    fn removing_a_missing_file_is_a_no_op() {
        let temp_dir = tempdir().unwrap();
        let path = utf8(temp_dir.path().join("blacklist.conf"));

        assert!(!remove_file_if_exists(&path).unwrap());

        std_fs::write(&path, "blacklist iTCO_wdt\n").unwrap();
        assert!(remove_file_if_exists(&path).unwrap());
        assert!(!path.exists());
    }
}
