use camino::Utf8Path;
use camino::Utf8PathBuf;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// A temporary directory standing for a configuration directory or a host root.
///
/// The directory is removed when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct TempConfigDir {
    pub temp_dir: Arc<TempDir>,
    current_path: Utf8PathBuf,
}

#[derive(Debug, Clone)]
pub struct TempConfigFile {
    file_path: Utf8PathBuf,
}

impl Default for TempConfigDir {
    fn default() -> Self {
        let temp_dir = if let Ok(dir) = std::env::var("TEMP_DIR_ROOT") {
            TempDir::new_in(dir).unwrap()
        } else {
            TempDir::new().unwrap()
        };
        let current_path = Utf8Path::from_path(temp_dir.path()).unwrap().to_owned();
        TempConfigDir {
            temp_dir: Arc::new(temp_dir),
            current_path,
        }
    }
}

impl TempConfigDir {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sub-directory, created with its parents if missing.
    pub fn dir(&self, directory_name: &str) -> TempConfigDir {
        let path = self.current_path.join(directory_name);
        fs::create_dir_all(&path).unwrap();

        TempConfigDir {
            temp_dir: self.temp_dir.clone(),
            current_path: path,
        }
    }

    /// An empty file, created if missing.
    pub fn file(&self, file_name: &str) -> TempConfigFile {
        let path = self.current_path.join(file_name);

        if !path.exists() {
            let file = fs::File::create(&path).unwrap();
            file.sync_all().unwrap();
        };
        TempConfigFile { file_path: path }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.current_path
    }

    pub fn to_path_buf(&self) -> Utf8PathBuf {
        self.current_path.clone()
    }

    /// Read a file below this directory, `None` if missing.
    pub fn read(&self, relative_path: &str) -> Option<String> {
        fs::read_to_string(self.current_path.join(relative_path)).ok()
    }
}

impl TempConfigFile {
    pub fn with_raw_content(self, content: &str) -> Self {
        fs::write(&self.file_path, content).unwrap();
        self
    }

    pub fn path(&self) -> &Utf8Path {
        &self.file_path
    }
}
