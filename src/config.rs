use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "store.json";
const BACKUP_DIR_NAME: &str = "backups";

pub const DEFAULT_DATA_DIR: &str = ".release-planner";
pub const DEFAULT_PREFIX: &str = "release-planner";

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    data_dir: PathBuf,
    prefix: String,
}

impl Config {
    pub fn new<P: AsRef<Path>>(data_dir: P, prefix: impl Into<String>) -> anyhow::Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            anyhow::bail!("Backup prefix must not be empty");
        }
        if prefix.contains(['/', '\\']) {
            anyhow::bail!("Backup prefix must not contain path separators: {:?}", prefix);
        }
        Ok(Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            prefix,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    /// Where exports go when no output directory is given.
    pub fn backup_dir(&self) -> PathBuf {
        self.data_dir.join(BACKUP_DIR_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}
