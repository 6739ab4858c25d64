use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::core::backup;
use crate::core::state::AppState;

/// Single-file persistence for the application state. The file uses the
/// backup document format.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state, or a fresh default state if nothing was saved yet.
    pub async fn load(&self) -> anyhow::Result<AppState> {
        if !tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed to access store {:?}", self.path))?
        {
            tracing::debug!(path = %self.path.display(), "no store yet, starting empty");
            return Ok(AppState::default());
        }
        let backup = backup::import_file(&self.path)
            .await
            .with_context(|| format!("Failed to load store {:?}", self.path))?;
        Ok(AppState::from(backup))
    }

    pub fn save(&self, state: &AppState) -> anyhow::Result<()> {
        let json = state.export_json()?;
        backup::write_staged(&self.path, json.as_bytes())
            .with_context(|| format!("Failed to save store {:?}", self.path))?;
        tracing::debug!(path = %self.path.display(), "saved store");
        Ok(())
    }
}
