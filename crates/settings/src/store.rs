use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::preferences::ShellPreferences;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to read preferences {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse preferences {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize preferences {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write preferences {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to prepare directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn read_preferences(path: &Path) -> Result<ShellPreferences, PreferencesError> {
    let contents = fs::read_to_string(path).map_err(|source| PreferencesError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut data: ShellPreferences =
        serde_json::from_str(&contents).map_err(|source| PreferencesError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    data.sanitize();
    Ok(data)
}

fn ensure_parent(path: &Path) -> Result<(), PreferencesError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| PreferencesError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn to_payload(data: &ShellPreferences, path: &Path) -> Result<String, PreferencesError> {
    serde_json::to_string_pretty(data).map_err(|source| PreferencesError::Serialize {
        path: path.to_path_buf(),
        source,
    })
}

/// 偏好設定檔的載入與儲存。 / Loads and persists [`ShellPreferences`] at one path.
///
/// Saves go through a temporary sibling file that is renamed into place, so
/// a crash never leaves a half-written file behind.
#[derive(Debug)]
pub struct PreferencesStore {
    path: PathBuf,
    data: ShellPreferences,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>, preferences: ShellPreferences) -> Self {
        Self {
            path: path.into(),
            data: preferences,
        }
    }

    /// Loads the file at `path`; a missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no preferences file, using defaults");
            return Ok(Self::new(path, ShellPreferences::default()));
        }
        let data = read_preferences(&path)?;
        tracing::debug!(path = %path.display(), "preferences loaded");
        Ok(Self { path, data })
    }

    pub fn preferences(&self) -> &ShellPreferences {
        &self.data
    }

    pub fn update<F>(&mut self, op: F) -> Result<(), PreferencesError>
    where
        F: FnOnce(&mut ShellPreferences),
    {
        op(&mut self.data);
        self.data.sanitize();
        self.save()
    }

    pub fn overwrite(&mut self, preferences: ShellPreferences) -> Result<(), PreferencesError> {
        self.data = preferences;
        self.data.sanitize();
        self.save()
    }

    pub fn save(&self) -> Result<(), PreferencesError> {
        ensure_parent(&self.path)?;
        let payload = to_payload(&self.data, &self.path)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, payload).map_err(|source| PreferencesError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| PreferencesError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<(), PreferencesError> {
        let path = path.as_ref();
        ensure_parent(path)?;
        let payload = to_payload(&self.data, path)?;
        fs::write(path, payload).map_err(|source| PreferencesError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the current preferences with `source`, keeping a `.bak` copy
    /// of the file being replaced.
    pub fn import_from(&mut self, source: impl AsRef<Path>) -> Result<(), PreferencesError> {
        let data = read_preferences(source.as_ref())?;
        if self.path.exists() {
            let backup = self.path.with_extension("bak");
            fs::copy(&self.path, &backup).map_err(|source| PreferencesError::Write {
                path: backup,
                source,
            })?;
        }
        self.data = data;
        self.save()
    }
}
