use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::{SettingsField, SettingsRecord};

#[derive(Debug, Error)]
pub enum SettingsError {
    /// No settings have been saved yet. Callers treat this as "no defaults".
    #[error("settings file not found at {}", .0.display())]
    Missing(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed settings file: {0}")]
    Format(String),

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: SettingsField, value: String },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl SettingsError {
    pub fn io(
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

/// Durable storage for a single [`SettingsRecord`].
///
/// Implementations serialize their own reads and writes; a store may be
/// shared between threads.
pub trait SettingsStore: Send + Sync {
    /// Lowercase backend identifier, e.g. `"csv"`.
    fn backend_name(&self) -> &'static str;

    /// Full path of the settings file this store reads from.
    fn location(&self) -> PathBuf;

    /// Reads the whole record.
    ///
    /// Fails with [`SettingsError::Missing`] when nothing has been saved yet.
    fn load(&self) -> Result<SettingsRecord, SettingsError>;

    /// Overwrites the stored record in full, creating directories as needed.
    fn write_record(
        &self,
        record: &SettingsRecord,
    ) -> Result<(), SettingsError>;

    /// Writes `record` only if no settings file exists yet. Returns whether it
    /// wrote.
    fn seed(
        &self,
        record: &SettingsRecord,
    ) -> Result<bool, SettingsError> {
        match self.load() {
            Ok(_) => Ok(false),
            Err(SettingsError::Missing(_)) => self.write_record(record).map(|()| true),
            Err(e) => Err(e),
        }
    }

    /// Loads the record, or an empty one when nothing has been saved yet.
    fn load_or_default(&self) -> Result<SettingsRecord, SettingsError> {
        match self.load() {
            Err(SettingsError::Missing(_)) => Ok(SettingsRecord::default()),
            other => other,
        }
    }

    /// Reads a single field formatted for display (see
    /// [`SettingsRecord::field`]). Returns `None` when the field or the whole
    /// file is absent.
    fn read_field(
        &self,
        field: SettingsField,
    ) -> Result<Option<String>, SettingsError> {
        Ok(self.load_or_default()?.field(field))
    }
}
