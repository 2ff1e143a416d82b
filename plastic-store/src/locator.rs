use std::fs;
use std::path::{Path, PathBuf};

use plastic_core::{SettingsError, StoreConfig};
use tracing::{debug, warn};

use crate::file_store::read_record;
use crate::format::SettingsFormat;

/// Name of the application directory under the platform data directory.
pub const APP_DIR_NAME: &str = "plastictax";

/// Finds the directory that holds the settings file.
///
/// Resolution is two-step and explicit: a directory the caller passes in
/// wins; otherwise the record in the default directory may redirect to
/// another directory; otherwise the default directory is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsLocator {
    default_dir: PathBuf,
}

impl SettingsLocator {
    /// Locator rooted at the platform's local data directory
    /// (`~/.local/share/plastictax`, `%LOCALAPPDATA%\plastictax`, ...), or
    /// `./data` when the platform reports none.
    pub fn platform() -> Self {
        let default_dir = dirs::data_local_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("data"));
        Self { default_dir }
    }

    pub fn new(default_dir: impl Into<PathBuf>) -> Self {
        Self {
            default_dir: default_dir.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        match &config.default_directory {
            Some(dir) => Self::new(dir),
            None => Self::platform(),
        }
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    /// Resolves the settings directory for format `F`.
    ///
    /// May create the default directory; never deletes or truncates anything.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Io`] if the default directory cannot be created.
    pub fn resolve<F: SettingsFormat>(
        &self,
        configured: Option<&Path>,
    ) -> Result<PathBuf, SettingsError> {
        if let Some(dir) = configured {
            if dir.is_dir() {
                debug!(dir = %dir.display(), "using configured settings directory");
                return Ok(dir.to_path_buf());
            }
            warn!(dir = %dir.display(), "configured settings directory does not exist, using default");
        }

        fs::create_dir_all(&self.default_dir)
            .map_err(|e| SettingsError::io(&self.default_dir, e))?;

        if let Some(redirect) = self.redirect::<F>() {
            debug!(dir = %redirect.display(), "following settings directory redirect");
            return Ok(redirect);
        }

        Ok(self.default_dir.clone())
    }

    /// Directory named by the default-location record, if it points somewhere
    /// else that already holds a settings file.
    fn redirect<F: SettingsFormat>(&self) -> Option<PathBuf> {
        let bootstrap = self.default_dir.join(F::FILE_NAME);
        let record = match read_record::<F>(&bootstrap) {
            Ok(record) => record,
            Err(SettingsError::Missing(_)) => return None,
            Err(e) => {
                warn!(error = %e, "cannot read settings redirect");
                return None;
            }
        };

        record
            .settings_directory
            .filter(|dir| dir != &self.default_dir && dir.join(F::FILE_NAME).is_file())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::format::CsvFormat;

    #[test]
    fn configured_directory_wins_when_it_exists() {
        let default = tempfile::tempdir().unwrap();
        let custom = tempfile::tempdir().unwrap();
        let locator = SettingsLocator::new(default.path());

        let dir = locator.resolve::<CsvFormat>(Some(custom.path())).unwrap();

        assert_eq!(dir, custom.path());
    }

    #[test]
    fn missing_configured_directory_falls_back_to_default() {
        let default = tempfile::tempdir().unwrap();
        let locator = SettingsLocator::new(default.path());

        let dir = locator
            .resolve::<CsvFormat>(Some(Path::new("/definitely/not/here")))
            .unwrap();

        assert_eq!(dir, default.path());
    }

    #[test]
    fn default_directory_is_created() {
        let root = tempfile::tempdir().unwrap();
        let default = root.path().join("nested").join(APP_DIR_NAME);
        let locator = SettingsLocator::new(&default);

        let dir = locator.resolve::<CsvFormat>(None).unwrap();

        assert_eq!(dir, default);
        assert!(default.is_dir());
    }

    #[test]
    fn redirect_is_followed_when_target_has_settings() {
        let default = tempfile::tempdir().unwrap();
        let custom = tempfile::tempdir().unwrap();
        let bootstrap = format!(
            "settings_directory\n{}\n",
            custom.path().display()
        );
        fs::write(default.path().join("settings.csv"), bootstrap).unwrap();
        fs::write(custom.path().join("settings.csv"), "default_filament_cost\n20\n").unwrap();

        let dir = SettingsLocator::new(default.path())
            .resolve::<CsvFormat>(None)
            .unwrap();

        assert_eq!(dir, custom.path());
    }

    #[test]
    fn redirect_is_ignored_when_target_has_no_settings() {
        let default = tempfile::tempdir().unwrap();
        let custom = tempfile::tempdir().unwrap();
        let bootstrap = format!(
            "settings_directory\n{}\n",
            custom.path().display()
        );
        fs::write(default.path().join("settings.csv"), bootstrap).unwrap();

        let dir = SettingsLocator::new(default.path())
            .resolve::<CsvFormat>(None)
            .unwrap();

        assert_eq!(dir, default.path());
    }

    #[test]
    fn from_config_honours_default_directory_override() {
        let config = StoreConfig {
            default_directory: Some(PathBuf::from("/tmp/plastic")),
            ..StoreConfig::default()
        };

        assert_eq!(
            SettingsLocator::from_config(&config).default_dir(),
            Path::new("/tmp/plastic")
        );
    }
}
