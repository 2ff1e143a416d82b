use std::collections::HashMap;
use std::path::PathBuf;

use super::repository::{SettingsError, SettingsStore};

/// Backend-agnostic settings configuration.
///
/// `backend` must match the [`StoreFactory::backend_name`] of a registered
/// factory.
///
/// | backend | file            |
/// |---------|-----------------|
/// | `csv`   | `settings.csv`  |
/// | `toml`  | `settings.toml` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"csv"`).
    pub backend: String,
    /// Directory the user explicitly chose for the settings file. Ignored
    /// when it does not exist.
    pub settings_directory: Option<PathBuf>,
    /// Overrides the platform default location. `None` means "use the
    /// platform's local data directory".
    pub default_directory: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "csv".to_string(),
            settings_directory: None,
            default_directory: None,
        }
    }
}

/// One implementation per storage backend.  Each backend exports a unit
/// struct that implements this trait and is registered with a
/// [`StoreRegistry`] at startup.
pub trait StoreFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Resolve the storage location and return a ready-to-use store.
    fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn SettingsStore>, SettingsError>;
}

/// Registry of [`StoreFactory`] instances, keyed by backend name.
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// If a factory with the same [`StoreFactory::backend_name`] is
    /// already present it is silently replaced.
    pub fn register(
        &mut self,
        factory: Box<dyn StoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend` and return
    /// the store it produces.
    ///
    /// # Errors
    /// * [`SettingsError::Configuration`] if no factory is registered for
    ///   the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn SettingsStore>, SettingsError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                SettingsError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config)
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}
