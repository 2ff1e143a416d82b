use plastic_core::store::{StoreConfig, StoreFactory};
use plastic_core::{SettingsError, SettingsStore};

use crate::file_store::{CsvSettingsStore, TomlSettingsStore};
use crate::locator::SettingsLocator;

/// [`StoreFactory`] for the flat CSV file.
///
/// Register this with a [`plastic_core::StoreRegistry`] to make the `"csv"`
/// backend available:
///
/// ```rust,no_run
/// use plastic_core::StoreRegistry;
/// use plastic_store::CsvStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(CsvStoreFactory));
/// ```
pub struct CsvStoreFactory;

impl StoreFactory for CsvStoreFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn SettingsStore>, SettingsError> {
        let locator = SettingsLocator::from_config(config);
        let store = CsvSettingsStore::open(
            self.backend_name(),
            &locator,
            config.settings_directory.as_deref(),
        )?;
        Ok(Box::new(store))
    }
}

/// [`StoreFactory`] for the TOML file.
pub struct TomlStoreFactory;

impl StoreFactory for TomlStoreFactory {
    fn backend_name(&self) -> &'static str {
        "toml"
    }

    fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn SettingsStore>, SettingsError> {
        let locator = SettingsLocator::from_config(config);
        let store = TomlSettingsStore::open(
            self.backend_name(),
            &locator,
            config.settings_directory.as_deref(),
        )?;
        Ok(Box::new(store))
    }
}
