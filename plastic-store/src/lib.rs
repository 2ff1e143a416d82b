//! File-backed settings stores.

mod factory;
mod file_store;
pub mod format;
mod locator;

pub use factory::{CsvStoreFactory, TomlStoreFactory};
pub use file_store::{CsvSettingsStore, FileSettingsStore, TomlSettingsStore};
pub use format::{CsvFormat, SettingsFormat, TomlFormat};
pub use locator::{APP_DIR_NAME, SettingsLocator};
