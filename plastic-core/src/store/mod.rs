pub mod factory;
pub mod paths;
pub mod repository;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use paths::resolve_export_directory;
pub use repository::{SettingsError, SettingsStore};
