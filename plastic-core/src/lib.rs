pub mod calculations;
pub mod models;
pub mod store;

pub use calculations::{CostCalculator, CostError, compute_cost};
pub use models::*;
pub use store::{SettingsError, SettingsStore, StoreConfig, StoreRegistry};
