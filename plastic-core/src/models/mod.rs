mod appearance;
mod cost_result;
mod print_job;
mod settings_record;

pub use appearance::{AppearanceMode, ColorTheme};
pub use cost_result::{CostBreakdown, CostResult, RoundedCost};
pub use print_job::{PrintJobInput, RawPrintJob};
pub use settings_record::{SettingsField, SettingsRecord};
