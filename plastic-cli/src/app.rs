//! Application wiring shared by the one-shot commands and the interactive
//! session.

use std::fmt::Write as _;
use std::path::PathBuf;

use plastic_core::store::resolve_export_directory;
use plastic_core::{
    CostBreakdown, CostError, RawPrintJob, SettingsError, SettingsField, SettingsRecord,
    SettingsStore, StoreConfig, StoreRegistry, compute_cost,
};
use plastic_report::{ReportError, export_report};
use plastic_store::{CsvStoreFactory, TomlStoreFactory};
use thiserror::Error;
use tracing::{debug, warn};

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Cost(#[from] CostError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("unknown settings field '{0}'")]
    UnknownField(String),
}

/// Registry with every settings backend this application ships.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(CsvStoreFactory));
    registry.register(Box::new(TomlStoreFactory));
    registry
}

/// Resolves the storage location for `config` and opens the store there.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn SettingsStore>, SettingsError> {
    let store = build_registry().create(config)?;
    debug!(backend = store.backend_name(), path = %store.location().display(), "settings store ready");
    Ok(store)
}

/// A print job where the three values that have saved defaults may be left
/// out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialJob {
    pub filament_cost_per_kg: Option<String>,
    pub print_weight_grams: String,
    pub estimated_print_time_hours: String,
    pub electricity_cost_per_kwh_cents: Option<String>,
    pub printer_power_rating_watts: Option<String>,
}

/// Completes `job` with saved defaults.
///
/// Values the user supplied always win. A value that is neither supplied nor
/// saved is left empty and rejected by the calculator.
pub fn fill_from_defaults(
    job: PartialJob,
    store: &dyn SettingsStore,
) -> Result<RawPrintJob, SettingsError> {
    let needs_defaults = job.filament_cost_per_kg.is_none()
        || job.electricity_cost_per_kwh_cents.is_none()
        || job.printer_power_rating_watts.is_none();
    let defaults = if needs_defaults {
        match store.load() {
            Ok(record) => record,
            Err(SettingsError::Missing(path)) => {
                warn!(path = %path.display(), "no saved defaults yet; set them with `settings save`");
                SettingsRecord::default()
            }
            Err(e) => return Err(e),
        }
    } else {
        SettingsRecord::default()
    };

    let pick = |given: Option<String>, field: SettingsField| {
        given
            .or_else(|| defaults.field(field))
            .unwrap_or_default()
    };

    Ok(RawPrintJob {
        filament_cost_per_kg: pick(job.filament_cost_per_kg, SettingsField::DefaultFilamentCost),
        print_weight_grams: job.print_weight_grams,
        estimated_print_time_hours: job.estimated_print_time_hours,
        electricity_cost_per_kwh_cents: pick(
            job.electricity_cost_per_kwh_cents,
            SettingsField::DefaultElectricityCost,
        ),
        printer_power_rating_watts: pick(
            job.printer_power_rating_watts,
            SettingsField::DefaultPrinterPower,
        ),
    })
}

/// Calculates `raw` and remembers the result in `state`.
///
/// A failed calculation leaves the previous result in place.
pub fn calculate(
    state: &mut AppState,
    raw: &RawPrintJob,
) -> Result<CostBreakdown, CostError> {
    let breakdown = compute_cost(raw)?;
    state.record_calculation(breakdown.clone());
    Ok(breakdown)
}

/// Exports the last calculation to the configured PDF directory.
///
/// The directory is resolved on every call. Unreadable settings fall back to
/// the working directory with a warning.
pub fn export(
    state: &AppState,
    store: &dyn SettingsStore,
) -> Result<PathBuf, AppError> {
    let directory = match store.load_or_default() {
        Ok(record) => record.export_directory(),
        Err(e) => {
            warn!(error = %e, "cannot read export directory from settings");
            resolve_export_directory(None)
        }
    };
    Ok(export_report(state.last_calculation(), &directory)?)
}

/// Looks up a settings field by key or short name.
pub fn parse_field(name: &str) -> Result<SettingsField, AppError> {
    SettingsField::parse(name).ok_or_else(|| AppError::UnknownField(name.to_string()))
}

/// Applies `updates` on top of the saved record and writes the whole record
/// back. Returns the record that was written.
pub fn save_settings(
    store: &dyn SettingsStore,
    updates: &[(SettingsField, String)],
) -> Result<SettingsRecord, SettingsError> {
    let mut record = store.load_or_default()?;
    for (field, value) in updates {
        record.set_field(*field, value)?;
    }
    store.write_record(&record)?;
    Ok(record)
}

/// One `key = value` line per field; unset fields show their effective
/// default in brackets.
pub fn describe_settings(record: &SettingsRecord) -> String {
    let mut out = String::new();
    for field in SettingsField::ALL {
        let value = match (record.field(field), field) {
            (Some(v), _) => v,
            (None, SettingsField::AppearanceMode) => {
                format!("[{}]", record.appearance_mode_or_default().as_str())
            }
            (None, SettingsField::ColorTheme) => {
                format!("[{}]", record.color_theme_or_default().as_str())
            }
            (None, SettingsField::PdfExportDirectory) => {
                format!("[{}]", record.export_directory().display())
            }
            (None, _) => String::new(),
        };
        let _ = writeln!(out, "{} = {}", field.key(), value);
    }
    out
}
