//! On-disk encodings of a [`SettingsRecord`].
//!
//! ## CSV
//!
//! One header line followed by one data line. Columns are matched by header
//! name, so files written by older versions with fewer columns still load;
//! missing columns and empty cells read as absent.
//!
//! ```csv
//! default_filament_cost,default_electricity_cost,default_printer_power,appearance_mode,color_theme,pdf_export_directory,settings_directory
//! 25.00,12.0,300.0,Dark,Blue,,
//! ```
//!
//! Values containing commas are quoted on write.
//!
//! ## TOML
//!
//! The same fields as a flat key-value table; absent fields are omitted.

use std::fmt::Display;

use plastic_core::{SettingsError, SettingsField, SettingsRecord};
use tracing::debug;

/// An encoding for the settings file.
pub trait SettingsFormat {
    /// File name inside the settings directory.
    const FILE_NAME: &'static str;

    fn decode(text: &str) -> Result<SettingsRecord, SettingsError>;

    fn encode(record: &SettingsRecord) -> Result<String, SettingsError>;
}

fn format_error(err: impl Display) -> SettingsError {
    SettingsError::Format(err.to_string())
}

/// Header line plus one data line, comma separated.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormat;

impl SettingsFormat for CsvFormat {
    const FILE_NAME: &'static str = "settings.csv";

    fn decode(text: &str) -> Result<SettingsRecord, SettingsError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true) // older files may have short rows
            .from_reader(text.as_bytes());

        let headers = reader.headers().map_err(format_error)?.clone();
        let mut record = SettingsRecord::default();

        let Some(row) = reader.records().next().transpose().map_err(format_error)? else {
            return Ok(record);
        };

        for (idx, name) in headers.iter().enumerate() {
            let Some(field) = SettingsField::parse(name) else {
                debug!(column = name, "ignoring unknown settings column");
                continue;
            };
            if let Some(value) = row.get(idx) {
                record.load_field(field, value)?;
            }
        }

        Ok(record)
    }

    fn encode(record: &SettingsRecord) -> Result<String, SettingsError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(SettingsField::ALL.iter().map(|f| f.key()))
            .map_err(format_error)?;
        writer
            .write_record(SettingsField::ALL.iter().map(|f| record.raw_field(*f)))
            .map_err(format_error)?;

        let bytes = writer.into_inner().map_err(format_error)?;
        String::from_utf8(bytes).map_err(format_error)
    }
}

/// Flat TOML table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

impl SettingsFormat for TomlFormat {
    const FILE_NAME: &'static str = "settings.toml";

    fn decode(text: &str) -> Result<SettingsRecord, SettingsError> {
        let table: toml::Table = toml::from_str(text).map_err(format_error)?;
        let mut record = SettingsRecord::default();

        for (key, value) in &table {
            let Some(field) = SettingsField::parse(key) else {
                debug!(key = key.as_str(), "ignoring unknown settings key");
                continue;
            };
            let text = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                other => {
                    return Err(SettingsError::Format(format!(
                        "{key}: expected a string or number, found {}",
                        other.type_str()
                    )));
                }
            };
            record.load_field(field, &text)?;
        }

        Ok(record)
    }

    fn encode(record: &SettingsRecord) -> Result<String, SettingsError> {
        toml::to_string(record).map_err(format_error)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use plastic_core::{AppearanceMode, ColorTheme};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const CURRENT: &str = "default_filament_cost,default_electricity_cost,default_printer_power,appearance_mode,color_theme,pdf_export_directory\n25.00,12.0,300.0,Dark,Blue,\n";

    // =========================================================================
    // CSV decode
    // =========================================================================

    #[test]
    fn csv_decodes_current_layout() {
        let record = CsvFormat::decode(CURRENT).unwrap();

        assert_eq!(
            record,
            SettingsRecord {
                default_filament_cost: Some(dec!(25.00)),
                default_electricity_cost: Some(dec!(12.0)),
                default_printer_power: Some(dec!(300.0)),
                appearance_mode: Some(AppearanceMode::Dark),
                color_theme: Some(ColorTheme::Blue),
                pdf_export_directory: None,
                settings_directory: None,
            }
        );
    }

    #[test]
    fn csv_short_row_leaves_trailing_fields_absent() {
        let text = "default_filament_cost,default_electricity_cost,default_printer_power,appearance_mode,color_theme,pdf_export_directory\n19.99,15\n";

        let record = CsvFormat::decode(text).unwrap();

        assert_eq!(record.default_filament_cost, Some(dec!(19.99)));
        assert_eq!(record.default_electricity_cost, Some(dec!(15)));
        assert_eq!(record.default_printer_power, None);
        assert_eq!(record.appearance_mode, None);
    }

    #[test]
    fn csv_older_three_column_file_loads() {
        let text = "default_filament_cost,default_electricity_cost,default_printer_power\n20,10,250\n";

        let record = CsvFormat::decode(text).unwrap();

        assert_eq!(record.default_printer_power, Some(dec!(250)));
        assert_eq!(record.color_theme, None);
        assert_eq!(record.pdf_export_directory, None);
    }

    #[test]
    fn csv_header_only_reads_as_empty() {
        let text = "default_filament_cost,default_electricity_cost\n";

        assert_eq!(CsvFormat::decode(text).unwrap(), SettingsRecord::default());
        assert_eq!(CsvFormat::decode("").unwrap(), SettingsRecord::default());
    }

    #[test]
    fn csv_matches_columns_by_name() {
        // settings_directory ahead of pdf_export_directory
        let text = "default_filament_cost,default_electricity_cost,default_printer_power,appearance_mode,color_theme,settings_directory,pdf_export_directory\n25,12,300,Light,Dark Blue,/srv/settings,/srv/reports\n";

        let record = CsvFormat::decode(text).unwrap();

        assert_eq!(record.appearance_mode, Some(AppearanceMode::Light));
        assert_eq!(record.color_theme, Some(ColorTheme::DarkBlue));
        assert_eq!(record.settings_directory, Some(PathBuf::from("/srv/settings")));
        assert_eq!(record.pdf_export_directory, Some(PathBuf::from("/srv/reports")));
    }

    #[test]
    fn csv_unknown_appearance_mode_does_not_hide_other_fields() {
        let text = "default_filament_cost,default_electricity_cost,default_printer_power,appearance_mode,color_theme,pdf_export_directory\n25.00,12.0,300.0,System,Blue,\n";

        let record = CsvFormat::decode(text).unwrap();

        assert_eq!(record.default_filament_cost, Some(dec!(25.00)));
        assert_eq!(record.appearance_mode, None);
        assert_eq!(record.color_theme, Some(ColorTheme::Blue));
    }

    #[test]
    fn csv_rejects_non_numeric_default() {
        let text = "default_filament_cost\nlots\n";

        let err = CsvFormat::decode(text).unwrap_err();

        assert!(matches!(
            err,
            SettingsError::InvalidValue {
                field: SettingsField::DefaultFilamentCost,
                ..
            }
        ));
    }

    // =========================================================================
    // CSV encode
    // =========================================================================

    #[test]
    fn csv_encodes_header_and_one_row() {
        let text = CsvFormat::encode(&SettingsRecord::seeded()).unwrap();

        assert_eq!(
            text,
            "default_filament_cost,default_electricity_cost,default_printer_power,appearance_mode,color_theme,pdf_export_directory,settings_directory\n25.00,12.0,300.0,Dark,Blue,,\n"
        );
    }

    #[test]
    fn csv_quotes_paths_containing_commas() {
        let record = SettingsRecord {
            pdf_export_directory: Some(PathBuf::from("/home/me/prints, 2024")),
            ..Default::default()
        };

        let text = CsvFormat::encode(&record).unwrap();
        assert!(text.contains("\"/home/me/prints, 2024\""));

        let decoded = CsvFormat::decode(&text).unwrap();
        assert_eq!(decoded, record);
    }

    // =========================================================================
    // TOML
    // =========================================================================

    #[test]
    fn toml_omits_absent_fields() {
        let record = SettingsRecord {
            default_printer_power: Some(dec!(300.0)),
            color_theme: Some(ColorTheme::DarkBlue),
            ..Default::default()
        };

        let text = TomlFormat::encode(&record).unwrap();

        assert!(text.contains("default_printer_power = \"300.0\""));
        assert!(text.contains("color_theme = \"Dark Blue\""));
        assert!(!text.contains("appearance_mode"));
        assert_eq!(TomlFormat::decode(&text).unwrap(), record);
    }

    #[test]
    fn toml_drops_unknown_theme_and_keeps_the_rest() {
        let text = "default_filament_cost = \"25.00\"\ncolor_theme = \"Orange\"\n";

        let record = TomlFormat::decode(text).unwrap();

        assert_eq!(record.default_filament_cost, Some(dec!(25.00)));
        assert_eq!(record.color_theme, None);
    }

    #[test]
    fn toml_accepts_bare_numbers() {
        let record = TomlFormat::decode("default_printer_power = 250\n").unwrap();

        assert_eq!(record.default_printer_power, Some(dec!(250)));
    }

    #[test]
    fn toml_rejects_nested_values() {
        let err = TomlFormat::decode("[default_filament_cost]\nx = 1\n").unwrap_err();

        assert!(matches!(err, SettingsError::Format(_)));
    }
}
