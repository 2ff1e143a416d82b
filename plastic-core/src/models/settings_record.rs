use std::fmt;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{ParseDecimalError, parse_finite_decimal, round_half_up};
use crate::models::{AppearanceMode, ColorTheme};
use crate::store::paths::resolve_export_directory;
use crate::store::SettingsError;

/// One persisted settings column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    DefaultFilamentCost,
    DefaultElectricityCost,
    DefaultPrinterPower,
    AppearanceMode,
    ColorTheme,
    PdfExportDirectory,
    SettingsDirectory,
}

impl SettingsField {
    /// Every field, in on-disk column order.
    pub const ALL: [SettingsField; 7] = [
        SettingsField::DefaultFilamentCost,
        SettingsField::DefaultElectricityCost,
        SettingsField::DefaultPrinterPower,
        SettingsField::AppearanceMode,
        SettingsField::ColorTheme,
        SettingsField::PdfExportDirectory,
        SettingsField::SettingsDirectory,
    ];

    /// Column header / key name.
    pub fn key(&self) -> &'static str {
        match self {
            Self::DefaultFilamentCost => "default_filament_cost",
            Self::DefaultElectricityCost => "default_electricity_cost",
            Self::DefaultPrinterPower => "default_printer_power",
            Self::AppearanceMode => "appearance_mode",
            Self::ColorTheme => "color_theme",
            Self::PdfExportDirectory => "pdf_export_directory",
            Self::SettingsDirectory => "settings_directory",
        }
    }

    /// Accepts the column key or the short form (`filament_cost`,
    /// `electricity_cost`, `printer_power`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|f| f.key() == s).or(match s {
            "filament_cost" => Some(Self::DefaultFilamentCost),
            "electricity_cost" => Some(Self::DefaultElectricityCost),
            "printer_power" => Some(Self::DefaultPrinterPower),
            _ => None,
        })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::DefaultFilamentCost | Self::DefaultElectricityCost | Self::DefaultPrinterPower
        )
    }
}

impl fmt::Display for SettingsField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The durable set of user defaults and preferences.
///
/// Every field is optional: a file written by an older version may lack
/// trailing columns, and a user may leave any default blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_filament_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_electricity_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_printer_power: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance_mode: Option<AppearanceMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_theme: Option<ColorTheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_export_directory: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_directory: Option<PathBuf>,
}

impl SettingsRecord {
    /// The row written on first start: `25.00,12.0,300.0,Dark,Blue,`.
    pub fn seeded() -> Self {
        Self {
            default_filament_cost: Some(Decimal::new(2500, 2)),
            default_electricity_cost: Some(Decimal::new(120, 1)),
            default_printer_power: Some(Decimal::new(3000, 1)),
            appearance_mode: Some(AppearanceMode::Dark),
            color_theme: Some(ColorTheme::Blue),
            pdf_export_directory: None,
            settings_directory: None,
        }
    }

    /// Value of `field` formatted for display.
    ///
    /// Numeric fields are rounded to two decimal places; everything else is
    /// returned as stored. Returns `None` when the field is unset.
    pub fn field(
        &self,
        field: SettingsField,
    ) -> Option<String> {
        match field {
            SettingsField::DefaultFilamentCost => self.default_filament_cost.map(rounded_string),
            SettingsField::DefaultElectricityCost => {
                self.default_electricity_cost.map(rounded_string)
            }
            SettingsField::DefaultPrinterPower => self.default_printer_power.map(rounded_string),
            SettingsField::AppearanceMode => self.appearance_mode.map(|m| m.as_str().to_string()),
            SettingsField::ColorTheme => self.color_theme.map(|t| t.as_str().to_string()),
            SettingsField::PdfExportDirectory => self
                .pdf_export_directory
                .as_ref()
                .map(|p| p.display().to_string()),
            SettingsField::SettingsDirectory => self
                .settings_directory
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }

    /// Value of `field` exactly as it would be written to disk.
    pub fn raw_field(
        &self,
        field: SettingsField,
    ) -> String {
        match field {
            SettingsField::DefaultFilamentCost => opt_to_string(self.default_filament_cost),
            SettingsField::DefaultElectricityCost => opt_to_string(self.default_electricity_cost),
            SettingsField::DefaultPrinterPower => opt_to_string(self.default_printer_power),
            _ => self.field(field).unwrap_or_default(),
        }
    }

    /// Sets `field` from text. Blank text clears the field.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidValue`] when a numeric field is not a finite
    /// number or an enum field is not one of its display names.
    pub fn set_field(
        &mut self,
        field: SettingsField,
        text: &str,
    ) -> Result<(), SettingsError> {
        let text = text.trim();
        let invalid = || SettingsError::InvalidValue {
            field,
            value: text.to_string(),
        };
        let blank = text.is_empty();

        match field {
            SettingsField::DefaultFilamentCost => {
                self.default_filament_cost = parse_optional(text).map_err(|_| invalid())?;
            }
            SettingsField::DefaultElectricityCost => {
                self.default_electricity_cost = parse_optional(text).map_err(|_| invalid())?;
            }
            SettingsField::DefaultPrinterPower => {
                self.default_printer_power = parse_optional(text).map_err(|_| invalid())?;
            }
            SettingsField::AppearanceMode => {
                self.appearance_mode = if blank {
                    None
                } else {
                    Some(AppearanceMode::parse(text).ok_or_else(invalid)?)
                };
            }
            SettingsField::ColorTheme => {
                self.color_theme = if blank {
                    None
                } else {
                    Some(ColorTheme::parse(text).ok_or_else(invalid)?)
                };
            }
            SettingsField::PdfExportDirectory => {
                self.pdf_export_directory = (!blank).then(|| PathBuf::from(text));
            }
            SettingsField::SettingsDirectory => {
                self.settings_directory = (!blank).then(|| PathBuf::from(text));
            }
        }
        Ok(())
    }

    /// Sets `field` from a value read back from disk.
    ///
    /// Same as [`set_field`](Self::set_field), except that an unrecognised
    /// appearance mode or colour theme is logged and left unset instead of
    /// failing the whole record.
    pub fn load_field(
        &mut self,
        field: SettingsField,
        text: &str,
    ) -> Result<(), SettingsError> {
        match self.set_field(field, text) {
            Err(SettingsError::InvalidValue { field, value })
                if matches!(field, SettingsField::AppearanceMode | SettingsField::ColorTheme) =>
            {
                warn!(%field, value = %value, "ignoring unrecognised stored value");
                self.set_field(field, "")
            }
            other => other,
        }
    }

    pub fn appearance_mode_or_default(&self) -> AppearanceMode {
        self.appearance_mode.unwrap_or_default()
    }

    pub fn color_theme_or_default(&self) -> ColorTheme {
        self.color_theme.unwrap_or_default()
    }

    /// Where a report would be exported right now.
    ///
    /// Evaluated on every call: the configured directory is used only while it
    /// exists, otherwise the current working directory.
    pub fn export_directory(&self) -> PathBuf {
        resolve_export_directory(self.pdf_export_directory.as_deref())
    }
}

fn rounded_string(value: Decimal) -> String {
    round_half_up(value).to_string()
}

fn opt_to_string(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_optional(text: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    if text.is_empty() {
        return Ok(None);
    }
    parse_finite_decimal(text).map(Some)
}
