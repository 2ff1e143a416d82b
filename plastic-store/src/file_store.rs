use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use plastic_core::{SettingsError, SettingsRecord, SettingsStore};
use tracing::{debug, info};

use crate::format::{CsvFormat, SettingsFormat, TomlFormat};
use crate::locator::SettingsLocator;

/// Settings kept in a single file inside a resolved directory.
///
/// The current directory sits behind a mutex that every read and write
/// takes, so concurrent callers never see a half-written file from this
/// process.
pub struct FileSettingsStore<F> {
    backend: &'static str,
    default_dir: PathBuf,
    /// Where records that name no settings directory are written: the
    /// configured directory when one was used, otherwise `default_dir`.
    home_dir: PathBuf,
    dir: Mutex<PathBuf>,
    format: PhantomData<fn() -> F>,
}

/// The flat `settings.csv` store.
pub type CsvSettingsStore = FileSettingsStore<CsvFormat>;

/// The `settings.toml` store.
pub type TomlSettingsStore = FileSettingsStore<TomlFormat>;

impl<F: SettingsFormat> FileSettingsStore<F> {
    /// Resolves the storage location (see [`SettingsLocator::resolve`]) and
    /// opens a store there.
    pub fn open(
        backend: &'static str,
        locator: &SettingsLocator,
        configured: Option<&Path>,
    ) -> Result<Self, SettingsError> {
        let dir = locator.resolve::<F>(configured)?;
        let default_dir = locator.default_dir().to_path_buf();
        let home_dir = configured
            .filter(|d| d.is_dir())
            .map_or_else(|| default_dir.clone(), Path::to_path_buf);
        debug!(backend, dir = %dir.display(), "opened settings store");
        Ok(Self {
            backend,
            default_dir,
            home_dir,
            dir: Mutex::new(dir),
            format: PhantomData,
        })
    }

    fn lock_dir(&self) -> MutexGuard<'_, PathBuf> {
        self.dir.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<F: SettingsFormat> SettingsStore for FileSettingsStore<F> {
    fn backend_name(&self) -> &'static str {
        self.backend
    }

    fn location(&self) -> PathBuf {
        self.lock_dir().join(F::FILE_NAME)
    }

    fn load(&self) -> Result<SettingsRecord, SettingsError> {
        let dir = self.lock_dir();
        read_record::<F>(&dir.join(F::FILE_NAME))
    }

    /// Writes the record to its `settings_directory` when one is set,
    /// otherwise back home (the configured or default directory).
    ///
    /// The default directory always ends up holding the current redirect: a
    /// record that moves the settings elsewhere is copied there, and a record
    /// that clears the redirect overwrites the stale copy.
    fn write_record(
        &self,
        record: &SettingsRecord,
    ) -> Result<(), SettingsError> {
        let mut dir = self.lock_dir();
        let target = record
            .settings_directory
            .clone()
            .unwrap_or_else(|| self.home_dir.clone());

        write_record::<F>(&target, record)?;
        let redirected = *dir != self.home_dir;
        if target != self.default_dir && (record.settings_directory.is_some() || redirected) {
            write_record::<F>(&self.default_dir, record)?;
        }

        info!(path = %target.join(F::FILE_NAME).display(), "settings saved");
        *dir = target;
        Ok(())
    }
}

/// Reads and decodes one settings file.
pub(crate) fn read_record<F: SettingsFormat>(path: &Path) -> Result<SettingsRecord, SettingsError> {
    match fs::read_to_string(path) {
        Ok(text) => F::decode(&text),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SettingsError::Missing(path.to_path_buf())),
        Err(e) => Err(SettingsError::io(path, e)),
    }
}

/// Replaces the settings file in `dir` with `record`.
///
/// The new content goes to a sibling temp file first and is renamed over the
/// old one, so a failed write leaves the previous file intact.
fn write_record<F: SettingsFormat>(
    dir: &Path,
    record: &SettingsRecord,
) -> Result<(), SettingsError> {
    fs::create_dir_all(dir).map_err(|e| SettingsError::io(dir, e))?;

    let path = dir.join(F::FILE_NAME);
    let tmp = dir.join(format!("{}.tmp", F::FILE_NAME));
    let text = F::encode(record)?;

    fs::write(&tmp, text).map_err(|e| SettingsError::io(&tmp, e))?;
    fs::rename(&tmp, &path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        SettingsError::io(&path, e)
    })
}

#[cfg(test)]
mod tests {
    use plastic_core::{AppearanceMode, SettingsField};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn open_csv(default: &Path) -> CsvSettingsStore {
        CsvSettingsStore::open("csv", &SettingsLocator::new(default), None).unwrap()
    }

    #[test]
    fn load_on_fresh_store_is_missing() {
        let default = tempfile::tempdir().unwrap();
        let store = open_csv(default.path());

        assert!(store.load().unwrap_err().is_missing());
    }

    #[test]
    fn read_field_on_fresh_store_is_absent() {
        let default = tempfile::tempdir().unwrap();
        let store = open_csv(default.path());

        for field in SettingsField::ALL {
            assert_eq!(store.read_field(field).unwrap(), None, "{field}");
        }
    }

    #[test]
    fn write_replaces_whole_file() {
        let default = tempfile::tempdir().unwrap();
        let store = open_csv(default.path());

        store.write_record(&SettingsRecord::seeded()).unwrap();
        store
            .write_record(&SettingsRecord {
                appearance_mode: Some(AppearanceMode::Light),
                ..Default::default()
            })
            .unwrap();

        let text = fs::read_to_string(store.location()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(store.read_field(SettingsField::DefaultFilamentCost).unwrap(), None);
        assert_eq!(
            store.read_field(SettingsField::AppearanceMode).unwrap(),
            Some("Light".to_string())
        );
        assert!(!default.path().join("settings.csv.tmp").exists());
    }

    #[test]
    fn write_follows_settings_directory_and_leaves_redirect() {
        let default = tempfile::tempdir().unwrap();
        let custom = tempfile::tempdir().unwrap();
        let target = custom.path().join("prefs");
        let store = open_csv(default.path());
        let record = SettingsRecord {
            default_filament_cost: Some(dec!(30)),
            settings_directory: Some(target.clone()),
            ..Default::default()
        };

        store.write_record(&record).unwrap();

        assert_eq!(store.location(), target.join("settings.csv"));
        assert!(target.join("settings.csv").is_file());

        let reopened = open_csv(default.path());
        assert_eq!(reopened.location(), target.join("settings.csv"));
        assert_eq!(reopened.load().unwrap(), record);
    }

    #[test]
    fn clearing_settings_directory_returns_to_default() {
        let default = tempfile::tempdir().unwrap();
        let custom = tempfile::tempdir().unwrap();
        let store = open_csv(default.path());
        let mut record = SettingsRecord {
            settings_directory: Some(custom.path().to_path_buf()),
            ..SettingsRecord::seeded()
        };
        store.write_record(&record).unwrap();

        record.settings_directory = None;
        store.write_record(&record).unwrap();

        assert_eq!(store.location(), default.path().join("settings.csv"));
        let reopened = open_csv(default.path());
        assert_eq!(reopened.location(), default.path().join("settings.csv"));
        assert_eq!(reopened.load().unwrap(), record);
    }

    #[test]
    fn clearing_redirect_after_reopen_returns_to_default() {
        let default = tempfile::tempdir().unwrap();
        let custom = tempfile::tempdir().unwrap();
        let mut record = SettingsRecord {
            settings_directory: Some(custom.path().to_path_buf()),
            ..SettingsRecord::seeded()
        };
        open_csv(default.path()).write_record(&record).unwrap();

        let redirected = open_csv(default.path());
        assert_eq!(redirected.location(), custom.path().join("settings.csv"));
        record.settings_directory = None;
        redirected.write_record(&record).unwrap();

        assert_eq!(
            open_csv(default.path()).location(),
            default.path().join("settings.csv")
        );
    }

    #[test]
    fn unknown_appearance_mode_on_disk_keeps_numeric_defaults_readable() {
        let default = tempfile::tempdir().unwrap();
        fs::write(
            default.path().join("settings.csv"),
            "default_filament_cost,default_electricity_cost,default_printer_power,appearance_mode,color_theme,pdf_export_directory\n25.00,12.0,300.0,System,Blue,\n",
        )
        .unwrap();
        let store = open_csv(default.path());

        assert_eq!(
            store.read_field(SettingsField::DefaultFilamentCost).unwrap(),
            Some("25.00".to_string())
        );
        assert_eq!(store.read_field(SettingsField::AppearanceMode).unwrap(), None);
    }

    #[test]
    fn seed_only_writes_once() {
        let default = tempfile::tempdir().unwrap();
        let store = open_csv(default.path());

        assert!(store.seed(&SettingsRecord::seeded()).unwrap());
        store
            .write_record(&SettingsRecord {
                default_printer_power: Some(dec!(120)),
                ..Default::default()
            })
            .unwrap();
        assert!(!store.seed(&SettingsRecord::seeded()).unwrap());

        assert_eq!(
            store.read_field(SettingsField::DefaultPrinterPower).unwrap(),
            Some("120".to_string())
        );
    }

    #[test]
    fn unreadable_file_is_a_format_error_not_missing() {
        let default = tempfile::tempdir().unwrap();
        fs::write(default.path().join("settings.toml"), "not = [valid").unwrap();
        let store =
            TomlSettingsStore::open("toml", &SettingsLocator::new(default.path()), None).unwrap();

        let err = store.read_field(SettingsField::ColorTheme).unwrap_err();

        assert!(matches!(err, SettingsError::Format(_)));
    }
}
