use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use plastic_cli::app::{self, PartialJob};
use plastic_cli::interactive::Session;
use plastic_cli::logging;
use plastic_cli::state::AppState;
use plastic_core::{SettingsField, SettingsRecord, SettingsStore, StoreConfig};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Estimates what a 3D print costs in filament and electricity.
///
/// Saved defaults for filament price, electricity price, and printer power
/// fill in whatever is not given on the command line.
#[derive(Debug, Parser)]
#[command(name = "plastic-tax", version)]
struct Cli {
    /// Settings backend to use.
    #[arg(long, global = true, default_value = "csv")]
    backend: String,

    /// Directory holding the settings file. Ignored when it does not exist.
    #[arg(long, global = true)]
    settings_dir: Option<PathBuf>,

    /// Replaces the platform data directory as the default settings location.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `plastic_store=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate the cost of one print.
    Calculate(CalculateArgs),

    /// Inspect or change saved defaults.
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Start a prompt that keeps the last result for export.
    Interactive,
}

#[derive(Debug, Args)]
struct CalculateArgs {
    /// Filament price per kilogram. Defaults to the saved value.
    #[arg(long, allow_hyphen_values = true)]
    filament_cost_per_kg: Option<String>,

    /// Weight of the printed part in grams.
    #[arg(long, allow_hyphen_values = true)]
    weight_grams: String,

    /// Estimated print time in hours.
    #[arg(long, allow_hyphen_values = true)]
    print_time_hours: String,

    /// Electricity price in cents per kWh. Defaults to the saved value.
    #[arg(long, allow_hyphen_values = true)]
    electricity_cents_per_kwh: Option<String>,

    /// Printer power draw in watts. Defaults to the saved value.
    #[arg(long, allow_hyphen_values = true)]
    power_watts: Option<String>,

    /// Write a PDF report of the result to the configured export directory.
    #[arg(long)]
    export: bool,
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    /// Print every saved setting.
    Show,
    /// Print one setting.
    Get {
        /// Field key, e.g. `default_filament_cost` or `filament_cost`.
        field: String,
    },
    /// Print where the settings file lives.
    Path,
    /// Write first-run defaults if nothing is saved yet.
    Init,
    /// Update the given settings and keep the rest.
    Save(SaveArgs),
}

#[derive(Debug, Args)]
struct SaveArgs {
    #[arg(long, allow_hyphen_values = true)]
    filament_cost: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    electricity_cost: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    printer_power: Option<String>,
    /// `Dark` or `Light`.
    #[arg(long)]
    appearance_mode: Option<String>,
    /// `Blue`, `Green` or `Dark Blue`.
    #[arg(long)]
    color_theme: Option<String>,
    #[arg(long)]
    pdf_export_directory: Option<String>,
    #[arg(long)]
    settings_directory: Option<String>,
}

impl SaveArgs {
    fn updates(self) -> Vec<(SettingsField, String)> {
        [
            (SettingsField::DefaultFilamentCost, self.filament_cost),
            (SettingsField::DefaultElectricityCost, self.electricity_cost),
            (SettingsField::DefaultPrinterPower, self.printer_power),
            (SettingsField::AppearanceMode, self.appearance_mode),
            (SettingsField::ColorTheme, self.color_theme),
            (SettingsField::PdfExportDirectory, self.pdf_export_directory),
            (SettingsField::SettingsDirectory, self.settings_directory),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_calculate(
    store: &dyn SettingsStore,
    args: CalculateArgs,
) -> anyhow::Result<()> {
    let job = PartialJob {
        filament_cost_per_kg: args.filament_cost_per_kg,
        print_weight_grams: args.weight_grams,
        estimated_print_time_hours: args.print_time_hours,
        electricity_cost_per_kwh_cents: args.electricity_cents_per_kwh,
        printer_power_rating_watts: args.power_watts,
    };
    let raw = app::fill_from_defaults(job, store).context("loading saved defaults")?;

    let mut state = AppState::new();
    let breakdown = app::calculate(&mut state, &raw)?;
    println!("{}", breakdown.result);

    if args.export {
        let path = app::export(&state, store).context("exporting report")?;
        println!("Report saved to {}", path.display());
    }
    Ok(())
}

fn run_settings(
    store: &dyn SettingsStore,
    command: SettingsCommand,
) -> anyhow::Result<()> {
    match command {
        SettingsCommand::Show => {
            let record = store.load_or_default().context("reading settings")?;
            print!("{}", app::describe_settings(&record));
        }
        SettingsCommand::Get { field } => {
            let field = app::parse_field(&field)?;
            let value = store.read_field(field).context("reading settings")?;
            println!("{}", value.unwrap_or_default());
        }
        SettingsCommand::Path => println!("{}", store.location().display()),
        SettingsCommand::Init => {
            if store.seed(&SettingsRecord::seeded()).context("writing settings")? {
                println!("Wrote defaults to {}", store.location().display());
            } else {
                println!("Settings already exist at {}", store.location().display());
            }
        }
        SettingsCommand::Save(args) => {
            let record = app::save_settings(store, &args.updates()).context("saving settings")?;
            info!(path = %store.location().display(), "settings saved");
            print!("{}", app::describe_settings(&record));
        }
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_default_logging();
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = StoreConfig {
        backend: cli.backend,
        settings_directory: cli.settings_dir,
        default_directory: cli.data_dir,
    };
    debug!(backend = %config.backend, "opening settings store");
    let store = app::open_store(&config).context("opening settings store")?;

    match cli.command {
        Command::Calculate(args) => run_calculate(store.as_ref(), args),
        Command::Settings(command) => run_settings(store.as_ref(), command),
        Command::Interactive => {
            let mut session = Session::new(store.as_ref());
            session
                .run(io::stdin().lock(), io::stdout().lock())
                .context("interactive session")
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn calculate_takes_unit_suffixed_flags() {
        let cli = Cli::try_parse_from([
            "plastic-tax",
            "calculate",
            "--weight-grams",
            "100",
            "--print-time-hours",
            "2",
            "--electricity-cents-per-kwh",
            "-12",
        ])
        .unwrap();

        let Command::Calculate(args) = cli.command else {
            panic!("expected calculate, got {:?}", cli.command);
        };
        assert_eq!(args.weight_grams, "100");
        assert_eq!(args.print_time_hours, "2");
        assert_eq!(args.electricity_cents_per_kwh.as_deref(), Some("-12"));
        assert_eq!(args.filament_cost_per_kg, None);
        assert!(!args.export);
    }

    #[test]
    fn short_flag_names_are_rejected() {
        assert!(Cli::try_parse_from(["plastic-tax", "calculate", "--weight", "100"]).is_err());
    }
}
