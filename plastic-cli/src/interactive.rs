//! Line-oriented prompt over one settings store.
//!
//! | command                                   | effect                                  |
//! |-------------------------------------------|-----------------------------------------|
//! | `calc <cost/kg> <g> <h> <cents/kWh> <W>`  | calculate with every value given        |
//! | `calc <g> <h>`                            | calculate using saved defaults          |
//! | `export`                                  | write the last result as a PDF          |
//! | `defaults`                                | show the saved settings                 |
//! | `set <field> <value>`                     | save one setting                        |
//! | `help`                                    | list commands                           |
//! | `quit` / `exit`                           | leave                                   |
//!
//! A failed command prints `error: ...` and the prompt continues.

use std::io::{self, BufRead, Write};

use plastic_core::{RawPrintJob, SettingsStore};
use tracing::debug;

use crate::app::{
    self, AppError, PartialJob, describe_settings, fill_from_defaults, parse_field, save_settings,
};
use crate::state::AppState;

const PROMPT: &str = "plastic-tax> ";

const HELP: &str = "\
commands:
  calc <filament cost/kg> <weight g> <hours> <electricity cents/kWh> <power W>
  calc <weight g> <hours>        (uses saved defaults for the rest)
  export                         write the last result to a PDF report
  defaults                       show saved settings
  set <field> <value>            save one setting
  help                           show this list
  quit | exit                    leave";

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive session: a store plus the last calculation made in it.
pub struct Session<'a> {
    store: &'a dyn SettingsStore,
    state: AppState,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a dyn SettingsStore) -> Self {
        Self {
            store,
            state: AppState::new(),
        }
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> io::Result<()> {
        writeln!(output, "Type `help` for a list of commands.")?;
        write!(output, "{PROMPT}")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.execute(line.trim()) {
                Ok((flow, text)) => {
                    if !text.is_empty() {
                        writeln!(output, "{text}")?;
                    }
                    if flow == Flow::Quit {
                        return Ok(());
                    }
                }
                Err(e) => writeln!(output, "error: {e}")?,
            }
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn execute(
        &mut self,
        line: &str,
    ) -> Result<(Flow, String), CommandError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok((Flow::Continue, String::new()));
        };
        let args: Vec<&str> = words.collect();
        debug!(command, ?args, "interactive command");

        let text = match command {
            "calc" => self.calc(&args)?,
            "export" => {
                let path = app::export(&self.state, self.store)?;
                format!("Report saved to {}", path.display())
            }
            "defaults" => describe_settings(&self.store.load_or_default().map_err(AppError::from)?)
                .trim_end()
                .to_string(),
            "set" => self.set(line, &args)?,
            "help" => HELP.to_string(),
            "quit" | "exit" => return Ok((Flow::Quit, String::new())),
            other => return Err(CommandError::Usage(format!("unknown command '{other}'; try `help`"))),
        };
        Ok((Flow::Continue, text))
    }

    fn calc(
        &mut self,
        args: &[&str],
    ) -> Result<String, CommandError> {
        let raw = match *args {
            [filament, weight, hours, electricity, power] => RawPrintJob {
                filament_cost_per_kg: filament.to_string(),
                print_weight_grams: weight.to_string(),
                estimated_print_time_hours: hours.to_string(),
                electricity_cost_per_kwh_cents: electricity.to_string(),
                printer_power_rating_watts: power.to_string(),
            },
            [weight, hours] => fill_from_defaults(
                PartialJob {
                    print_weight_grams: weight.to_string(),
                    estimated_print_time_hours: hours.to_string(),
                    ..Default::default()
                },
                self.store,
            )
            .map_err(AppError::from)?,
            _ => return Err(CommandError::Usage("calc takes 2 or 5 values; try `help`".to_string())),
        };
        let breakdown = app::calculate(&mut self.state, &raw).map_err(AppError::from)?;
        Ok(breakdown.result.to_string())
    }

    fn set(
        &self,
        line: &str,
        args: &[&str],
    ) -> Result<String, CommandError> {
        let Some(name) = args.first() else {
            return Err(CommandError::Usage("usage: set <field> <value>".to_string()));
        };
        let field = parse_field(name)?;
        // Everything after the field name, so paths with spaces survive.
        let value = line
            .trim_start()
            .strip_prefix("set")
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix(*name))
            .map(str::trim)
            .unwrap_or_default();
        let record = save_settings(self.store, &[(field, value.to_string())]).map_err(AppError::from)?;
        Ok(format!("{} = {}", field, record.field(field).unwrap_or_default()))
    }
}

#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    App(#[from] AppError),
}
