use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};

use crate::application::{
    Action, AppError, Outcome, RateEdits, Session, View, button_label, parse_misc_amount,
    parse_rate_input,
};
use crate::domain::{HistoryEntry, RateTable, ServiceKind, format_money};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// Walktally - dog-walking tally and pricing calculator
#[derive(Parser)]
#[command(name = "walktally")]
#[command(about = "Tally completed dog-walking services and price them with saved rates")]
#[command(version)]
pub struct Cli {
    /// File the rates are stored in
    #[arg(
        long,
        global = true,
        env = "WALKTALLY_RATES_FILE",
        default_value = "walktally.json"
    )]
    pub rates_file: String,

    /// Keep rates in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rate management commands
    #[command(subcommand)]
    Rates(RatesCommands),

    /// Apply a list of actions to a fresh tally and print the result
    Tally {
        /// Actions in order: regular, double, potty, petsit, misc=<amount>, undo, reset
        #[arg(required = true)]
        actions: Vec<String>,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Interactive tally, one command per line (type "help" for the list)
    Session,
}

#[derive(Subcommand)]
pub enum RatesCommands {
    /// Show current rates
    Show {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Change one or more rates. Invalid values keep the current rate; an
    /// empty value sets the rate to zero.
    Set {
        /// Regular walk rate (e.g., "13.00")
        #[arg(long, allow_hyphen_values = true)]
        regular: Option<String>,

        /// Double walk rate
        #[arg(long, allow_hyphen_values = true)]
        double: Option<String>,

        /// Potty break rate
        #[arg(long, allow_hyphen_values = true)]
        potty: Option<String>,

        /// Pet sit rate
        #[arg(long, allow_hyphen_values = true)]
        petsit: Option<String>,
    },

    /// Restore the built-in default rates
    Reset,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if self.ephemeral {
            tracing::debug!("Using in-memory rate store");
            execute(self.command, Session::open(MemoryStore::new()))
        } else {
            tracing::debug!("Using rate file {}", self.rates_file);
            execute(self.command, Session::open(FileStore::new(&self.rates_file)))
        }
    }
}

fn execute<S: KeyValueStore>(command: Commands, mut session: Session<S>) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Rates(rates_cmd) => run_rates_command(&mut session, rates_cmd, &mut out)?,

        Commands::Tally { actions, format } => {
            run_tally(&mut session, &actions)?;
            write_summary(&session, &format, &mut out)?;
        }

        Commands::Session => {
            let stdin = std::io::stdin();
            run_session(&mut session, stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}

fn run_rates_command<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    cmd: RatesCommands,
    out: &mut W,
) -> Result<()> {
    match cmd {
        RatesCommands::Show { format } => match format.as_str() {
            "json" => {
                serde_json::to_writer_pretty(&mut *out, session.rates())?;
                writeln!(out)?;
            }
            _ => write_rates(session.rates(), out)?,
        },

        RatesCommands::Set {
            regular,
            double,
            potty,
            petsit,
        } => {
            let edits = RateEdits {
                regular,
                double,
                potty,
                petsit,
            };
            if edits.is_empty() {
                anyhow::bail!(
                    "Nothing to set. Pass at least one of --regular, --double, --potty, --petsit"
                );
            }
            save_rates(session, &edits, out)?;
        }

        RatesCommands::Reset => {
            session.reset_rates().context("Failed to reset rates")?;
            writeln!(out, "Rates reset to defaults.")?;
            write_rates(session.rates(), out)?;
        }
    }
    Ok(())
}

fn save_rates<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    edits: &RateEdits,
    out: &mut W,
) -> Result<()> {
    for kind in ServiceKind::ALL {
        if let Some(raw) = edits.get(kind) {
            if parse_rate_input(raw).is_none() {
                writeln!(out, "Ignored invalid {} rate: {:?}", kind, raw)?;
            }
        }
    }
    session.save_rates(edits).context("Failed to save rates")?;
    writeln!(out, "Rates saved.")?;
    write_rates(session.rates(), out)?;
    Ok(())
}

/// Parse one action word. Service names, `undo` and `reset` stand alone;
/// misc charges are written `misc=<amount>` (or `misc:<amount>`).
pub fn parse_action(word: &str) -> Result<Action, AppError> {
    let word = word.trim();
    if let Some(kind) = ServiceKind::from_str(word) {
        return Ok(Action::AddService(kind));
    }

    let lower = word.to_lowercase();
    match lower.as_str() {
        "undo" => Ok(Action::Undo),
        "reset" => Ok(Action::Reset),
        _ => {
            let raw = lower
                .strip_prefix("misc=")
                .or_else(|| lower.strip_prefix("misc:"))
                .ok_or_else(|| AppError::UnknownAction(word.to_string()))?;
            parse_misc_amount(raw)
                .map(Action::AddMisc)
                .ok_or_else(|| AppError::InvalidAmount(raw.to_string()))
        }
    }
}

/// Apply action words in order. Unknown words abort; rejected misc amounts
/// and empty undos are reported on stderr and skipped.
pub fn run_tally<S: KeyValueStore>(session: &mut Session<S>, actions: &[String]) -> Result<()> {
    for word in actions {
        match parse_action(word) {
            Ok(action) => {
                if session.dispatch(action)? == Outcome::Ignored {
                    eprintln!("Nothing to undo: {}", word);
                }
            }
            Err(AppError::InvalidAmount(raw)) => {
                eprintln!("Ignored misc amount: {:?}", raw);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

const SESSION_HELP: &str = "\
Commands:
  regular | double | potty | petsit   add one service
  misc <amount>                       add a misc charge (negative allowed)
  undo                                reverse the last add
  reset                               clear the tally (rates are kept)
  rates                               show current rates
  set-rates <kind>=<value>...         change rates, e.g. set-rates potty=7
  reset-rates                         restore default rates
  summary                             show the tally
  help                                show this list
  quit                                leave";

/// Interactive loop. Reads one command per line until `quit` or end of
/// input, printing the tally after every change.
pub fn run_session<S: KeyValueStore, R: BufRead, W: Write>(
    session: &mut Session<S>,
    input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Type \"help\" for commands.")?;
    write_view(&session.view(), out)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command.to_lowercase().as_str() {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{}", SESSION_HELP)?,
            "summary" => write_view(&session.view(), out)?,
            "rates" => write_rates(session.rates(), out)?,

            "misc" => match args.first().and_then(|raw| parse_misc_amount(raw)) {
                Some(amount) => {
                    session.dispatch(Action::AddMisc(amount))?;
                    write_view(&session.view(), out)?;
                }
                None => writeln!(out, "Ignored: misc amount must be a non-zero number.")?,
            },

            "set-rates" => {
                let mut edits = RateEdits::default();
                for arg in &args {
                    let parsed = arg
                        .split_once('=')
                        .and_then(|(kind, raw)| Some((ServiceKind::from_str(kind)?, raw)));
                    match parsed {
                        Some((kind, raw)) => edits.set(kind, raw),
                        None => writeln!(out, "Ignored: {:?} (expected <kind>=<value>)", arg)?,
                    }
                }
                if edits.is_empty() {
                    writeln!(out, "Nothing to set.")?;
                } else {
                    save_rates(session, &edits, out)?;
                    write_view(&session.view(), out)?;
                }
            }

            "reset-rates" => {
                session.dispatch(Action::ResetRates)?;
                writeln!(out, "Rates reset to defaults.")?;
                write_view(&session.view(), out)?;
            }

            _ => match parse_action(&line) {
                Ok(action) => match session.dispatch(action)? {
                    Outcome::Ignored => writeln!(out, "Nothing to undo.")?,
                    Outcome::Undone(entry) => {
                        writeln!(out, "Undid {}.", describe_entry(&entry))?;
                        write_view(&session.view(), out)?;
                    }
                    Outcome::Changed => write_view(&session.view(), out)?,
                },
                Err(e) => writeln!(out, "{}. Type \"help\" for commands.", e)?,
            },
        }
    }

    Ok(())
}

fn describe_entry(entry: &HistoryEntry) -> String {
    match entry {
        HistoryEntry::Service { service } => service.display_name().to_string(),
        HistoryEntry::Misc { amount } => format!("misc {}", format_money(*amount)),
    }
}

fn write_view<W: Write>(view: &View, out: &mut W) -> Result<()> {
    writeln!(out)?;
    for line in &view.summary_lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "{}", "-".repeat(36))?;
    writeln!(out, "Total: {}", view.total)?;
    if view.undo_available {
        writeln!(out, "(undo available)")?;
    }
    Ok(())
}

fn write_rates<W: Write>(rates: &RateTable, out: &mut W) -> Result<()> {
    writeln!(out, "{:<10} {:>10}  {}", "SERVICE", "RATE", "BUTTON")?;
    writeln!(out, "{}", "-".repeat(46))?;
    for kind in ServiceKind::ALL {
        writeln!(
            out,
            "{:<10} {:>10}  {}",
            kind.as_str(),
            format_money(rates.get(kind)),
            button_label(kind, rates)
        )?;
    }
    Ok(())
}

fn write_summary<S: KeyValueStore, W: Write>(
    session: &Session<S>,
    format: &str,
    out: &mut W,
) -> Result<()> {
    match format {
        "json" => session.summary().write_json(out),
        "csv" => session.summary().write_csv(out),
        _ => write_view(&session.view(), out),
    }
}
