//! Tarjeta command line
//!
//! Presentation layer for the person-card form: turns flags into form
//! events, renders notifications as text and answers the confirmation
//! dialog from stdin.

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tarjeta_core::{
    Color, Event, FileStore, FormConfig, FormController, FormState, Notification, Phase, Preview,
    RecordStore, Route, Severity,
};
use tracing_subscriber::EnvFilter;

/// How a `fill` run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Record appended to the ledger
    Saved,
    /// User declined the confirmation
    Cancelled,
    /// Form was not complete; nothing saved
    Incomplete,
}

impl Outcome {
    /// Process exit code
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Saved | Self::Cancelled => 0,
            Self::Incomplete => 1,
        }
    }
}

/// CLI definition
#[must_use]
pub fn command() -> Command {
    Command::new("tarjeta")
        .version(tarjeta_core::VERSION)
        .about("Person-card form: validate, confirm and save to a local ledger")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("ledger")
                .long("ledger")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Store file, overrides ledger_path from the config"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log as JSON lines"),
        )
        .subcommand(
            Command::new("fill")
                .about("Fill the form, confirm and save")
                .arg(Arg::new("name").long("name").default_value("").help("Nombre"))
                .arg(Arg::new("email").long("email").default_value("").help("Email"))
                .arg(
                    Arg::new("color")
                        .long("color")
                        .value_parser(value_parser!(Color))
                        .help("Favorite color: red, yellow or green"),
                )
                .arg(
                    Arg::new("accept")
                        .long("accept")
                        .action(ArgAction::SetTrue)
                        .help("Accept terms and conditions"),
                )
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Confirm without prompting"),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Show the card preview")
                .arg(Arg::new("name").long("name").default_value(""))
                .arg(Arg::new("email").long("email").default_value(""))
                .arg(Arg::new("color").long("color").value_parser(value_parser!(Color))),
        )
        .subcommand(
            Command::new("list").about("List saved records").arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Output as JSON"),
            ),
        )
        .subcommand(
            Command::new("route")
                .about("Resolve a navigation path")
                .arg(Arg::new("path").required(true)),
        )
}

/// Install the tracing subscriber on stderr
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
pub fn init_logging(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A subscriber may already be set in tests.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Resolve configuration from `--config` and `--ledger`
pub fn load_config(matches: &ArgMatches) -> Result<FormConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => FormConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => FormConfig::default(),
    };
    if let Some(ledger) = matches.get_one::<PathBuf>("ledger") {
        config = config.with_ledger_path(ledger);
    }
    Ok(config)
}

/// Run a parsed command line
///
/// Returns the process exit code.
pub fn run(matches: &ArgMatches, input: &mut impl BufRead, out: &mut impl Write) -> Result<i32> {
    let config = load_config(matches)?;

    match matches.subcommand() {
        Some(("fill", args)) => {
            let mut form = FormController::with_config(FileStore::new(&config.ledger_path), &config);
            let outcome = fill(&mut form, &field_events(args), args.get_flag("yes"), input, out)?;
            Ok(outcome.exit_code())
        }
        Some(("preview", args)) => {
            let mut form = FormController::new(tarjeta_core::MemoryStore::new());
            form.dispatch_all(field_events(args))?;
            write_preview(out, &form.preview())?;
            Ok(0)
        }
        Some(("list", args)) => {
            let ledger = RecordStore::with_config(FileStore::new(&config.ledger_path), &config);
            let records = ledger.records()?;
            if args.get_flag("json") {
                writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
            } else if records.is_empty() {
                writeln!(out, "(sin registros)")?;
            } else {
                for r in &records {
                    writeln!(
                        out,
                        "{}  {} <{}> {}",
                        r.created_at_iso(),
                        r.name(),
                        r.email(),
                        r.color().label()
                    )?;
                }
            }
            Ok(0)
        }
        Some(("route", args)) => {
            let path = args.get_one::<String>("path").map_or("", String::as_str);
            match Route::resolve(path) {
                Some(route) => {
                    writeln!(out, "{route} -> {}", route.title())?;
                    Ok(0)
                }
                None => {
                    writeln!(out, "no route for {path}")?;
                    Ok(1)
                }
            }
        }
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given"),
    }
}

fn field_events(args: &ArgMatches) -> Vec<Event> {
    let text = |id: &str| args.get_one::<String>(id).cloned().unwrap_or_default();
    let mut events = vec![
        Event::NameChanged(text("name")),
        Event::EmailChanged(text("email")),
        Event::ColorChanged(args.get_one::<Color>("color").copied()),
    ];
    if args.try_contains_id("accept").unwrap_or(false) {
        events.push(Event::TermsChanged(args.get_flag("accept")));
    }
    events
}

/// Drive one form submission
///
/// Applies `fields`, submits, then answers the confirmation with `assume_yes`
/// or a `y/N` line read from `input`.
pub fn fill<S, C>(
    form: &mut FormController<S, C>,
    fields: &[Event],
    assume_yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Outcome>
where
    S: tarjeta_core::KeyValueStore,
    C: tarjeta_core::Clock,
{
    form.dispatch_all(fields.iter().cloned())?;
    write_field_errors(out, form.form())?;
    write_preview(out, &form.preview())?;

    let shown = form.dispatch(Event::Submit)?;
    write_notifications(out, &shown)?;
    if form.phase() != Phase::ConfirmPending {
        return Ok(Outcome::Incomplete);
    }

    let confirmed = assume_yes || ask(input, out)?;
    let shown = form
        .dispatch(if confirmed { Event::Confirm } else { Event::Cancel })
        .context("saving record")?;
    write_notifications(out, &shown)?;

    Ok(if confirmed { Outcome::Saved } else { Outcome::Cancelled })
}

fn ask(input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(
        out,
        "[{} / {}] (s/N): ",
        tarjeta_core::ConfirmPrompt::CONFIRM_LABEL,
        tarjeta_core::ConfirmPrompt::CANCEL_LABEL
    )?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes"))
}

fn write_field_errors(out: &mut impl Write, form: &FormState) -> Result<()> {
    for (field, err) in [("nombre", form.errors.name), ("email", form.errors.email)] {
        if !err.is_empty() {
            writeln!(out, "  {field}: {err}")?;
        }
    }
    Ok(())
}

fn write_preview(out: &mut impl Write, preview: &Preview) -> Result<()> {
    writeln!(out, "┌ {} / {}", preview.background, preview.foreground)?;
    writeln!(out, "│ {}", preview.heading)?;
    writeln!(out, "│ {}", preview.contact)?;
    writeln!(out, "└")?;
    Ok(())
}

fn write_notifications(out: &mut impl Write, shown: &[Notification]) -> Result<()> {
    for n in shown {
        let tag = match n.severity() {
            Severity::Error => "✗",
            Severity::Question => "?",
            Severity::Success => "✓",
        };
        writeln!(out, "{tag} {n}")?;
    }
    Ok(())
}
