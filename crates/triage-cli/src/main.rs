//! `triage` - guided troubleshooting from the terminal

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use triage_core::prelude::*;

mod render;

fn cli() -> Command {
    Command::new("triage")
        .version(triage_core::VERSION)
        .about("Guided troubleshooting over a symptom / diagnostic-action sheet")
        .subcommand_required(true)
        .arg(
            Arg::new("dataset")
                .long("dataset")
                .short('d')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Dataset JSON (overrides the config file)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log verbosity (-v debug, -vv trace)"),
        )
        .subcommand(Command::new("inspect").about("Show inferred column roles and dataset summary"))
        .subcommand(
            Command::new("symptoms")
                .about("List symptoms, optionally filtered")
                .arg(Arg::new("query").help("Case-insensitive filter text")),
        )
        .subcommand(
            Command::new("actions")
                .about("Show diagnostic actions for a symptom")
                .arg(Arg::new("symptom").required(true).help("Symptom id, e.g. S-12")),
        )
        .subcommand(
            Command::new("checklist")
                .about("Confirm a diagnostic action and print its maintenance checklist")
                .arg(Arg::new("symptom").required(true).help("Symptom id, e.g. S-12"))
                .arg(
                    Arg::new("group")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Diagnostic action number as listed by `actions`"),
                ),
        )
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<TriageConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => TriageConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => TriageConfig::default(),
    };
    if let Some(path) = matches.get_one::<PathBuf>("dataset") {
        config = config.with_dataset(path.clone());
    }
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

async fn open_session(config: TriageConfig) -> Result<Session> {
    let Some(path) = config.dataset.clone() else {
        bail!("no dataset given; pass --dataset or set `dataset` in the config file");
    };
    let mut session = Session::new(config);
    if session.load(&FileSource::new(path)).await != SessionStatus::Ready {
        if let Some(err) = session.last_error() {
            let hint = if err.is_retryable() { " (retry may help)" } else { "" };
            bail!("could not load dataset: {err}{hint}");
        }
        bail!("could not load dataset");
    }
    Ok(session)
}

fn emit<T: serde::Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

async fn run(matches: ArgMatches) -> Result<()> {
    let json = matches.get_flag("json");
    let mut session = open_session(load_config(&matches)?).await?;

    match matches.subcommand() {
        Some(("inspect", _)) => {
            let catalog = session.catalog().context("session is not ready")?;
            let summary = catalog.summary();
            emit(json, &summary, || render::summary(&summary))
        }
        Some(("symptoms", args)) => {
            let query = args.get_one::<String>("query").map_or("", String::as_str);
            let hits = session.search(query)?;
            emit(json, &hits, || render::symptoms(&hits, query))
        }
        Some(("actions", args)) => {
            let id = args.get_one::<String>("symptom").context("symptom id is required")?;
            let label = session
                .catalog()
                .and_then(|c| c.index().get(id).map(|d| format!("{id} — {d}")))
                .unwrap_or_else(|| id.clone());
            let resolution = session.select_symptom(id)?;
            emit(json, resolution, || render::actions(&label, resolution))
        }
        Some(("checklist", args)) => {
            let id = args.get_one::<String>("symptom").context("symptom id is required")?;
            let number = *args.get_one::<usize>("group").context("group number is required")?;
            let group = session
                .select_symptom(id)?
                .groups()
                .nth(number.saturating_sub(1))
                .filter(|_| number > 0)
                .map(DiagnosticGroup::group_ref);
            let Some(group) = group else {
                bail!("symptom {id} has no diagnostic action #{number}");
            };
            let plan = session.confirm_group(&group)?;
            emit(json, plan, || render::checklist(plan))
        }
        _ => unreachable!("subcommand is required"),
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    if let Err(err) = run(matches).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
