//! Lantern CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use lantern_runtime::{Repl, RustylineEditor, ScriptedEditor, SessionConfig, TurnStatus, demo};

/// CLI errors.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("invalid {flag} value: {value}")]
    InvalidValue { flag: &'static str, value: String },
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error(transparent)]
    Lantern(#[from] lantern_foundation::Error),
}

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    batch: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
    trace: bool,
    no_banner: bool,
    max_turns: Option<u64>,
    suggest: bool,
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(TurnStatus::Fatal { .. }) => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &'static str) -> Result<&'a str, CliError> {
    *i += 1;
    args.get(*i).map(String::as_str).ok_or(CliError::MissingValue(flag))
}

fn number(args: &[String], i: &mut usize, flag: &'static str) -> Result<u64, CliError> {
    let raw = value(args, i, flag)?;
    raw.parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: raw.to_string(),
    })
}

fn parse_args(args: &[String]) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch = Some(PathBuf::from(value(args, &mut i, "--batch")?)),
            "--trace" => config.trace = true,
            "--no-banner" => config.no_banner = true,
            "--suggest" => config.suggest = true,
            "--max-turns" => config.max_turns = Some(number(args, &mut i, "--max-turns")?),
            "--seed" => config.seed = Some(number(args, &mut i, "--seed")?),
            other => return Err(CliError::UnknownOption(other.to_string())),
        }
        i += 1;
    }

    Ok(config)
}

fn init_logging(trace: bool) {
    let env = env_logger::Env::default().default_filter_or(if trace { "lantern=debug" } else { "warn" });
    let mut builder = env_logger::Builder::from_env(env);
    if trace {
        for target in ["lantern_parser", "lantern_engine", "lantern_runtime"] {
            builder.filter_module(target, log::LevelFilter::Debug);
        }
    }
    builder.format_timestamp(None).init();
}

fn run(args: Vec<String>) -> Result<TurnStatus, CliError> {
    let cli = parse_args(&args)?;

    if cli.show_help {
        print_help();
        return Ok(TurnStatus::Quit);
    }
    if cli.show_version {
        println!("lantern {}", env!("CARGO_PKG_VERSION"));
        return Ok(TurnStatus::Quit);
    }

    init_logging(cli.trace);

    let base = if cli.batch.is_some() {
        SessionConfig::batch()
    } else {
        SessionConfig::new()
    };
    let config = base
        .with_banner(!cli.no_banner && cli.batch.is_none())
        .with_suggestions(cli.suggest)
        .with_max_turns(cli.max_turns);

    let session = demo::new_session(config, cli.seed.unwrap_or(demo::DEFAULT_SEED))?;
    let opening = demo::opening(session.world());

    let status = match &cli.batch {
        Some(script) => Repl::new(session, ScriptedEditor::from_file(script)?)
            .with_opening(opening)
            .run()?,
        None => Repl::new(session, RustylineEditor::new()?).with_opening(opening).run()?,
    };
    Ok(status)
}

fn print_help() {
    println!(
        "\x1b[1mLantern\x1b[0m - a small text adventure

\x1b[1mUSAGE:\x1b[0m
    lantern [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help          Print help information
    -V, --version       Print version information
    -b, --batch FILE    Replay commands from FILE, one per line
    --no-banner         Skip the opening text
    --suggest           Suggest close words for unknown ones
    --max-turns N       Stop after N turns
    --seed N            Seed for combat rolls
    --trace             Log parser and dispatch decisions to stderr

\x1b[1mIN-GAME:\x1b[0m
    save [FILE]         Save the game (default lantern.sav)
    restore [FILE]      Restore a saved game
    quit                Leave
    Ctrl+D              Leave"
    );
}
