//! Command-line interface for phpcase
//! Inspects what the PHP tokenizers and the tolerant parser make of a file, and generates the
//! golden fixtures the parser test-suite compares against.
//!
//! Usage:
//!   phpcase scan `<file>`                 - Tolerant token array as JSON
//!   phpcase tokens `<file>`               - Reference tokens, one line break per token
//!   phpcase parse `<file|dir>`            - Tolerant syntax tree as indented JSON
//!   phpcase gencase-tokens `<file|dir>`   - Write `.tokens` fixtures next to the sources
//!   phpcase gencase-parser `<file|dir>`   - Write `.tree` fixtures next to the sources
//!
//! Every failure, usage errors included, exits with status 1.

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use phpcase::php::config::{Loader, PhpCaseConfig};
use phpcase::php::{dispatch, Command, PhpCaseError};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PHPCASE_LOG";

fn cli() -> ClapCommand {
    ClapCommand::new("phpcase")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect PHP tokenizer/parser output and generate golden fixtures")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Pretty-print the JSON written by `scan`"),
        )
        .arg(
            Arg::new("short-tokens")
                .long("short-tokens")
                .action(ArgAction::SetTrue)
                .help("Emit {kind, textLength} tokens from `scan`"),
        )
        .arg(
            Arg::new("command")
                .help("scan, tokens, parse, gencase-tokens or gencase-parser")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("path")
                .help("Source file, or a directory for parse and the gencase commands")
                .required(true)
                .index(2),
        )
}

fn main() {
    let matches = cli().try_get_matches().unwrap_or_else(|e| {
        // --help and --version land here too, and are not failures
        if e.use_stderr() {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        let _ = e.print();
        std::process::exit(0);
    });

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        if e.is_usage() {
            eprintln!("\n{}", cli().render_usage());
        }
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), PhpCaseError> {
    let config = load_config(matches)?;
    init_tracing(&config);

    let command: Command = matches
        .get_one::<String>("command")
        .map(String::as_str)
        .unwrap_or_default()
        .parse()?;
    let path = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_default();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch(command, &path, &config, &mut out)?;
    out.flush().map_err(PhpCaseError::Output)
}

fn load_config(matches: &ArgMatches) -> Result<PhpCaseConfig, PhpCaseError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("pretty") {
        loader = loader.set_override("scan.pretty", true)?;
    }
    if matches.get_flag("short-tokens") {
        loader = loader.set_override("scan.token_form", "short")?;
    }
    Ok(loader.build()?)
}

/// Log to stderr, filtered by PHPCASE_LOG or else the configured level
fn init_tracing(config: &PhpCaseConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_str()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}
