//! Command dispatch
//!
//! Maps a command name and a path onto a workflow. Validation happens before any work: an unknown
//! command, a path that does not exist, or a directory given to a single-file command is a
//! [PhpCaseError::Usage] and nothing is written.
//!
//!     scan            file          tolerant token array
//!     tokens          file          banner + normalized reference tokens
//!     parse           file | dir    tree, or "path\ntree" for every source in the directory
//!     gencase-tokens  file | dir    writes .tokens fixtures
//!     gencase-parser  file | dir    writes .tree fixtures

use crate::php::config::PhpCaseConfig;
use crate::php::error::PhpCaseError;
use crate::php::fixtures::{self, FixtureKind, GenerationReport};
use crate::php::inspect::{Inspector, Mode};
use crate::php::reference::ReferenceTokenizer;
use crate::php::tolerant::{SyntaxParser, TolerantLexer};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Scan,
    Parse,
    Tokens,
    GencaseParser,
    GencaseTokens,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Scan,
        Command::Parse,
        Command::Tokens,
        Command::GencaseParser,
        Command::GencaseTokens,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Scan => "scan",
            Command::Parse => "parse",
            Command::Tokens => "tokens",
            Command::GencaseParser => "gencase-parser",
            Command::GencaseTokens => "gencase-tokens",
        }
    }

    /// Whether the command also accepts a directory
    pub fn accepts_directory(self) -> bool {
        !matches!(self, Command::Scan | Command::Tokens)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = PhpCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Command::ALL.iter().map(|c| c.name()).collect();
                PhpCaseError::Usage(format!(
                    "unknown command `{s}` (expected one of: {})",
                    names.join(", ")
                ))
            })
    }
}

/// Check that `path` suits `command`
pub fn validate(command: Command, path: &Path) -> Result<(), PhpCaseError> {
    if !path.exists() {
        return Err(PhpCaseError::Usage(format!(
            "path `{}` does not exist",
            path.display()
        )));
    }
    if path.is_dir() && !command.accepts_directory() {
        return Err(PhpCaseError::Usage(format!(
            "`{command}` takes a single file, `{}` is a directory",
            path.display()
        )));
    }
    Ok(())
}

/// Run `command` on `path`, writing any dump to `out`
pub fn dispatch<W: Write>(
    command: Command,
    path: &Path,
    config: &PhpCaseConfig,
    out: &mut W,
) -> Result<(), PhpCaseError> {
    let inspector = Inspector::builtin()
        .with_json_style(config.scan.json_style())
        .with_token_form(config.scan.token_form);
    run(&inspector, command, path, config, out)
}

/// [dispatch] with a caller-supplied inspector
pub fn run<T, L, P, W>(
    inspector: &Inspector<T, L, P>,
    command: Command,
    path: &Path,
    config: &PhpCaseConfig,
    out: &mut W,
) -> Result<(), PhpCaseError>
where
    T: ReferenceTokenizer,
    L: TolerantLexer,
    P: SyntaxParser,
    W: Write,
{
    validate(command, path)?;

    match command {
        Command::Scan => emit(out, &inspector.inspect(path, Mode::Scan)?),
        Command::Tokens => emit(out, &inspector.inspect(path, Mode::Tokens)?),
        Command::Parse if path.is_dir() => {
            for source in fixtures::discover(path, &config.fixtures.extension)? {
                emit(out, &source.display().to_string())?;
                emit(out, &inspector.inspect(&source, Mode::Parse)?)?;
            }
            Ok(())
        }
        Command::Parse => emit(out, &inspector.inspect(path, Mode::Parse)?),
        Command::GencaseTokens => {
            let report = fixtures::generate(inspector, FixtureKind::Tokens, path, &config.fixtures)?;
            log_report(command, &report);
            Ok(())
        }
        Command::GencaseParser => {
            let report = fixtures::generate(inspector, FixtureKind::Tree, path, &config.fixtures)?;
            log_report(command, &report);
            Ok(())
        }
    }
}

/// Write `text` as whole lines; a trailing line break is only added when missing
fn emit<W: Write>(out: &mut W, text: &str) -> Result<(), PhpCaseError> {
    let result = if text.ends_with('\n') {
        write!(out, "{text}")
    } else {
        writeln!(out, "{text}")
    };
    result.map_err(PhpCaseError::Output)
}

fn log_report(command: Command, report: &GenerationReport) {
    info!(target: "phpcase::fixtures", %command, count = report.len(), "fixtures generated");
}
