//! Golden fixture generation
//!
//! `generate` renders every source in a file set and writes the result next to it:
//!
//!     tests/cases/echo.php  ->  tests/cases/echo.php.tokens   (FixtureKind::Tokens)
//!                           ->  tests/cases/echo.php.tree     (FixtureKind::Tree)
//!
//! A path naming a file is processed as is. A directory is walked depth first, sorted by file
//! name, and only files with the configured extension are kept.
//!
//! Fixture bytes never depend on display settings: tokens fixtures are compact JSON with the full
//! token form, tree fixtures are the indented tree. Each fixture goes to a temporary file in the
//! target directory first and is then renamed over the target, so a fixture on disk is always
//! complete. The first write that fails stops the batch.

use crate::php::config::FixturesConfig;
use crate::php::error::PhpCaseError;
use crate::php::inspect::{read_source, Inspector};
use crate::php::reference::ReferenceTokenizer;
use crate::php::serialize::{JsonStyle, TokenForm};
use crate::php::tolerant::{SyntaxParser, TolerantLexer};
use std::ffi::OsStr;
use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    /// Tolerant token stream
    Tokens,
    /// Tolerant syntax tree
    Tree,
}

impl FixtureKind {
    pub fn suffix(self, config: &FixturesConfig) -> &str {
        match self {
            FixtureKind::Tokens => &config.tokens_suffix,
            FixtureKind::Tree => &config.tree_suffix,
        }
    }
}

/// What a successful batch wrote, in write order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn len(&self) -> usize {
        self.written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

/// Sources below `root` whose extension matches `extension`, ignoring case
pub fn discover(root: &Path, extension: &str) -> Result<Vec<PathBuf>, PhpCaseError> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|source| PhpCaseError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            debug!(target: "phpcase::fixtures", path = %entry.path().display(), "discovered source");
            sources.push(entry.into_path());
        }
    }

    Ok(sources)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// `foo.php` + `.tokens` -> `foo.php.tokens`
pub fn fixture_path(source: &Path, suffix: &str) -> PathBuf {
    let mut path = source.as_os_str().to_os_string();
    path.push(suffix);
    PathBuf::from(path)
}

/// Write fixtures of `kind` for `path`, a file or a directory
pub fn generate<T, L, P>(
    inspector: &Inspector<T, L, P>,
    kind: FixtureKind,
    path: &Path,
    config: &FixturesConfig,
) -> Result<GenerationReport, PhpCaseError>
where
    T: ReferenceTokenizer,
    L: TolerantLexer,
    P: SyntaxParser,
{
    let sources = if path.is_dir() {
        discover(path, &config.extension)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut report = GenerationReport::default();
    for source in &sources {
        let body = render(inspector, kind, source)?;
        let target = fixture_path(source, kind.suffix(config));
        if let Err(err) = write_atomic(&target, &body) {
            error!(target: "phpcase::fixtures", path = %target.display(), "fixture write failed");
            return Err(err);
        }
        info!(target: "phpcase::fixtures", path = %target.display(), "wrote fixture");
        report.written.push(target);
    }

    Ok(report)
}

fn render<T, L, P>(
    inspector: &Inspector<T, L, P>,
    kind: FixtureKind,
    source: &Path,
) -> Result<String, PhpCaseError>
where
    T: ReferenceTokenizer,
    L: TolerantLexer,
    P: SyntaxParser,
{
    debug!(target: "phpcase::fixtures", path = %source.display(), ?kind, "processing source");
    let text = read_source(source)?;
    let body = match kind {
        FixtureKind::Tokens => inspector.scan(&text, JsonStyle::Compact, TokenForm::Full)?,
        FixtureKind::Tree => inspector.parse(&text)?,
    };
    Ok(body)
}

/// Mode for a fixture that does not exist yet
#[cfg(unix)]
fn new_fixture_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_fixture_permissions() -> Option<Permissions> {
    None
}

/// Replace `target` with `body` through a sibling temporary file. An existing target keeps its
/// permissions.
fn write_atomic(target: &Path, body: &str) -> Result<(), PhpCaseError> {
    let write_error = |source| PhpCaseError::FixtureWrite {
        path: target.to_path_buf(),
        source,
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".phpcase-")
        .tempfile_in(dir)
        .map_err(write_error)?;
    let permissions = match fs::metadata(target) {
        Ok(meta) if meta.is_file() => Some(meta.permissions()),
        _ => new_fixture_permissions(),
    };
    if let Some(permissions) = permissions {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(write_error)?;
    }
    temp.write_all(body.as_bytes()).map_err(write_error)?;
    temp.persist(target)
        .map_err(|err| write_error(err.error))?;
    Ok(())
}
