//! Error type shared by the inspector, the fixture harness and the dispatcher

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhpCaseError {
    /// Bad invocation, nothing has been done yet
    #[error("usage error: {0}")]
    Usage(String),

    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Aborts the rest of a fixture batch
    #[error("cannot write fixture {}: {source}", path.display())]
    FixtureWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("cannot write output: {0}")]
    Output(#[source] io::Error),
}

impl PhpCaseError {
    pub fn is_usage(&self) -> bool {
        matches!(self, PhpCaseError::Usage(_))
    }
}
