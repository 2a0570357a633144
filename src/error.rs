//! Errors raised while loading stub configuration and scenario suites.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StubError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid suite: {0}")]
    InvalidSuite(String),
}
