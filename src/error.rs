use std::path::PathBuf;

use thiserror::Error;

/// Failures confined to a single schema. The generator logs them and moves on
/// to the next schema; anything else aborts the run.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema '{schema}' has no entry in the replacements map")]
    MissingReplacement { schema: String },
    #[error("interface '{interface}' (schema '{schema}') not found in the table-name sheet")]
    UnknownInterface { schema: String, interface: String },
    #[error("reading schema file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("schema file {path:?} is not valid {encoding}")]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },
    #[error("writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    /// Schemas without a replacement entry are skipped rather than failed.
    pub fn is_skip(&self) -> bool {
        matches!(self, SchemaError::MissingReplacement { .. })
    }
}
