use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown text encoding {0:?}")]
    UnknownEncoding(String),

    #[error("{path:?} is not valid {encoding} text")]
    Decoding {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("column {0:?} is missing from the catalog header")]
    MissingColumn(String),

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("rate {code} has a non-decimal value {value:?}")]
    InvalidRate { code: String, value: String },
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}
