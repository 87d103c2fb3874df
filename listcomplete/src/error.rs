//! Errors raised while reading a data source.
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a whole source. Problems confined to one row never surface
/// here; they are counted and skipped by the builder.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read spreadsheet {}: {source}", .path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("spreadsheet {} has no sheet {sheet}", .path.display())]
    MissingSheet { path: PathBuf, sheet: String },

    #[error("workbook {} contains no worksheets", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("cannot infer the format of {}; set `format` explicitly", .0.display())]
    UnknownFormat(PathBuf),

    #[error("invalid source `{0}`: expected KIND=PATH")]
    InvalidSpec(String),

    #[error("unknown source kind `{0}`")]
    UnknownKind(String),

    #[error("ingestion worker panicked")]
    WorkerPanicked,
}
