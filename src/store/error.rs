use std::path::PathBuf;

use snafu::{Location, Snafu};

use crate::model::ModelError;
use crate::Located;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum StoreError {
    #[snafu(display("failed to read `{}`: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to write `{}`: {source}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("`{}` is not a valid list of records: {source}", path.display()))]
    ParseFile {
        path: PathBuf,
        source: serde_json::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to serialize {kind} records: {source}"))]
    Serialize {
        kind: &'static str,
        source: serde_json::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{kind} record #{index} in `{}` is invalid: {source}", path.display()))]
    InvalidRecord {
        kind: &'static str,
        index: usize,
        path: PathBuf,
        source: ModelError,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{kind} with index {index} not found"))]
    NotFound {
        kind: &'static str,
        index: usize,
        #[snafu(implicit)]
        location: Location,
    },
}

impl Located for StoreError {
    fn location(&self) -> Location {
        match self {
            StoreError::ReadFile { location, .. }
            | StoreError::WriteFile { location, .. }
            | StoreError::ParseFile { location, .. }
            | StoreError::Serialize { location, .. }
            | StoreError::InvalidRecord { location, .. }
            | StoreError::NotFound { location, .. } => *location,
        }
    }
}
