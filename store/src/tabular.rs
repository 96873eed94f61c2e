//! Reader for the comma-delimited exports both seeding pipelines consume.

use std::io::Read;

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input has no header row")]
    MissingHeader,
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Header-validated reader over delimited text.
///
/// Construction fails if the input carries no header row. Data rows are
/// yielded in input order; blank lines are skipped by the underlying parser.
pub struct TabularReader<R: Read> {
    inner: csv::Reader<R>,
}

impl<R: Read> TabularReader<R> {
    pub fn from_reader(input: R) -> Result<Self, ParseError> {
        let mut inner = csv::Reader::from_reader(input);
        let headers = inner.headers()?;
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ParseError::MissingHeader);
        }
        Ok(Self { inner })
    }

    /// Typed rows, one `Result` per data row.
    ///
    /// Errors are row-scoped: a row whose field count does not match the
    /// header fails on its own while later rows stay readable, so callers can
    /// count and skip bad rows without aborting the batch. Columns absent
    /// from `T` are ignored.
    pub fn rows<T: DeserializeOwned>(self) -> impl Iterator<Item = Result<T, ParseError>> {
        self.inner
            .into_deserialize()
            .map(|row| row.map_err(ParseError::from))
    }
}
