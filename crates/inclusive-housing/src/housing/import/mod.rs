//! CSV boundary adapter producing canonical listings.

mod normalizer;
mod parser;

pub use normalizer::normalize;
pub use parser::RawListing;

use std::io::Read;
use std::path::Path;

use tracing::info;

use super::domain::Listing;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingField(&'static str),
    InvalidNumber { field: &'static str, value: String },
    Row { row: usize, source: Box<ImportError> },
}

impl ImportError {
    fn at_row(self, row: usize) -> Self {
        Self::Row {
            row,
            source: Box::new(self),
        }
    }
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read listing export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
            ImportError::MissingField(field) => write!(f, "missing required field: {}", field),
            ImportError::InvalidNumber { field, value } => {
                write!(f, "{} is not a valid non-negative amount: {:?}", field, value)
            }
            ImportError::Row { row, source } => write!(f, "row {}: {}", row, source),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::Row { source, .. } => Some(source.as_ref()),
            ImportError::MissingField(_) | ImportError::InvalidNumber { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ListingImporter;

impl ListingImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Listing>, ImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let listings = Self::from_reader(file)?;
        info!(path = %path.display(), listings = listings.len(), "imported listing catalog");
        Ok(listings)
    }

    /// Any row that fails normalization aborts the import and names the row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Listing>, ImportError> {
        parser::parse_records(reader)?
            .into_iter()
            .map(|(row, raw)| normalize(raw).map_err(|err| err.at_row(row)))
            .collect()
    }
}
