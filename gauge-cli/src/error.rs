use thiserror::Error;
use gauge_core::ConversionError;
use gauge_units::{CatalogError, UnknownDimension};

use crate::format::InputError;

/// Everything the binary can report. Each kind keeps its own message;
/// an unknown unit is never presented as a bad number.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Input(#[from] InputError),

    #[error("{0}")]
    Conversion(#[from] ConversionError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Dimension(#[from] UnknownDimension),
}

impl CliError {
    /// Short title for the error, used in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Input(_) => "Invalid Input",
            CliError::Conversion(_) => "Conversion Error",
            CliError::Catalog(_) => "Catalog Error",
            CliError::Dimension(_) => "Unknown Dimension",
        }
    }
}
