use thiserror::Error;

/// Failure reported by a cross-section provider for a single lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("unknown element: {0}")]
    UnknownElement(String),
    #[error("energy {energy_kev} keV out of range [{min_kev}, {max_kev}] keV")]
    EnergyOutOfRange {
        energy_kev: f64,
        min_kev: f64,
        max_kev: f64,
    },
    #[error("table error: {0}")]
    TableError(String),
}

/// Failure loading a cross-section table from disk or from a blob.
#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("failed to read table {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] xafsprep_data::ParseError),
    #[error("failed to decompress table: {0}")]
    Decompress(String),
    #[error("failed to decode table: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("no samples have been created yet")]
    NoSamples,
    #[error("no sample with ID {id} (valid IDs are 0..{len})")]
    InvalidId { id: usize, len: usize },
    #[error("bad command name '{0}'")]
    BadCommand(String),
    #[error("bad subcommand '{0}' under command 'sample'")]
    BadSubcommand(String),
    #[error("{0}")]
    Validation(String),
    #[error("density has not been set for sample '{0}'")]
    MissingDensity(String),
    #[error("invalid computation: {0}")]
    InvalidComputation(String),
    #[error("cross-section lookup failed for '{element}': {source}")]
    Provider {
        element: String,
        #[source]
        source: LookupError,
    },
    #[error("command cancelled")]
    Cancelled,
    #[error("end of input")]
    EndOfInput,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PrepError>;
