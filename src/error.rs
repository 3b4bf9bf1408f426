use thiserror::Error;

/// Top-level error type for the Gauss-Jordan reduction engine.
#[derive(Debug, Error, PartialEq)]
pub enum GaussJordanError {
    #[error(transparent)]
    System(#[from] SystemError),

    #[error(transparent)]
    Numeric(#[from] NumericError),
}

/// Errors related to building or mutating a linear system.
#[derive(Debug, Error, PartialEq)]
pub enum SystemError {
    #[error("row {row} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
        row: usize,
    },

    #[error("{what} has length {found}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("augmented matrix has no right-hand side column")]
    MissingRhs,

    #[error("a linear system needs at least one equation to infer its dimension")]
    EmptySystem,

    #[error("row index {row} is out of range for a system of {len} rows")]
    RowOutOfRange { row: usize, len: usize },

    #[error("cannot scale row {row} by zero")]
    DegenerateScale { row: usize },

    #[error("cannot add a multiple of row {row} to itself")]
    SelfCombination { row: usize },
}

/// Errors raised by the numeric side of the reduction.
#[derive(Debug, Error, PartialEq)]
pub enum NumericError {
    #[error("pivot of row {row} at column {col} is negligible ({value:e})")]
    NegligiblePivot { row: usize, col: usize, value: f64 },
}

/// Convenience type alias for results using [`GaussJordanError`].
pub type Result<T> = std::result::Result<T, GaussJordanError>;
