//! Error types for the solver crate.

use thiserror::Error;

/// Main error type for the solver crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("tile {tile} is missing from the board (corrupted search state)")]
    TileNotFound { tile: u8 },

    #[error("expected {expected} cells, got {got} in '{line}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        line: String,
    },

    #[error("invalid cell value '{token}' at position {position}")]
    InvalidCellValue { token: String, position: usize },

    #[error("board must contain exactly one 1, one 2, one 3 and six 0s")]
    InvalidTileSet,
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
