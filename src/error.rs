use thiserror::Error;

use crate::types::Board;

/// Rejected user input. Raised before any search starts; the search itself
/// never fails with an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid dimensions '{0}', expected WxH")]
    Dimensions(String),

    #[error("invalid {field} in '{input}'")]
    Number { field: &'static str, input: String },

    #[error("{field} must be non-zero in '{input}'")]
    Zero { field: &'static str, input: String },

    #[error("invalid detail '{0}', expected NAME:WxH:QTY")]
    Detail(String),

    #[error("detail name must not be empty in '{0}'")]
    EmptyName(String),

    #[error("board {board} has more than {max_cells} cells")]
    BoardTooLarge { board: Board, max_cells: u64 },

    #[error("{count} pieces requested, at most {max_pieces} are allowed")]
    TooManyPieces { count: u64, max_pieces: u64 },

    #[error("detail {name} {width}x{height} does not fit on board {board}")]
    DoesNotFit {
        name: String,
        width: u32,
        height: u32,
        board: Board,
    },
}
