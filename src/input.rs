use crate::error::InputError;
use crate::types::{Board, Detail, DetailRequest};

/// Largest board the occupancy grid is built for (one byte per cell).
pub const MAX_BOARD_CELLS: u64 = 25_000_000;

/// Largest number of physical pieces accepted in one run.
pub const MAX_PIECES: u64 = 10_000;

/// Parses `WxH`, e.g. `2440x1220`.
pub fn parse_dimensions(s: &str) -> Result<(u32, u32), InputError> {
    let Some((w, h)) = s.split_once('x') else {
        return Err(InputError::Dimensions(s.to_string()));
    };
    let width = parse_positive(w, "width", s)?;
    let height = parse_positive(h, "height", s)?;
    Ok((width, height))
}

pub fn parse_board(s: &str) -> Result<Board, InputError> {
    let (width, height) = parse_dimensions(s)?;
    Ok(Board::new(width, height))
}

/// Parses `NAME:WxH:QTY`. The name may itself contain colons.
pub fn parse_detail(s: &str) -> Result<DetailRequest, InputError> {
    let mut parts = s.rsplitn(3, ':');
    let (Some(qty), Some(dims), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(InputError::Detail(s.to_string()));
    };
    if name.trim().is_empty() {
        return Err(InputError::EmptyName(s.to_string()));
    }
    let (width, height) = parse_dimensions(dims)?;
    let quantity = parse_positive(qty, "quantity", s)?;
    Ok(DetailRequest {
        name: name.to_string(),
        width,
        height,
        quantity,
    })
}

/// Checks the values a caller may have built without going through the
/// parsers (e.g. from JSON) before they reach the search.
pub fn validate(board: &Board, requests: &[DetailRequest]) -> Result<(), InputError> {
    if board.width == 0 || board.height == 0 {
        return Err(InputError::Zero {
            field: "board dimension",
            input: board.to_string(),
        });
    }
    if board.area() > MAX_BOARD_CELLS {
        return Err(InputError::BoardTooLarge {
            board: *board,
            max_cells: MAX_BOARD_CELLS,
        });
    }
    let count: u64 = requests.iter().map(|r| r.quantity as u64).sum();
    if count > MAX_PIECES {
        return Err(InputError::TooManyPieces {
            count,
            max_pieces: MAX_PIECES,
        });
    }
    for r in requests {
        let label = format!("{}:{}x{}:{}", r.name, r.width, r.height, r.quantity);
        if r.name.trim().is_empty() {
            return Err(InputError::EmptyName(label));
        }
        if r.width == 0 || r.height == 0 {
            return Err(InputError::Zero {
                field: "detail dimension",
                input: label,
            });
        }
        if r.quantity == 0 {
            return Err(InputError::Zero {
                field: "quantity",
                input: label,
            });
        }
        if !Detail::new(&r.name, r.width, r.height).fits_in(board) {
            return Err(InputError::DoesNotFit {
                name: r.name.clone(),
                width: r.width,
                height: r.height,
                board: *board,
            });
        }
    }
    Ok(())
}

fn parse_positive(value: &str, field: &'static str, input: &str) -> Result<u32, InputError> {
    let n = value.trim().parse::<u32>().map_err(|_| InputError::Number {
        field,
        input: input.to_string(),
    })?;
    if n == 0 {
        return Err(InputError::Zero {
            field,
            input: input.to_string(),
        });
    }
    Ok(n)
}
