//! Manhattan-distance estimate between a board and the goal.

use crate::board::{Board, Tile};
use crate::error::Result;

/// Sum of per-tile Manhattan distances from `board` to `goal`.
///
/// Each of the three tiles contributes |Δrow| + |Δcol|; the blanks
/// contribute nothing. Recomputed from scratch on every call.
pub fn manhattan(board: &Board, goal: &Board) -> Result<u32> {
    let mut distance = 0u32;
    for tile in Tile::ALL {
        let (row, col) = board.locate(tile)?;
        let (goal_row, goal_col) = goal.locate(tile)?;
        distance += (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32;
    }
    Ok(distance)
}
