//! Move generation under the tile-into-blank movement rule.
//!
//! A tile may slide one step up, down, left, or right, and only into a
//! blank cell; it never displaces another tile. Vertical moves cost 1,
//! horizontal moves cost 2.

use std::fmt;

use smallvec::SmallVec;

use crate::board::{Board, Tile, SIDE};
use crate::error::Result;
use crate::heuristic::manhattan;

/// A move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order for expansion. Children enter the frontier in
    /// this order, so it feeds the tie-break on equal f scores.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, col) displacement of a one-step move.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Fixed cost schedule: vertical moves cost 1, horizontal 2.
    pub fn cost(self) -> u32 {
        match self {
            Direction::Up | Direction::Down => 1,
            Direction::Left | Direction::Right => 2,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Direction::Up => "U",
            Direction::Down => "D",
            Direction::Left => "L",
            Direction::Right => "R",
        };
        write!(f, "{}", letter)
    }
}

/// The move that produced a search node: which tile went where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub tile: Tile,
    pub direction: Direction,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile {} {}", self.tile, self.direction)
    }
}

/// One legal child produced by expanding a board.
#[derive(Debug, Clone, Copy)]
pub struct Expansion {
    pub board: Board,
    pub direction: Direction,
    /// Cost of the move that produced this child.
    pub cost: u32,
    /// Manhattan distance from the child board to the goal.
    pub heuristic: u32,
}

/// Expand `board` by sliding `tile` one step in every legal direction.
///
/// A direction is legal when the target cell is inside the grid and
/// blank. Children come back in `Direction::ALL` order, at most one
/// per direction.
pub fn expand(board: &Board, goal: &Board, tile: Tile) -> Result<SmallVec<[Expansion; 4]>> {
    let (row, col) = board.locate(tile)?;
    let mut children = SmallVec::new();
    for direction in Direction::ALL {
        let (d_row, d_col) = direction.delta();
        let target_row = row as i32 + d_row;
        let target_col = col as i32 + d_col;
        if target_row < 0
            || target_row >= SIDE as i32
            || target_col < 0
            || target_col >= SIDE as i32
        {
            continue;
        }
        let target = (target_row as usize, target_col as usize);
        if !board.is_blank(target.0, target.1) {
            continue;
        }
        let child = board.with_swap((row, col), target);
        children.push(Expansion {
            board: child,
            direction,
            cost: direction.cost(),
            heuristic: manhattan(&child, goal)?,
        });
    }
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(line: &str) -> Board {
        line.parse().unwrap()
    }

    fn goal() -> Board {
        board("0 0 0 0 1 2 0 0 3")
    }

    #[test]
    fn test_direction_costs() {
        assert_eq!(Direction::Up.cost(), 1);
        assert_eq!(Direction::Down.cost(), 1);
        assert_eq!(Direction::Left.cost(), 2);
        assert_eq!(Direction::Right.cost(), 2);
    }

    #[test]
    fn test_move_label() {
        let m = Move {
            tile: Tile::Two,
            direction: Direction::Left,
        };
        assert_eq!(m.to_string(), "Tile 2 L");
    }

    #[test]
    fn test_expand_respects_bounds_and_blanks() {
        // Tile 1 sits in the corner: U and L run off the grid, D and R
        // both land on blanks.
        let b = board("1 0 2 0 3 0 0 0 0");
        let children = expand(&b, &goal(), Tile::One).unwrap();
        let dirs: Vec<Direction> = children.iter().map(|c| c.direction).collect();
        assert_eq!(dirs, vec![Direction::Down, Direction::Right]);
        assert_eq!(children[0].cost, 1);
        assert_eq!(children[1].cost, 2);
    }

    #[test]
    fn test_expand_children_in_direction_order() {
        // Tile 2 at (1,2) with blanks above, below, and to the left.
        let b = board("0 3 0 1 0 2 0 0 0");
        let children = expand(&b, &goal(), Tile::Two).unwrap();
        let dirs: Vec<Direction> = children.iter().map(|c| c.direction).collect();
        assert_eq!(dirs, vec![Direction::Up, Direction::Down, Direction::Left]);
    }

    #[test]
    fn test_expand_blocked_by_other_tiles() {
        // Tile 3 at (1,1) flanked by tiles 1 and 2; only U and D open.
        let b = board("0 0 0 1 3 2 0 0 0");
        let children = expand(&b, &goal(), Tile::Three).unwrap();
        let dirs: Vec<Direction> = children.iter().map(|c| c.direction).collect();
        assert_eq!(dirs, vec![Direction::Up, Direction::Down]);
    }

    #[test]
    fn test_expand_boxed_in_tile_yields_nothing() {
        // Tile 1 in the corner with tiles on both open sides.
        let b = board("1 2 0 3 0 0 0 0 0");
        let children = expand(&b, &goal(), Tile::One).unwrap();
        assert!(children.is_empty());
    }

    #[test]
    fn test_expand_never_reproduces_parent() {
        let b = board("0 0 0 1 0 2 0 3 0");
        for tile in Tile::ALL {
            for child in expand(&b, &goal(), tile).unwrap() {
                assert_ne!(child.board, b);
            }
        }
    }

    #[test]
    fn test_expand_child_heuristic_matches_manhattan() {
        let b = board("1 0 2 0 3 0 0 0 0");
        for child in expand(&b, &goal(), Tile::One).unwrap() {
            assert_eq!(child.heuristic, manhattan(&child.board, &goal()).unwrap());
        }
    }
}
