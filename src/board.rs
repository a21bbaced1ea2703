use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::coord::{Col, Coord, NUM_COLS, NUM_ROWS, Row};
use crate::mark::Mark;


pub const EMPTY_MARKER: char = ' ';

// Row-major grid of single-character cell markers: ' ', 'X' or 'O'. This is
// the entire message payload exchanged between peers: the full board after
// every accepted move, never a diff.
pub type BoardSnapshot = [[char; NUM_COLS as usize]; NUM_ROWS as usize];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InvalidMove {
    PositionOutOfRange(u8),
    CellOccupied(Coord),
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BoardSnapshot", try_from = "BoardSnapshot")]
pub struct Board {
    cells: [[Option<Mark>; NUM_COLS as usize]; NUM_ROWS as usize],
}

impl Board {
    pub fn new() -> Self {
        Board { cells: Default::default() }
    }

    pub fn get(&self, coord: Coord) -> Option<Mark> {
        self.cells[coord.row.to_zero_based() as usize][coord.col.to_zero_based() as usize]
    }

    // A cell transitions empty -> occupied exactly once and never back.
    pub fn apply_move(&mut self, coord: Coord, mark: Mark) -> Result<(), InvalidMove> {
        if self.get(coord).is_some() {
            return Err(InvalidMove::CellOccupied(coord));
        }
        self.cells[coord.row.to_zero_based() as usize][coord.col.to_zero_based() as usize] =
            Some(mark);
        Ok(())
    }

    pub fn apply_position(&mut self, pos: u8, mark: Mark) -> Result<(), InvalidMove> {
        self.apply_move(Coord::from_position(pos)?, mark)
    }

    pub fn is_full(&self) -> bool { Coord::all().all(|coord| self.get(coord).is_some()) }

    pub fn marker_at(&self, coord: Coord) -> char {
        self.get(coord).map_or(EMPTY_MARKER, Mark::to_char)
    }
}

impl From<Board> for BoardSnapshot {
    fn from(board: Board) -> Self {
        board.cells.map(|row| row.map(|cell| cell.map_or(EMPTY_MARKER, Mark::to_char)))
    }
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = String;
    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let mut board = Board::new();
        for coord in Coord::all() {
            let row = coord.row.to_zero_based() as usize;
            let col = coord.col.to_zero_based() as usize;
            board.cells[row][col] = match snapshot[row][col] {
                EMPTY_MARKER => None,
                marker => Some(Mark::try_from(marker)?),
            };
        }
        Ok(board)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Board [{}]",
            Row::all()
                .map(|row| {
                    let markers: String =
                        Col::all().map(|col| self.marker_at(Coord::new(row, col))).collect();
                    format!("{markers:?}")
                })
                .join(", ")
        )
    }
}
