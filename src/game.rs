use crate::board::Board;
use crate::coord::Coord;
use crate::mark::Mark;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Active,
    Victory(Mark),
    Draw,
}

// Directions probed from each scan origin, in order: vertical, diagonal
// down-right, horizontal, diagonal down-left. Every winning line is found
// from its first cell in row-major order, so forward directions suffice.
const LINE_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (1, 1), (0, 1), (1, -1)];

impl Board {
    // Derives the game status from the grid alone: no caching, no state.
    // At most one mark can own a complete line in a legal game, so the
    // scan order does not affect the result.
    pub fn status(&self) -> GameStatus {
        for origin in Coord::all() {
            let Some(mark) = self.get(origin) else {
                continue;
            };
            for dir in LINE_DIRECTIONS {
                if self.line_complete(origin, dir, mark) {
                    return GameStatus::Victory(mark);
                }
            }
        }
        if self.is_full() { GameStatus::Draw } else { GameStatus::Active }
    }

    fn line_complete(&self, origin: Coord, dir: (i8, i8), mark: Mark) -> bool {
        let mut coord = origin;
        for _ in 0..2 {
            let Some(next) = coord.shift(dir) else {
                return false;
            };
            if self.get(next) != Some(mark) {
                return false;
            }
            coord = next;
        }
        true
    }
}
