use crate::board::InvalidMove;


pub const NUM_ROWS: u8 = 3;
pub const NUM_COLS: u8 = 3;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Row {
    idx: u8, // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(Self::from_zero_based)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Col {
    idx: u8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_COLS);
        Self { idx }
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_COLS).map(Self::from_zero_based)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Coord { row, col } }

    // Maps a 1-based cell position (the keys players press) to the grid:
    // 1 2 3
    // 4 5 6
    // 7 8 9
    pub fn from_position(pos: u8) -> Result<Self, InvalidMove> {
        if !(1..=9).contains(&pos) {
            return Err(InvalidMove::PositionOutOfRange(pos));
        }
        Ok(Coord::new(
            Row::from_zero_based((pos - 1) / NUM_COLS),
            Col::from_zero_based((pos - 1) % NUM_COLS),
        ))
    }

    pub fn to_position(self) -> u8 {
        self.row.to_zero_based() * NUM_COLS + self.col.to_zero_based() + 1
    }

    // Row-major scan order.
    pub fn all() -> impl Iterator<Item = Self> {
        Row::all().flat_map(|row| Col::all().map(move |col| Coord::new(row, col)))
    }

    pub fn shift(self, (d_row, d_col): (i8, i8)) -> Option<Coord> {
        let row = self.row.to_zero_based() as i8 + d_row;
        let col = self.col.to_zero_based() as i8 + d_col;
        if (0..NUM_ROWS as i8).contains(&row) && (0..NUM_COLS as i8).contains(&col) {
            Some(Coord::new(Row::from_zero_based(row as u8), Col::from_zero_based(col as u8)))
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_mapping_is_a_bijection() {
        let coords: Vec<_> = (1..=9).map(|pos| Coord::from_position(pos).unwrap()).collect();
        assert_eq!(coords, Coord::all().collect::<Vec<_>>());
        for pos in 1..=9 {
            assert_eq!(Coord::from_position(pos).unwrap().to_position(), pos);
        }
    }

    #[test]
    fn position_bounds() {
        assert!(Coord::from_position(0).is_err());
        assert!(Coord::from_position(10).is_err());
    }

    #[test]
    fn position_to_row_col() {
        let coord = Coord::from_position(6).unwrap();
        assert_eq!((coord.row.to_zero_based(), coord.col.to_zero_based()), (1, 2));
        let coord = Coord::from_position(7).unwrap();
        assert_eq!((coord.row.to_zero_based(), coord.col.to_zero_based()), (2, 0));
    }

    #[test]
    fn shift_stays_on_board() {
        let center = Coord::from_position(5).unwrap();
        assert_eq!(center.shift((1, 1)), Some(Coord::from_position(9).unwrap()));
        let corner = Coord::from_position(9).unwrap();
        assert_eq!(corner.shift((1, 0)), None);
        assert_eq!(corner.shift((0, 1)), None);
    }
}
