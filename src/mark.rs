use strum::EnumIter;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter)]
pub enum Mark {
    Cross,
    Nought,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::Cross => Mark::Nought,
            Mark::Nought => Mark::Cross,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::Cross => 'X',
            Mark::Nought => 'O',
        }
    }

    pub fn from_char(ch: char) -> Option<Mark> {
        match ch {
            'X' => Some(Mark::Cross),
            'O' => Some(Mark::Nought),
            _ => None,
        }
    }
}

// Used when decoding a board snapshot received from the peer.
impl TryFrom<char> for Mark {
    type Error = String;
    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Mark::from_char(ch).ok_or_else(|| format!("Invalid cell marker: {ch:?}"))
    }
}
