use crate::mark::Mark;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    // Initiates the connection and makes the opening move.
    FirstMover,

    // Accepts the connection and waits for the opening move.
    SecondMover,
}

impl Role {
    pub fn my_mark(self) -> Mark {
        match self {
            Role::FirstMover => Mark::Cross,
            Role::SecondMover => Mark::Nought,
        }
    }
}
