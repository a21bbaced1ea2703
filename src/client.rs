use std::sync::mpsc;

use crate::board::Board;
use crate::game::GameStatus;
use crate::mark::Mark;
use crate::role::Role;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnState {
    AwaitingLocalMove,
    AwaitingRemoteMove,
    GameOver(GameStatus),
}

// The writer half of the peer channel went away. Always fatal to the session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ChannelError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NotableEvent {
    None,
    BoardUpdated,
    GameEnded(GameStatus),
}

// The turn coordinator. Owns the only copy of the board on this side of the
// link; the two copies are kept consistent purely by exchanging full board
// snapshots. Turns alternate by construction of the state machine, there is
// no separate whose-turn flag.
pub struct ClientState {
    my_role: Role,
    board: Board,
    turn_state: TurnState,
    outgoing_tx: mpsc::Sender<Board>,
}

impl ClientState {
    pub fn new(my_role: Role, outgoing_tx: mpsc::Sender<Board>) -> Self {
        let turn_state = match my_role {
            Role::FirstMover => TurnState::AwaitingLocalMove,
            Role::SecondMover => TurnState::AwaitingRemoteMove,
        };
        ClientState {
            my_role,
            board: Board::new(),
            turn_state,
            outgoing_tx,
        }
    }

    pub fn my_role(&self) -> Role { self.my_role }
    pub fn my_mark(&self) -> Mark { self.my_role.my_mark() }
    pub fn board(&self) -> &Board { &self.board }
    pub fn turn_state(&self) -> TurnState { self.turn_state }

    // Applies a local move. A move made out of turn or into an invalid cell
    // (bad position, occupied) is ignored without changing any state: the
    // caller simply redraws the board and prompt.
    pub fn make_turn(&mut self, pos: u8) -> Result<NotableEvent, ChannelError> {
        if self.turn_state != TurnState::AwaitingLocalMove {
            return Ok(NotableEvent::None);
        }
        if self.board.apply_position(pos, self.my_mark()).is_err() {
            return Ok(NotableEvent::None);
        }
        self.outgoing_tx.send(self.board.clone()).map_err(|_| ChannelError)?;
        Ok(self.update_turn_state(TurnState::AwaitingRemoteMove))
    }

    // Adopts a board received from the peer wholesale. The peer already
    // validated its own move and the board is the single source of truth.
    // Outside of `AwaitingRemoteMove` (impossible with a well-behaved peer)
    // the update is dropped; in particular, game over is terminal.
    pub fn process_remote_board(&mut self, board: Board) -> NotableEvent {
        if self.turn_state != TurnState::AwaitingRemoteMove {
            return NotableEvent::None;
        }
        self.board = board;
        self.update_turn_state(TurnState::AwaitingLocalMove)
    }

    fn update_turn_state(&mut self, next: TurnState) -> NotableEvent {
        match self.board.status() {
            GameStatus::Active => {
                self.turn_state = next;
                NotableEvent::BoardUpdated
            }
            status => {
                self.turn_state = TurnState::GameOver(status);
                NotableEvent::GameEnded(status)
            }
        }
    }
}
