use std::fmt;
use std::io;
use std::net::TcpStream;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::{cursor, event as term_event, execute, style, terminal};
use scopeguard::defer;
use tictactoe::board::Board;
use tictactoe::client::{ClientState, TurnState};
use tictactoe::role::Role;

use crate::network::{self, CommunicationError};
use crate::tui;


// Local keystrokes buffer here while a network receive is in flight. The
// bound only ever back-pressures the producer threads; the consumer always
// drains.
const EVENT_QUEUE_SIZE: usize = 100;

pub struct GameConfig {
    pub role: Role,
    pub stream: TcpStream,
}

enum IncomingEvent {
    Network(Board),
    Terminal(term_event::Event),
    NetworkDown(CommunicationError),
    Tick,
}

enum EventOutcome {
    Continue,
    Quit,
    ChannelLost(CommunicationError),
}

fn incoming_channel() -> (mpsc::SyncSender<IncomingEvent>, mpsc::Receiver<IncomingEvent>) {
    mpsc::sync_channel(EVENT_QUEUE_SIZE)
}

// One step of the event loop: applies the event to the coordinator and,
// after a remote update, drains keystrokes that were queued while the
// receive was blocking — they targeted a board that no longer exists, so
// they are discarded and the player is re-prompted. A channel failure
// always terminates, even when it was queued behind other events.
fn process_event(
    client_state: &mut ClientState, rx: &mpsc::Receiver<IncomingEvent>, event: IncomingEvent,
) -> EventOutcome {
    match event {
        IncomingEvent::Network(board) => {
            client_state.process_remote_board(board);
            while let Ok(stale) = rx.try_recv() {
                if let IncomingEvent::NetworkDown(err) = stale {
                    return EventOutcome::ChannelLost(err);
                }
            }
        }
        IncomingEvent::Terminal(event) => {
            if let term_event::Event::Key(key) = event {
                match key.code {
                    term_event::KeyCode::Esc => return EventOutcome::Quit,
                    term_event::KeyCode::Char(ch @ '1'..='9') => {
                        // On a send failure the writer thread is gone and the
                        // underlying error arrives as a `NetworkDown` event.
                        let _ = client_state.make_turn(ch as u8 - b'0');
                    }
                    _ => {}
                }
            }
        }
        IncomingEvent::NetworkDown(err) => return EventOutcome::ChannelLost(err),
        IncomingEvent::Tick => {
            // Any event triggers a repaint, no additional action required.
        }
    }
    EventOutcome::Continue
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }
    Ok(())
}

fn status_lines(client_state: &ClientState) -> Vec<String> {
    let my_mark = client_state.my_mark().to_char();
    match client_state.turn_state() {
        TurnState::AwaitingLocalMove => vec![
            format!("You play {my_mark}. Your move."),
            "Press 1-9 to claim a cell (left to right, top to bottom). Esc quits.".to_owned(),
        ],
        TurnState::AwaitingRemoteMove => vec![
            format!("You play {my_mark}."),
            "Waiting for the opponent to move... Esc quits.".to_owned(),
        ],
        TurnState::GameOver(status) => vec![
            tui::render_outcome(status, client_state.my_mark()),
            "Press Esc to exit.".to_owned(),
        ],
    }
}

fn render(stdout: &mut io::Stdout, client_state: &ClientState) -> io::Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0))?;
    writeln_raw(stdout, tui::render_board(client_state.board()))?;
    writeln_raw(stdout, "")?;
    for line in status_lines(client_state) {
        writeln_raw(stdout, line)?;
    }
    // Note. Not clearing the whole screen to avoid blinking.
    execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
    Ok(())
}

fn channel_failure(err: CommunicationError) -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::ConnectionAborted, err.to_string()))
}

pub fn run(config: GameConfig) -> io::Result<()> {
    let GameConfig { role, stream } = config;
    let mut socket_in = stream.try_clone()?;
    let mut socket_out = stream;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show).unwrap();
        terminal::disable_raw_mode().unwrap();
    };

    let (tx, rx) = incoming_channel();
    let tx_net = tx.clone();
    let tx_local = tx.clone();
    let tx_tick = tx.clone();
    thread::spawn(move || {
        loop {
            match network::read_obj(&mut socket_in) {
                Ok(board) => {
                    if tx_net.send(IncomingEvent::Network(board)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    let _ = tx_net.send(IncomingEvent::NetworkDown(err));
                    return;
                }
            }
        }
    });
    thread::spawn(move || {
        loop {
            match term_event::read() {
                Ok(ev) => {
                    if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                        return;
                    }
                }
                Err(_) => return,
            }
        }
    });
    thread::spawn(move || {
        loop {
            thread::sleep(Duration::from_millis(100));
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                return;
            }
        }
    });

    let (outgoing_tx, outgoing_rx) = mpsc::channel::<Board>();
    let tx_writer = tx;
    thread::spawn(move || {
        for board in outgoing_rx {
            if let Err(err) = network::write_obj(&mut socket_out, &board) {
                let _ = tx_writer.send(IncomingEvent::NetworkDown(err));
                return;
            }
        }
    });

    let mut client_state = ClientState::new(role, outgoing_tx);
    render(&mut stdout, &client_state)?;
    for event in &rx {
        match process_event(&mut client_state, &rx, event) {
            EventOutcome::Continue => {}
            EventOutcome::Quit => return Ok(()),
            EventOutcome::ChannelLost(err) => return channel_failure(err),
        }
        render(&mut stdout, &client_state)?;
    }
    panic!("Unexpected end of events stream");
}


#[cfg(test)]
mod tests {
    use tictactoe::mark::Mark;

    use super::*;

    fn key(ch: char) -> IncomingEvent {
        IncomingEvent::Terminal(term_event::Event::Key(term_event::KeyEvent::new(
            term_event::KeyCode::Char(ch),
            term_event::KeyModifiers::NONE,
        )))
    }

    fn channel_down() -> CommunicationError {
        CommunicationError::Io(io::Error::from(io::ErrorKind::UnexpectedEof))
    }

    fn opening_move() -> Board {
        let mut board = Board::new();
        board.apply_position(5, Mark::Cross).unwrap();
        board
    }

    #[test]
    fn stale_keystrokes_are_drained_after_a_remote_update() {
        let (tx, rx) = incoming_channel();
        let (outgoing_tx, outgoing_rx) = mpsc::channel();
        let mut state = ClientState::new(Role::SecondMover, outgoing_tx);

        // Keys pressed while the receive was in flight.
        tx.send(key('1')).unwrap();
        tx.send(key('2')).unwrap();

        let remote = opening_move();
        let outcome = process_event(&mut state, &rx, IncomingEvent::Network(remote.clone()));
        assert!(matches!(outcome, EventOutcome::Continue));

        // The update was adopted and the queued keystrokes were discarded,
        // not replayed as moves.
        assert_eq!(state.board(), &remote);
        assert_eq!(state.turn_state(), TurnState::AwaitingLocalMove);
        assert!(rx.try_recv().is_err());
        assert!(outgoing_rx.try_recv().is_err());
    }

    #[test]
    fn queued_channel_failure_survives_the_drain() {
        let (tx, rx) = incoming_channel();
        let (outgoing_tx, _outgoing_rx) = mpsc::channel();
        let mut state = ClientState::new(Role::SecondMover, outgoing_tx);

        tx.send(key('1')).unwrap();
        tx.send(IncomingEvent::NetworkDown(channel_down())).unwrap();

        let outcome = process_event(&mut state, &rx, IncomingEvent::Network(opening_move()));
        assert!(matches!(outcome, EventOutcome::ChannelLost(_)));
    }

    #[test]
    fn receive_failure_ends_the_session() {
        let (_tx, rx) = incoming_channel();
        let (outgoing_tx, _outgoing_rx) = mpsc::channel();
        let mut state = ClientState::new(Role::FirstMover, outgoing_tx);

        let outcome = process_event(&mut state, &rx, IncomingEvent::NetworkDown(channel_down()));
        assert!(matches!(outcome, EventOutcome::ChannelLost(_)));

        // Regardless of turn state: same failure on the waiting side.
        let (_tx, rx) = incoming_channel();
        let (outgoing_tx, _outgoing_rx) = mpsc::channel();
        let mut state = ClientState::new(Role::SecondMover, outgoing_tx);
        let outcome = process_event(&mut state, &rx, IncomingEvent::NetworkDown(channel_down()));
        assert!(matches!(outcome, EventOutcome::ChannelLost(_)));
    }

    #[test]
    fn quit_key_ends_the_loop() {
        let (_tx, rx) = incoming_channel();
        let (outgoing_tx, _outgoing_rx) = mpsc::channel();
        let mut state = ClientState::new(Role::FirstMover, outgoing_tx);

        let esc = IncomingEvent::Terminal(term_event::Event::Key(term_event::KeyEvent::new(
            term_event::KeyCode::Esc,
            term_event::KeyModifiers::NONE,
        )));
        assert!(matches!(process_event(&mut state, &rx, esc), EventOutcome::Quit));
    }

    #[test]
    fn incoming_queue_is_bounded() {
        let (tx, _rx) = incoming_channel();
        for _ in 0..EVENT_QUEUE_SIZE {
            tx.try_send(IncomingEvent::Tick).unwrap();
        }
        assert!(matches!(tx.try_send(IncomingEvent::Tick), Err(mpsc::TrySendError::Full(_))));
    }
}
