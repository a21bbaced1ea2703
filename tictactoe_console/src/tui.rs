use console::Style;
use itertools::Itertools;

use tictactoe::board::Board;
use tictactoe::coord::{Col, Coord, Row};
use tictactoe::game::GameStatus;
use tictactoe::mark::Mark;


// ╔═══╦═══╦═══╗
// ║ X ║ O ║   ║
// ╠═══╬═══╬═══╣
// ║   ║ X ║   ║
// ╠═══╬═══╬═══╣
// ║ O ║   ║   ║
// ╚═══╩═══╩═══╝
pub fn render_board(board: &Board) -> String {
    let rows = Row::all()
        .map(|row| {
            let cells = Col::all()
                .map(|col| format!(" {} ", render_cell(board.get(Coord::new(row, col)))))
                .join("║");
            format!("║{cells}║")
        })
        .join("\n╠═══╬═══╬═══╣\n");
    format!("╔═══╦═══╦═══╗\n{rows}\n╚═══╩═══╩═══╝")
}

fn render_cell(cell: Option<Mark>) -> String {
    match cell {
        Some(Mark::Cross) => Style::new().cyan().bold().apply_to('X').to_string(),
        Some(Mark::Nought) => Style::new().yellow().bold().apply_to('O').to_string(),
        None => ' '.to_string(),
    }
}

pub fn render_outcome(status: GameStatus, my_mark: Mark) -> String {
    let message = match status {
        GameStatus::Victory(mark) if mark == my_mark => "You win!",
        GameStatus::Victory(_) => "You lose.",
        GameStatus::Draw => "It's a draw.",
        GameStatus::Active => "Game in progress.",
    };
    Style::new().magenta().apply_to(message).to_string()
}
