use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use std::io::{stdout, Write};

use alphabeta::connect_four::{ConnectFour, HEIGHT, WIDTH};
use alphabeta::tic_tac_toe::{TicTacToe, SIZE};
use alphabeta::trace::{NodeId, SearchTrace};
use alphabeta::{Cell, Score, MAX_SCORE, MIN_SCORE};

pub fn clear() -> Result<()> {
    let mut stdout = stdout();
    stdout.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

pub fn title(text: &str) -> Result<()> {
    let mut stdout = stdout();
    stdout.queue(PrintStyledContent(
        style(format!("\n{}\n", text))
            .attribute(Attribute::Bold)
            .with(Color::Cyan),
    ))?;
    stdout.flush()?;
    Ok(())
}

/// Prints a line in one of the highlight colors
pub fn message(text: &str, color: Color) -> Result<()> {
    let mut stdout = stdout();
    stdout.queue(PrintStyledContent(style(format!("{}\n", text)).with(color)))?;
    stdout.flush()?;
    Ok(())
}

fn tic_tac_toe_color(cell: Cell) -> Color {
    match cell {
        Cell::PlayerOne => Color::Green,
        Cell::PlayerTwo => Color::Red,
        Cell::Empty => Color::Reset,
    }
}

/// Draws a 3×3 board, numbering free cells 1–9 if `numbered` is set
pub fn draw_tic_tac_toe(board: &TicTacToe, numbered: bool) -> Result<()> {
    let mut stdout = stdout();

    for row in 0..SIZE {
        stdout.queue(PrintStyledContent(style(" ")))?;
        for column in 0..SIZE {
            let index = row * SIZE + column;
            let cell = board.cell(index);
            let text = match cell {
                Cell::Empty if numbered => (index + 1).to_string(),
                Cell::Empty => " ".to_string(),
                cell => cell.symbol().to_string(),
            };
            stdout.queue(PrintStyledContent(
                style(text).with(tic_tac_toe_color(cell)),
            ))?;
            if column + 1 < SIZE {
                stdout.queue(PrintStyledContent(style(" | ")))?;
            }
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
        if row + 1 < SIZE {
            stdout.queue(PrintStyledContent(style("-----------\n")))?;
        }
    }
    stdout.queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}

pub fn draw_connect_four(board: &ConnectFour) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for row in (0..HEIGHT).rev() {
        for column in 0..WIDTH {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.cell(column, row) {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}

fn bound(score: Score) -> String {
    match score {
        MIN_SCORE => "-inf".to_string(),
        MAX_SCORE => "+inf".to_string(),
        score => score.to_string(),
    }
}

/// Prints one recorded search node with the board it represents
pub fn draw_node(trace: &SearchTrace<TicTacToe>, id: NodeId) -> Result<()> {
    let node = match trace.get(id) {
        Some(node) => node,
        None => return Ok(()),
    };

    if node.is_skipped() {
        message(&format!("\nNode {} (PRUNED)", trace.label(id)), Color::Red)?;
    } else {
        message(&format!("\nNode {}", trace.label(id)), Color::Yellow)?;
    }
    if let Some(parent) = node.parent {
        println!("Parent: {}", trace.label(parent));
    }
    println!("Depth: {}", node.depth);
    println!("Alpha: {}, Beta: {}", bound(node.alpha), bound(node.beta));
    if let Some(value) = node.value() {
        println!("Value: {}", value);
    }
    if let Some(best_move) = node.best_move() {
        println!("Best move: {}", best_move + 1);
    }
    draw_tic_tac_toe(&node.board, false)
}
