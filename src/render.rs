use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connectk_ai::board::Piece;

fn piece_color(piece: Piece) -> Color {
    match piece {
        Piece::Human => Color::Red,
        Piece::Ai => Color::Yellow,
        Piece::Empty => Color::DarkBlue,
    }
}

/// Draws a grid snapshot with the column numbers above it
pub fn display(grid: &[Vec<Piece>]) -> Result<()> {
    let mut stdout = stdout();
    let columns = grid.first().map_or(0, |row| row.len());

    // column labels are 1-indexed, matching move input
    let labels: String = (1..=columns)
        .map(|column| format!("{:<2}", column % 100))
        .collect();
    stdout.queue(PrintStyledContent(style(labels + "\n")))?;

    for row in grid {
        for &cell in row {
            stdout.queue(PrintStyledContent(
                style("O ")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(piece_color(cell)),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
