//! スナップショットのテキスト表示。

use core::fmt::{self, Write as _};

use checkers_core::engine::{self, snapshot::Shade};

/// 盤面をテキストで表示するためのラッパー。
#[derive(Debug)]
pub struct BoardText<'snap>(pub &'snap engine::Snapshot);

impl BoardText<'_> {
    /// 生きている駒の数（黒、赤）。
    fn counts(&self) -> (usize, usize) {
        let count = |color| {
            self.0
                .squares
                .iter()
                .filter(|view| view.piece.color() == Some(color))
                .count()
        };
        (count(engine::Color::Black), count(engine::Color::Red))
    }

    /// 盤面の下に出す1行の状態表示。
    fn status_line(&self) -> String {
        let (black, red) = self.counts();
        let snapshot = self.0;

        if let Some(outcome) = snapshot.outcome {
            return format!("Game Over: {outcome} | B={black} R={red}");
        }

        let mut line = format!("{} to move | B={black} R={red}", snapshot.side_to_move);
        if let Some(square) = snapshot.selected {
            let _: fmt::Result = write!(line, " | selected {square}");
        }
        line
    }
}

/// マス1つ分の文字。
fn glyph(view: &engine::snapshot::SquareView) -> char {
    match view.piece {
        engine::Piece::Regular(engine::Color::Black) => 'b',
        engine::Piece::Regular(engine::Color::Red) => 'r',
        engine::Piece::King(engine::Color::Black) => 'B',
        engine::Piece::King(engine::Color::Red) => 'R',
        engine::Piece::Empty if view.highlighted => '*',
        engine::Piece::Empty => match view.shade {
            Shade::Dark => '.',
            _ => ' ',
        },
        _ => '?',
    }
}

impl fmt::Display for BoardText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("  0 1 2 3 4 5 6 7\n")?;

        for (row, views) in self
            .0
            .squares
            .chunks(usize::from(engine::Square::BOARD_LEN))
            .enumerate()
        {
            write!(f, "{row}")?;
            for view in views {
                write!(f, " {}", glyph(view))?;
            }
            f.write_str("\n")?;
        }

        writeln!(f, "{}", self.status_line())
    }
}
