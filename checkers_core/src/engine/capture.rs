//! 取る手の解決（取られた駒の除去）。

use crate::engine::board::Board;
use crate::engine::piece::Piece;
use crate::engine::types::{Color, Square};

/// `mover` が `from` から `to` へ取る手を指したときに、取られる駒を盤面から除く。
///
/// 取り除いたマスを返す。取る駒が見つからなければ何もせず `None`。
pub(crate) fn resolve(board: &mut Board, mover: Piece, from: Square, to: Square) -> Option<Square> {
    match mover {
        Piece::Empty => None,
        Piece::King(color) => resolve_flying(board, color, from, to),
        Piece::Regular(_) => resolve_jump(board, from, to),
    }
}

/// キングの取り：`from` から `to` へ進み、最初に現れた相手の駒を取る。
fn resolve_flying(board: &mut Board, color: Color, from: Square, to: Square) -> Option<Square> {
    let Some(direction) = from.direction_to(to) else {
        return None;
    };
    let Some(jumped) = from
        .ray(direction)
        .take_while(|&square| square != to)
        .find(|&square| board.piece_at(square).is_opponent_of(color))
    else {
        return None;
    };

    board.set(jumped, Piece::Empty);
    Some(jumped)
}

/// 通常の駒の取り：移動元と移動先の中点の駒を取る。
fn resolve_jump(board: &mut Board, from: Square, to: Square) -> Option<Square> {
    let (Some(row), Some(col)) = (
        from.row().saturating_add(to.row()).checked_div(2),
        from.col().saturating_add(to.col()).checked_div(2),
    ) else {
        return None;
    };
    let Some(midpoint) = Square::from_row_col(row, col) else {
        return None;
    };
    if board.piece_at(midpoint).is_empty() {
        return None;
    }

    board.set(midpoint, Piece::Empty);
    Some(midpoint)
}
