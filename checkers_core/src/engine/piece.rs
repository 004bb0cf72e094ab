use core::fmt;

use crate::engine::board::Board;
use crate::engine::moves::{Move, MoveList};
use crate::engine::types::{Color, DIRECTIONS, Square};

/// マスの中身。盤面の64マスは常にいずれかの値で埋まっている。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Piece {
    /// 駒がない。
    #[default]
    Empty,
    /// 成った駒。斜めに任意の距離を動き、離れた駒も取れる。
    King(Color),
    /// 通常の駒。取らない手は前進のみ、取る手は4方向。
    Regular(Color),
}

impl Piece {
    /// `from` に置かれたこの駒の候補手を生成する。
    ///
    /// 強制取りの絞り込みはここでは行わない（`Board::legal_moves` が行う）。
    /// `continuation` が真の場合（連続取りの途中）は取る手だけを生成する。
    #[inline]
    #[must_use]
    pub fn candidate_moves(self, from: Square, board: &Board, continuation: bool) -> MoveList {
        match self {
            Self::Empty => MoveList::new(),
            Self::King(color) => king_moves(color, from, board, continuation),
            Self::Regular(color) => regular_moves(color, from, board, continuation),
        }
    }

    /// 駒の色を返す（空マスなら `None`）。
    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::King(color) | Self::Regular(color) => Some(color),
        }
    }

    /// 空マスかどうか。
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// キングかどうか。
    #[inline]
    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self, Self::King(_))
    }

    /// `color` から見て相手の駒かどうか。
    #[inline]
    #[must_use]
    pub fn is_opponent_of(self, color: Color) -> bool {
        self.color() == Some(color.opponent())
    }

    /// 成った後の駒を返す。
    #[inline]
    #[must_use]
    pub const fn promoted(self) -> Self {
        match self {
            Self::Regular(color) => Self::King(color),
            Self::Empty | Self::King(_) => self,
        }
    }
}

impl fmt::Display for Piece {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Empty => f.write_str("Empty"),
            Self::King(color) => write!(f, "{color} King"),
            Self::Regular(color) => write!(f, "{color} Piece"),
        }
    }
}

/// キングの候補手。
///
/// 各方向へ1マスずつ走査し、空マスは取らない手、相手の駒を1つ越えた先の
/// 空マスはすべて取る手とする。味方の駒、または相手の駒を越えた後に
/// 現れる駒でその方向の走査を打ち切るため、1手で取れる駒は1つだけ。
fn king_moves(color: Color, from: Square, board: &Board, continuation: bool) -> MoveList {
    let mut moves = MoveList::new();

    for direction in DIRECTIONS {
        let mut jumped = false;

        for square in from.ray(direction) {
            let occupant = board.piece_at(square);

            if jumped {
                if !occupant.is_empty() {
                    break;
                }
                moves.push(Move::capture(square));
            } else if occupant.is_empty() {
                if !continuation {
                    moves.push(Move::step(square));
                }
            } else if occupant.is_opponent_of(color) {
                jumped = true;
            } else {
                break;
            }
        }
    }

    moves
}

/// 通常の駒の候補手。
fn regular_moves(color: Color, from: Square, board: &Board, continuation: bool) -> MoveList {
    let mut moves = MoveList::new();

    for direction in DIRECTIONS {
        let Some(next) = from.offset(direction, 1) else {
            continue;
        };
        let occupant = board.piece_at(next);

        if occupant.is_empty() {
            // 後ろ向きの1歩は取らない手として認めない。
            if !continuation && direction.row_step() == color.forward_row_step() {
                moves.push(Move::step(next));
            }
            continue;
        }

        if !occupant.is_opponent_of(color) {
            continue;
        }

        if let Some(landing) = from.offset(direction, 2) {
            if board.piece_at(landing).is_empty() {
                moves.push(Move::capture(landing));
            }
        }
    }

    moves
}
