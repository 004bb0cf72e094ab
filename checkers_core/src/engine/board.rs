use crate::engine::capture;
use crate::engine::moves::{Move, MoveList};
use crate::engine::piece::Piece;
use crate::engine::types::{Color, Square};

/// 初期配置で各色が使う行数。
const START_ROWS: u8 = 3;

/// 盤面（64マスのアリーナ）。
///
/// 駒同士は互いを参照せず、マスのインデックスだけで位置を表す。
/// どのマスも常に `Piece` の値（空なら `Piece::Empty`）で埋まっている。
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    /// `Square::index()` 順のマス。
    squares: [Piece; Square::COUNT],
}

/// 盤面に適用した1手の結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct Applied {
    /// 取られた駒があったマス。
    pub captured: Option<Square>,
    /// 移動元。
    pub from: Square,
    /// この手で成ったかどうか。
    pub promoted: bool,
    /// 移動先。
    pub to: Square,
}

impl Board {
    /// `color` のいずれかの駒に取る手があるかどうか。
    #[inline]
    #[must_use]
    pub fn any_capture_for(&self, color: Color) -> bool {
        self.occupied()
            .filter(|&(_, piece)| piece.color() == Some(color))
            .any(|(square, piece)| piece.candidate_moves(square, self, false).has_capture())
    }

    /// `from` の駒を `mv` に従って動かす。
    ///
    /// 合法性は呼び出し側（`Game`）が `legal_moves` で確認済みであること。
    /// 取る手なら間の駒を取り除き、相手側の端の行に着いた通常の駒は成る。
    pub(crate) fn apply(&mut self, from: Square, mv: Move) -> Applied {
        let mover = self.piece_at(from);
        let to = mv.target();

        self.set(from, Piece::Empty);
        let captured = if mv.is_capture() {
            capture::resolve(self, mover, from, to)
        } else {
            None
        };

        let promoted = matches!(mover, Piece::Regular(color) if to.row() == color.promotion_row());
        let placed = if promoted { mover.promoted() } else { mover };
        self.set(to, placed);

        Applied {
            captured,
            from,
            promoted,
            to,
        }
    }

    /// 生きている駒の数（黒、赤）を返す。
    #[inline]
    #[must_use]
    pub fn counts(&self) -> (u32, u32) {
        self.squares
            .iter()
            .fold((u32::MIN, u32::MIN), |(black, red), piece| match piece.color() {
                Some(Color::Black) => (black.saturating_add(1), red),
                Some(Color::Red) => (black, red.saturating_add(1)),
                None => (black, red),
            })
    }

    /// 駒のない盤面を返す。
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [Piece::Empty; Square::COUNT],
        }
    }

    /// 初期配置を返す。
    ///
    /// 暗いマスのうち、黒は 0..=2 行、赤は 5..=7 行に並ぶ。
    #[inline]
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        let red_start = Square::BOARD_LEN.saturating_sub(START_ROWS);

        for square in Square::all().filter(|square| square.is_dark()) {
            if square.row() < START_ROWS {
                board.set(square, Piece::Regular(Color::Black));
            } else if square.row() >= red_start {
                board.set(square, Piece::Regular(Color::Red));
            }
        }

        board
    }

    /// `from` の駒の合法手を返す（強制取りを適用済み）。
    ///
    /// 同じ色のいずれかの駒に取る手があれば、この駒に取らない手があっても
    /// 取る手だけに絞り込む。毎回計算し直し、結果は保持しない。
    #[inline]
    #[must_use]
    pub fn legal_moves(&self, from: Square, continuation: bool) -> MoveList {
        let piece = self.piece_at(from);
        let Some(color) = piece.color() else {
            return MoveList::new();
        };

        let own = piece.candidate_moves(from, self, continuation);
        if continuation || self.any_capture_for(color) {
            own.captures_only()
        } else {
            own
        }
    }

    /// 空でないマスと駒を index 順に返す。
    #[inline]
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(|&(_, piece)| !piece.is_empty())
    }

    /// 指定マスの駒を返す。
    #[inline]
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.squares.get(square.index()).copied().unwrap_or_default()
    }

    /// 全マスと駒を index 順に返す。
    #[inline]
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().zip(self.squares.iter().copied())
    }

    /// 指定マスに駒を置く（空にする場合は `Piece::Empty`）。
    #[inline]
    pub(crate) fn set(&mut self, square: Square, piece: Piece) {
        if let Some(slot) = self.squares.get_mut(square.index()) {
            *slot = piece;
        }
    }

    /// 指定した駒だけを置いた盤面を返す。
    ///
    /// 同じマスが複数回現れた場合は後のものが優先される。
    #[inline]
    #[must_use]
    pub fn with_pieces(placements: &[(Square, Piece)]) -> Self {
        let mut board = Self::empty();
        for &(square, piece) in placements {
            board.set(square, piece);
        }
        board
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Self {
        Self::initial()
    }
}
