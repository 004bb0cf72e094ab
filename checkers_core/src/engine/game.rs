use tracing::{debug, info, trace};

use crate::engine::board::{Applied, Board};
use crate::engine::moves::MoveList;
use crate::engine::snapshot::Snapshot;
use crate::engine::types::{Color, Square};

/// ゲームの状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
    /// 終局（どちらかの駒が0になった）。
    GameOver {
        /// 勝った側。
        winner: Color,
    },
    /// 進行中。
    InProgress,
}

impl Status {
    /// 終局時の表示文字列（`"Black Wins!"` など）。進行中なら `None`。
    #[inline]
    #[must_use]
    pub const fn outcome_text(self) -> Option<&'static str> {
        match self {
            Self::GameOver {
                winner: Color::Black,
            } => Some("Black Wins!"),
            Self::GameOver { winner: Color::Red } => Some("Red Wins!"),
            Self::InProgress => None,
        }
    }
}

/// マス選択が無視された理由。いずれの場合も状態は変化しない。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Ignored {
    /// 連続取りの途中で、強制される移動先以外が選ばれた。
    ContinuationPinned,
    /// すでに終局している。
    GameOver,
    /// 駒を選択中だが、指定マスが合法手の移動先ではない。
    NotLegal,
    /// 駒を選択していない状態で空マスが選ばれた。
    NotSelectable,
    /// 盤外のインデックス。
    OutOfRange,
    /// 手番ではない色の駒が選ばれた。
    WrongTurn,
}

/// `Game::select` の結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Selection {
    /// 選択中の駒をもう一度選んだので選択を解除した。
    Deselected(Square),
    /// 何もしなかった。
    Ignored(Ignored),
    /// 手を適用した。
    Moved {
        /// 盤面への適用結果。
        applied: Applied,
        /// 同じ駒で連続取りを続ける必要があるか（手番は変わらない）。
        continues: bool,
    },
    /// 駒を選択した（合法手を計算し直した）。
    Selected(Square),
}

/// 1ゲームの進行を管理する構造体。
///
/// 公開された変更操作は `select` だけで、1回の呼び出しが1つの完結した状態遷移になる。
/// 複数の呼び出し元から同じインスタンスを扱う場合の排他は呼び出し側の責任。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    /// 現在の盤面。
    board: Board,
    /// 連続取りの途中かどうか（選択は `selected` に固定される）。
    continuation: bool,
    /// 選択中の駒の合法手。
    pending: MoveList,
    /// 選択中の駒のマス。
    selected: Option<Square>,
    /// 手番。
    side_to_move: Color,
    /// 進行状態。
    status: Status,
}

impl Game {
    /// 現在の盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// 連続取りの途中かどうか。
    #[inline]
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.continuation
    }

    /// 終局しているかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self.status, Status::GameOver { .. })
    }

    /// 標準の初期配置で、黒番から始める。
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_board(Board::initial(), Color::Black)
    }

    /// 終局時の表示文字列を返す。
    #[inline]
    #[must_use]
    pub const fn outcome_text(&self) -> Option<&'static str> {
        self.status.outcome_text()
    }

    /// 選択中の駒の合法手（移動先のハイライト対象）を返す。
    #[inline]
    #[must_use]
    pub const fn pending_moves(&self) -> &MoveList {
        &self.pending
    }

    /// マスを選択する。唯一の変更操作。
    ///
    /// - 終局後、盤外、手番でない色の駒、合法でない移動先は無視する。
    /// - 選択中の駒を再度選ぶと選択を解除し、同じ色の別の駒を選ぶと選択し直す。
    /// - 選択中の駒の合法な移動先を選ぶと手を適用する。
    /// - 連続取りの途中は、強制される移動先以外をすべて無視する。
    #[inline]
    pub fn select(&mut self, index: usize) -> Selection {
        if self.is_game_over() {
            return ignore(index, Ignored::GameOver);
        }

        let Some(square) = Square::from_index(index) else {
            return ignore(index, Ignored::OutOfRange);
        };

        if self.continuation {
            if self.pending.contains_target(square) {
                return self.play(square);
            }
            return ignore(index, Ignored::ContinuationPinned);
        }

        if self.selected == Some(square) {
            self.clear_selection();
            trace!(%square, "deselected");
            return Selection::Deselected(square);
        }

        match self.board.piece_at(square).color() {
            Some(color) if color == self.side_to_move => {
                self.selected = Some(square);
                self.pending = self.board.legal_moves(square, false);
                trace!(%square, moves = self.pending.len(), "selected");
                Selection::Selected(square)
            }
            Some(_) => ignore(index, Ignored::WrongTurn),
            None if self.selected.is_none() => ignore(index, Ignored::NotSelectable),
            None if self.pending.contains_target(square) => self.play(square),
            None => ignore(index, Ignored::NotLegal),
        }
    }

    /// 選択中の駒のマスを返す。
    #[inline]
    #[must_use]
    pub const fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// 現手番を返す。
    #[inline]
    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 送信用の読み取り専用ビューを返す。
    ///
    /// `viewer` はハイライト表示だけに使う（`None` なら常に表示）。
    #[inline]
    #[must_use]
    pub fn snapshot(&self, viewer: Option<Color>) -> Snapshot {
        Snapshot::of(self, viewer)
    }

    /// 現在のゲーム状態を返す。
    #[inline]
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// 任意の盤面と手番から始める。
    ///
    /// 片方の駒がすでに0なら、その時点で終局として扱う。
    #[inline]
    #[must_use]
    pub fn with_board(board: Board, side_to_move: Color) -> Self {
        let mut game = Self {
            board,
            continuation: false,
            pending: MoveList::new(),
            selected: None,
            side_to_move,
            status: Status::InProgress,
        };
        game.refresh_status();
        game
    }

    /// 選択と合法手を消す。
    fn clear_selection(&mut self) {
        self.selected = None;
        self.pending = MoveList::new();
        self.continuation = false;
    }

    /// 選択中の駒を `target` へ動かし、連続取り・手番交代・終局を判定する。
    fn play(&mut self, target: Square) -> Selection {
        let Some(from) = self.selected else {
            return ignore(target.index(), Ignored::NotSelectable);
        };
        let Some(mv) = self.pending.find(target) else {
            return ignore(target.index(), Ignored::NotLegal);
        };

        let applied = self.board.apply(from, mv);

        // 成りは連続取りの判定より先に反映済み。
        let further = if mv.is_capture() {
            self.board.legal_moves(applied.to, true)
        } else {
            MoveList::new()
        };

        let continues = !further.is_empty();
        if continues {
            self.selected = Some(applied.to);
            self.pending = further;
            self.continuation = true;
        } else {
            self.clear_selection();
            self.side_to_move = self.side_to_move.opponent();
        }

        debug!(
            from = %applied.from,
            to = %applied.to,
            captured = ?applied.captured,
            promoted = applied.promoted,
            continues,
            "move applied"
        );

        self.refresh_status();
        Selection::Moved { applied, continues }
    }

    /// 駒数から終局を判定する。
    fn refresh_status(&mut self) {
        if self.is_game_over() {
            return;
        }

        let (black, red) = self.board.counts();
        let winner = if red == u32::MIN {
            Color::Black
        } else if black == u32::MIN {
            Color::Red
        } else {
            return;
        };

        self.status = Status::GameOver { winner };
        self.clear_selection();
        info!(%winner, black, red, "game over");
    }
}

impl Default for Game {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// 無視した選択を記録して返す。
fn ignore(index: usize, reason: Ignored) -> Selection {
    debug!(index, ?reason, "selection ignored");
    Selection::Ignored(reason)
}

#[cfg(test)]
mod tests {
    use super::{Game, Ignored, Selection, Status};
    use crate::engine::board::Board;
    use crate::engine::moves::Move;
    use crate::engine::piece::Piece;
    use crate::engine::types::{Color, Square};

    fn at(row: u8, col: u8) -> Square {
        let square = Square::from_row_col(row, col);
        assert!(square.is_some(), "bad test square {row},{col}");
        square.unwrap_or_default()
    }

    fn idx(row: u8, col: u8) -> usize {
        at(row, col).index()
    }

    #[test]
    fn new_game_starts_with_black_to_move() {
        let game = Game::new();
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.status(), Status::InProgress);
        assert_eq!(game.selected(), None);
        assert!(game.pending_moves().is_empty());
        assert_eq!(game.board().counts(), (12, 12));
    }

    #[test]
    fn lone_capture_is_the_only_legal_move() {
        let board = Board::with_pieces(&[
            (at(0, 2), Piece::Regular(Color::Black)),
            (at(1, 1), Piece::Regular(Color::Red)),
        ]);
        let mut game = Game::with_board(board, Color::Black);

        assert_eq!(game.select(2), Selection::Selected(at(0, 2)));
        let moves: Vec<_> = game.pending_moves().iter().collect();
        assert_eq!(moves, vec![Move::capture(at(2, 0))]);
        assert_eq!(at(2, 0).index(), 16);
    }

    #[test]
    fn blocked_landing_leaves_a_single_step() {
        let board = Board::with_pieces(&[
            (at(0, 2), Piece::Regular(Color::Black)),
            (at(1, 1), Piece::Regular(Color::Red)),
            (at(2, 0), Piece::Regular(Color::Black)),
        ]);
        let mut game = Game::with_board(board, Color::Black);

        game.select(2);
        let moves: Vec<_> = game.pending_moves().iter().collect();
        assert_eq!(moves, vec![Move::step(at(1, 3))]);
    }

    #[test]
    fn non_capture_flips_the_turn() {
        let mut game = Game::new();
        assert_eq!(game.select(idx(2, 1)), Selection::Selected(at(2, 1)));

        let outcome = game.select(idx(3, 2));
        assert!(matches!(outcome, Selection::Moved { continues: false, .. }));
        assert_eq!(game.side_to_move(), Color::Red);
        assert_eq!(game.selected(), None);
        assert_eq!(game.board().piece_at(at(3, 2)), Piece::Regular(Color::Black));
        assert_eq!(game.board().piece_at(at(2, 1)), Piece::Empty);
    }

    #[test]
    fn reselecting_deselects_and_another_piece_switches() {
        let mut game = Game::new();
        game.select(idx(2, 1));
        assert_eq!(game.select(idx(2, 3)), Selection::Selected(at(2, 3)));
        assert_eq!(game.select(idx(2, 3)), Selection::Deselected(at(2, 3)));
        assert_eq!(game.selected(), None);
        assert!(game.pending_moves().is_empty());
    }

    #[test]
    fn malformed_input_is_ignored_without_changes() {
        let mut game = Game::new();
        let before = game.clone();

        assert_eq!(game.select(64), Selection::Ignored(Ignored::OutOfRange));
        assert_eq!(game.select(usize::MAX), Selection::Ignored(Ignored::OutOfRange));
        assert_eq!(game.select(idx(5, 0)), Selection::Ignored(Ignored::WrongTurn));
        assert_eq!(game.select(idx(3, 0)), Selection::Ignored(Ignored::NotSelectable));
        assert_eq!(game, before);

        game.select(idx(2, 1));
        let selected = game.clone();
        assert_eq!(game.select(idx(4, 1)), Selection::Ignored(Ignored::NotLegal));
        assert_eq!(game, selected);
    }

    #[test]
    fn capture_chain_keeps_the_turn_and_pins_the_piece() {
        let board = Board::with_pieces(&[
            (at(0, 0), Piece::Regular(Color::Black)),
            (at(1, 1), Piece::Regular(Color::Red)),
            (at(3, 3), Piece::Regular(Color::Red)),
            (at(6, 0), Piece::Regular(Color::Red)),
            (at(0, 6), Piece::Regular(Color::Black)),
        ]);
        let mut game = Game::with_board(board, Color::Black);

        game.select(0);
        let first = game.select(idx(2, 2));
        assert!(matches!(first, Selection::Moved { continues: true, .. }));
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.selected(), Some(at(2, 2)));
        assert!(game.is_continuation());
        assert_eq!(
            game.pending_moves().iter().collect::<Vec<_>>(),
            vec![Move::capture(at(4, 4))]
        );
        assert_eq!(game.board().counts(), (2, 2));

        let pinned = game.clone();
        assert_eq!(
            game.select(idx(0, 6)),
            Selection::Ignored(Ignored::ContinuationPinned)
        );
        assert_eq!(
            game.select(idx(2, 2)),
            Selection::Ignored(Ignored::ContinuationPinned)
        );
        assert_eq!(game, pinned);

        let second = game.select(idx(4, 4));
        assert!(matches!(second, Selection::Moved { continues: false, .. }));
        assert_eq!(game.side_to_move(), Color::Red);
        assert_eq!(game.selected(), None);
        assert!(!game.is_continuation());
        assert_eq!(game.board().counts(), (2, 1));
    }

    #[test]
    fn promotion_happens_before_the_continuation_check() {
        // 赤が (1,2) を取って 0 行目で成り、キングとして離れた (3,4) を続けて取る。
        let board = Board::with_pieces(&[
            (at(2, 3), Piece::Regular(Color::Red)),
            (at(1, 2), Piece::Regular(Color::Black)),
            (at(3, 4), Piece::Regular(Color::Black)),
            (at(7, 0), Piece::Regular(Color::Black)),
        ]);
        let mut game = Game::with_board(board, Color::Red);
        let _: Selection = game.select(idx(2, 3));
        assert!(game.pending_moves().contains_target(at(0, 1)));

        let outcome = game.select(idx(0, 1));
        assert!(
            matches!(outcome, Selection::Moved { .. }),
            "expected a move, got {outcome:?}"
        );
        let Selection::Moved { applied, continues } = outcome else {
            return;
        };
        assert!(applied.promoted);
        assert_eq!(game.board().piece_at(at(0, 1)), Piece::King(Color::Red));
        assert!(continues, "the new king must keep capturing");
        assert_eq!(
            game.pending_moves().iter().collect::<Vec<_>>(),
            vec![Move::capture(at(4, 5)), Move::capture(at(5, 6)), Move::capture(at(6, 7))]
        );
    }

    #[test]
    fn capturing_the_last_piece_ends_the_game_for_good() {
        let board = Board::with_pieces(&[
            (at(4, 4), Piece::Regular(Color::Black)),
            (at(5, 5), Piece::Regular(Color::Red)),
            (at(0, 1), Piece::Regular(Color::Black)),
        ]);
        let mut game = Game::with_board(board, Color::Black);

        game.select(idx(4, 4));
        let outcome = game.select(idx(6, 6));
        assert!(matches!(outcome, Selection::Moved { .. }));
        assert!(game.is_game_over());
        assert_eq!(game.status(), Status::GameOver { winner: Color::Black });
        assert_eq!(game.outcome_text(), Some("Black Wins!"));

        let finished = game.clone();
        for index in 0..Square::COUNT {
            assert_eq!(game.select(index), Selection::Ignored(Ignored::GameOver));
        }
        assert_eq!(game, finished);
    }

    #[test]
    fn board_without_one_color_is_over_from_the_start() {
        let board = Board::with_pieces(&[(at(5, 0), Piece::Regular(Color::Red))]);
        let game = Game::with_board(board, Color::Black);
        assert_eq!(game.outcome_text(), Some("Red Wins!"));
    }
}
