use crate::engine::game::Game;
use crate::engine::piece::Piece;
use crate::engine::types::{Color, Square};

/// マスの地の色。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Shade {
    /// 暗いマス（駒を置けるマス）。
    Dark,
    /// 明るいマス。
    Light,
}

/// 1マス分の表示情報。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct SquareView {
    /// 選択中の駒の移動先としてハイライトするか。
    pub highlighted: bool,
    /// マスの中身。
    pub piece: Piece,
    /// 地の色。
    pub shade: Shade,
    /// マス。
    pub square: Square,
}

/// ある時点のゲームの読み取り専用ビュー。
///
/// 状態から毎回導出するだけで、ゲーム側へは何も書き戻さない。
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct Snapshot {
    /// 終局しているか。
    pub game_over: bool,
    /// 終局時の表示文字列。
    pub outcome: Option<&'static str>,
    /// 選択中の駒のマス。
    pub selected: Option<Square>,
    /// 手番。
    pub side_to_move: Color,
    /// index 順の64マス。
    pub squares: Vec<SquareView>,
}

impl Snapshot {
    /// ハイライトされているマスを返す。
    #[inline]
    pub fn highlighted(&self) -> impl Iterator<Item = Square> + '_ {
        self.squares
            .iter()
            .filter(|view| view.highlighted)
            .map(|view| view.square)
    }

    /// `game` からビューを作る。
    ///
    /// `viewer` が手番でない側の席なら、相手の合法手は見せない。
    pub(crate) fn of(game: &Game, viewer: Option<Color>) -> Self {
        let show_moves = viewer.is_none_or(|seat| seat == game.side_to_move());
        let pending = game.pending_moves();

        let squares = game
            .board()
            .pieces()
            .map(|(square, piece)| SquareView {
                highlighted: show_moves && pending.contains_target(square),
                piece,
                shade: if square.is_dark() {
                    Shade::Dark
                } else {
                    Shade::Light
                },
                square,
            })
            .collect();

        Self {
            game_over: game.is_game_over(),
            outcome: game.outcome_text(),
            selected: game.selected(),
            side_to_move: game.side_to_move(),
            squares,
        }
    }

    /// 指定マスの表示情報を返す。
    #[inline]
    #[must_use]
    pub fn square(&self, square: Square) -> Option<&SquareView> {
        self.squares.get(square.index())
    }
}
