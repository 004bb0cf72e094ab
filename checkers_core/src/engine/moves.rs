use crate::engine::types::Square;

/// 1手（移動先と、取る手かどうか）。移動元は選択中の駒で暗黙に決まる。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// 相手の駒を取る手かどうか。
    is_capture: bool,
    /// 移動先。
    target: Square,
}

impl Move {
    /// 取る手を生成する。
    #[inline]
    #[must_use]
    pub const fn capture(target: Square) -> Self {
        Self {
            is_capture: true,
            target,
        }
    }

    /// 取る手かどうか。
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.is_capture
    }

    /// 取らない手（1歩またはキングの滑り）を生成する。
    #[inline]
    #[must_use]
    pub const fn step(target: Square) -> Self {
        Self {
            is_capture: false,
            target,
        }
    }

    /// 移動先を返す。
    #[inline]
    #[must_use]
    pub const fn target(self) -> Square {
        self.target
    }
}

/// 手の集合。移動先の重複を持たず、生成順を保つ。
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MoveList {
    /// 生成順の手。
    moves: Vec<Move>,
}

impl MoveList {
    /// 取る手だけを残した集合を返す。
    #[inline]
    #[must_use]
    pub fn captures_only(self) -> Self {
        Self {
            moves: self.moves.into_iter().filter(|mv| mv.is_capture()).collect(),
        }
    }

    /// `target` へ移動する手を含むかどうか。
    #[inline]
    #[must_use]
    pub fn contains_target(&self, target: Square) -> bool {
        self.find(target).is_some()
    }

    /// `target` へ移動する手を返す。
    #[inline]
    #[must_use]
    pub fn find(&self, target: Square) -> Option<Move> {
        self.moves.iter().copied().find(|mv| mv.target() == target)
    }

    /// 取る手を1つでも含むかどうか。
    #[inline]
    #[must_use]
    pub fn has_capture(&self) -> bool {
        self.moves.iter().any(|mv| mv.is_capture())
    }

    /// 空かどうか。
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// 手を順に返す。
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().copied()
    }

    /// 手の数。
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// 空の集合を返す。
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { moves: Vec::new() }
    }

    /// 手を追加する。同じ移動先がすでにあれば何もしない。
    #[inline]
    pub fn push(&mut self, mv: Move) {
        if !self.contains_target(mv.target()) {
            self.moves.push(mv);
        }
    }

    /// 移動先のマスを順に返す。
    #[inline]
    pub fn targets(&self) -> impl Iterator<Item = Square> + '_ {
        self.moves.iter().map(|mv| mv.target())
    }
}

impl<'list> IntoIterator for &'list MoveList {
    type IntoIter = core::iter::Copied<core::slice::Iter<'list, Move>>;
    type Item = Move;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter().copied()
    }
}
