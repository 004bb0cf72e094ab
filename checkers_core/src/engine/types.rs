use core::fmt;
use core::iter;
use core::str::FromStr;

/// 手番（駒の色）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Color {
    /// 先手。行番号が増える方向へ進む。
    Black,
    /// 後手。行番号が減る方向へ進む。
    Red,
}

impl Color {
    /// 前進方向の行の増分（黒は +1、赤は -1）。
    #[inline]
    #[must_use]
    pub const fn forward_row_step(self) -> i8 {
        match self {
            Self::Black => 1,
            Self::Red => -1,
        }
    }

    /// 相手側の色を返す。
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::Red,
            Self::Red => Self::Black,
        }
    }

    /// 到達すると成る（キングになる）行を返す。
    #[inline]
    #[must_use]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Self::Black => Square::BOARD_LEN.saturating_sub(1),
            Self::Red => u8::MIN,
        }
    }
}

impl fmt::Display for Color {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match *self {
            Self::Black => "Black",
            Self::Red => "Red",
        };
        f.write_str(text)
    }
}

/// 斜め方向の単位ベクトル。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Direction {
    /// 列の増分（±1）。
    col: i8,
    /// 行の増分（±1）。
    row: i8,
}

impl Direction {
    /// 列の増分を返す。
    #[inline]
    #[must_use]
    pub const fn col_step(self) -> i8 {
        self.col
    }

    /// 行の増分を返す。
    #[inline]
    #[must_use]
    pub const fn row_step(self) -> i8 {
        self.row
    }
}

/// 4つの斜め方向。
pub const DIRECTIONS: [Direction; 4] = [
    Direction { col: 1, row: 1 },
    Direction { col: -1, row: 1 },
    Direction { col: 1, row: -1 },
    Direction { col: -1, row: -1 },
];

/// 盤面上のマス（0..=63のインデックス）。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Square(
    /// `row * 8 + col` に対応する0..=63の値。
    u8,
);

impl Square {
    /// 盤の一辺の長さ。
    pub const BOARD_LEN: u8 = 8;

    /// 盤面のマス数。
    pub const COUNT: usize = 64;

    /// 全マスを index 順に返す。
    #[inline]
    pub fn all() -> impl Iterator<Item = Self> {
        (u8::MIN..Self::BOARD_LEN.saturating_mul(Self::BOARD_LEN)).map(Self)
    }

    /// 列（0..=7）を返す。
    #[inline]
    #[must_use]
    pub const fn col(self) -> u8 {
        match self.0.checked_rem(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }

    /// `self` から `other` へ向かう斜め方向を返す。
    ///
    /// 同じ斜線上にない場合（同一マスを含む）は `None`。
    #[inline]
    #[must_use]
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        // 差は -7..=7 に収まる。
        let row_diff = i16::from(other.row()).wrapping_sub(i16::from(self.row()));
        let col_diff = i16::from(other.col()).wrapping_sub(i16::from(self.col()));
        if row_diff == 0 || row_diff.wrapping_abs() != col_diff.wrapping_abs() {
            return None;
        }

        let (Ok(row), Ok(col)) = (i8::try_from(row_diff.signum()), i8::try_from(col_diff.signum()))
        else {
            return None;
        };
        Some(Direction { col, row })
    }

    /// 0..=63 のインデックスから `Square` を生成する。範囲外なら `None`。
    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= Self::COUNT {
            return None;
        }
        u8::try_from(index).ok().map(Self)
    }

    /// 盤面座標（row, col）から `Square` を生成する。
    #[inline]
    #[must_use]
    pub const fn from_row_col(row: u8, col: u8) -> Option<Self> {
        if row >= Self::BOARD_LEN || col >= Self::BOARD_LEN {
            return None;
        }

        let mut idx = match row.checked_mul(Self::BOARD_LEN) {
            Some(value) => value,
            None => return None,
        };

        idx = match idx.checked_add(col) {
            Some(value) => value,
            None => return None,
        };

        Some(Self(idx))
    }

    /// 符号付き座標から `Square` を生成する（盤外なら `None`）。
    #[inline]
    #[must_use]
    pub fn from_signed(row: i16, col: i16) -> Option<Self> {
        if !in_bounds(row, col) {
            return None;
        }
        match (u8::try_from(row), u8::try_from(col)) {
            (Ok(row_u8), Ok(col_u8)) => Self::from_row_col(row_u8, col_u8),
            _ => None,
        }
    }

    /// 0..=63 のインデックスを返す。
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// 駒を置けるマス（暗いマス、`row + col` が奇数）かどうか。
    #[inline]
    #[must_use]
    pub const fn is_dark(self) -> bool {
        (self.row() ^ self.col()) & 1 == 1
    }

    /// `direction` へ `distance` マス進んだマスを返す。
    #[inline]
    #[must_use]
    pub fn offset(self, direction: Direction, distance: u8) -> Option<Self> {
        let steps = i16::from(distance);
        let row = i16::from(self.row()).saturating_add(i16::from(direction.row).saturating_mul(steps));
        let col = i16::from(self.col()).saturating_add(i16::from(direction.col).saturating_mul(steps));
        Self::from_signed(row, col)
    }

    /// `direction` へ1マスずつ進んだマスを盤端まで返す（`self` は含まない）。
    #[inline]
    pub fn ray(self, direction: Direction) -> impl Iterator<Item = Self> {
        iter::successors(self.offset(direction, 1), move |square| {
            square.offset(direction, 1)
        })
    }

    /// 行（0..=7）を返す。
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        match self.0.checked_div(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }
}

impl fmt::Display for Square {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.0, self.row(), self.col())
    }
}

/// `Square` の文字列表現が不正であることを表すエラー。
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseSquareError {
    /// 数値として解釈できない。
    #[error("malformed square {0:?}: expected an index (\"18\") or a row,col pair (\"2,3\")")]
    Malformed(String),
    /// 盤外を指している。
    #[error("square {0:?} is off the board")]
    OutOfRange(String),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    /// `"18"`（インデックス）または `"2,3"`（行,列）を受け付ける。
    #[inline]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let malformed = || ParseSquareError::Malformed(trimmed.to_owned());
        let off_board = || ParseSquareError::OutOfRange(trimmed.to_owned());

        if let Some((row_text, col_text)) = trimmed.split_once(',') {
            let (Ok(row), Ok(col)) = (row_text.trim().parse::<i16>(), col_text.trim().parse::<i16>())
            else {
                return Err(malformed());
            };
            return Self::from_signed(row, col).ok_or_else(off_board);
        }

        match trimmed.parse::<usize>() {
            Ok(index) => Self::from_index(index).ok_or_else(off_board),
            Err(_err) => Err(malformed()),
        }
    }
}

/// 符号付き座標が盤内かどうか。
#[inline]
#[must_use]
pub fn in_bounds(row: i16, col: i16) -> bool {
    let len = i16::from(Square::BOARD_LEN);
    (0..len).contains(&row) && (0..len).contains(&col)
}
