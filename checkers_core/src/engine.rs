/// 盤面（64マスのアリーナ）と手の適用。
pub mod board;
/// 取る手の解決。
mod capture;
/// ゲーム進行（選択、連続取り、手番、終局判定）の実装。
pub mod game;
/// 手と手の集合。
pub mod moves;
/// 駒の種類と候補手の生成。
pub mod piece;
/// 送信用の読み取り専用ビュー。
pub mod snapshot;
pub mod types;

pub type Applied = board::Applied;
pub type Board = board::Board;
pub type Color = types::Color;
pub type Game = game::Game;
pub type GameStatus = game::Status;
pub type Ignored = game::Ignored;
pub type Move = moves::Move;
pub type MoveList = moves::MoveList;
pub type ParseSquareError = types::ParseSquareError;
pub type Piece = piece::Piece;
pub type Selection = game::Selection;
pub type Snapshot = snapshot::Snapshot;
pub type Square = types::Square;
