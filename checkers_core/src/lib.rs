//! 8×8 チェッカー（ドラフツ）のルールエンジン。
//!
//! 盤面、合法手生成（強制取り・連続取り・キングの長距離移動）、手の適用、
//! 手番交代、勝敗判定を提供します。サーバー、デスクトップ、ブラウザの
//! いずれのクライアントからも同じ `engine` を利用することを想定しています。

#![forbid(unsafe_code)]

/// ゲームルール・盤面・進行を提供するモジュール。
pub mod engine;
