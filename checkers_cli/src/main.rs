//! ターミナルで動作する最小 UI。
//!
//! 指定したマスを順に `Game::select` へ渡し、盤面を表示する。

mod render;

use std::io::{self, BufRead as _};

use anyhow::{Context as _, Result};
use checkers_core::engine;
use clap::{Parser, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::render::BoardText;

/// `RUST_LOG` が無いときのログフィルタ。
const DEFAULT_LOG_FILTER: &str = "info";

/// コマンドライン引数。
#[derive(Debug, Parser)]
#[command(name = "checkers", version, about = "Replay square selections on a checkers board")]
struct Cli {
    /// スナップショットを JSON で出力する。
    #[arg(long)]
    json: bool,

    /// ログの出力形式。
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// 自分の席。手番でないときは相手の合法手をハイライトしない。
    #[arg(long, value_enum)]
    seat: Option<Seat>,

    /// 選択するマス（"18" または "2,3"）。省略すると標準入力から1行ずつ読む。
    squares: Vec<String>,
}

/// ログの出力形式。
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    /// 1行1イベントの JSON。
    Json,
    /// 人が読む形式。
    Pretty,
}

/// 席（表示上の視点）。
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Seat {
    /// 先手（黒）の席。
    Black,
    /// 後手（赤）の席。
    Red,
}

impl From<Seat> for engine::Color {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::Black => Self::Black,
            Seat::Red => Self::Red,
        }
    }
}

/// トークンを順にマスとして解釈し、選択を適用する。
///
/// 解釈できないトークンがあればそこで止める（それまでの選択は適用済み）。
fn apply_tokens<'tok>(
    game: &mut engine::Game,
    tokens: impl IntoIterator<Item = &'tok str>,
) -> Result<()> {
    for token in tokens {
        let square: engine::Square = token
            .parse()
            .with_context(|| format!("cannot read square {token:?}"))?;
        let outcome = game.select(square.index());
        debug!(%square, ?outcome, "select");
    }
    Ok(())
}

/// ログ出力を初期化する。
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_err| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// 現在の盤面を標準出力へ書く。
fn print_snapshot(game: &engine::Game, viewer: Option<engine::Color>, json: bool) -> Result<()> {
    let snapshot = game.snapshot(viewer);
    if json {
        let encoded = serde_json::to_string(&snapshot).context("cannot encode snapshot")?;
        println!("{encoded}");
    } else {
        print!("{}", BoardText(&snapshot));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let viewer = cli.seat.map(engine::Color::from);
    let mut game = engine::Game::new();

    if !cli.squares.is_empty() {
        apply_tokens(&mut game, cli.squares.iter().map(String::as_str))?;
        return print_snapshot(&game, viewer, cli.json);
    }

    print_snapshot(&game, viewer, cli.json)?;
    for line in io::stdin().lock().lines() {
        let line = line.context("cannot read stdin")?;
        if let Err(err) = apply_tokens(&mut game, line.split_whitespace()) {
            warn!("{err:#}");
        }
        print_snapshot(&game, viewer, cli.json)?;
    }

    Ok(())
}
