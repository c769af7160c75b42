use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mailbox_chess::utils::perft_test;
use mailbox_chess::*;

/// Replays a list of moves from a position, reporting each one
#[derive(Parser, Debug)]
#[command(name = "mailbox-chess", version, about)]
struct Cli {
    /// Starting position
    #[arg(long, default_value = START_FEN)]
    fen: String,

    /// Print the board after every accepted move
    #[arg(long)]
    show: bool,

    /// Count leaf nodes to this depth from the final position instead of stopping there
    #[arg(long, value_name = "DEPTH")]
    perft: Option<usize>,

    /// Moves as `e2e4`, `e2-e4` or a pair `e2 e4`
    moves: Vec<String>,
}

/// Turns command-line tokens into moves; a lone square is joined with the token after it
fn parse_moves(tokens: &[String]) -> Result<Vec<Move>, String> {
    let mut moves = Vec::new();
    let mut iter = tokens.iter().map(|token| token.trim());

    while let Some(token) = iter.next() {
        let text = match token.len() {
            2 => {
                let end = iter
                    .next()
                    .ok_or_else(|| format!("'{}' has no destination square", token))?;
                format!("{token}{end}")
            }
            _ => token.to_string(),
        };

        let mv = text
            .parse::<Move>()
            .map_err(|err| format!("'{}': {}", text, err))?;
        moves.push(mv);
    }

    Ok(moves)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut game = match Game::from_fen(&cli.fen) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("Invalid position: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", game.board());

    let moves = match parse_moves(&cli.moves) {
        Ok(moves) => moves,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    for mv in moves {
        match game.play(mv) {
            Ok(report) => {
                println!("{report}");
                if cli.show {
                    println!("{}", game.board());
                }
            }
            Err(err) => {
                eprintln!("{mv}: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(depth) = cli.perft {
        let mut board = game.board().clone();
        perft_test(&mut board, depth);
    }

    ExitCode::SUCCESS
}
