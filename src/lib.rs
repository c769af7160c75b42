//! # Mailbox Chess
//!
//! A chess rules engine over a 64-slot mailbox board: move validation, king safety,
//! castling, and check, checkmate and stalemate detection.
pub mod board;
pub mod core;
pub mod game;
pub mod utils;

pub use board::{Board, FenParseError, MoveError, START_FEN};
pub use core::*;
pub use game::{Announcement, Game, GameStatus, MoveReport};
