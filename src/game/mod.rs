pub mod report;

pub use report::{Announcement, MoveReport};

use tracing::{debug, info, trace, warn};

use crate::board::{Board, FenParseError, MoveError};
use crate::core::*;

/******************************************\
|==========================================|
|               Game Status                |
|==========================================|
\******************************************/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// No position loaded yet, or the last load failed
    #[default]
    Unloaded,
    Active,
    /// The colour that has been mated
    Checkmate(Colour),
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Unloaded => write!(f, "No position loaded"),
            GameStatus::Active => write!(f, "In progress"),
            GameStatus::Checkmate(loser) => write!(f, "{} is checkmated", loser),
            GameStatus::Stalemate => write!(f, "Stalemate"),
        }
    }
}

/******************************************\
|==========================================|
|                   Game                   |
|==========================================|
\******************************************/

/// # Game
///
/// Owns the board and drives it through submitted moves:
///
/// - validate (presence, turn, path, castling, pawn rule, geometry)
/// - reject anything that leaves the mover's king attacked
/// - commit, then look at the opponent for check, checkmate or stalemate
/// - hand the turn over unless the game has ended
///
/// A rejected move never changes the board or the side to move.
#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    status: GameStatus,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let mut game = Self::new();
        game.load(fen)?;
        Ok(game)
    }

    /// Replaces the current position. On error the game drops back to [`GameStatus::Unloaded`].
    ///
    /// A loaded position that is already mate or stalemate for the side to move starts out
    /// finished. A position where the side not to move is in check is refused, since its king
    /// could be taken.
    pub fn load(&mut self, fen: &str) -> Result<(), FenParseError> {
        if let Err(err) = self.board.set(fen).and_then(|_| self.check_waiting_side()) {
            warn!("[GAME] Failed to load position '{}': {}", fen, err);
            self.board.clear();
            self.status = GameStatus::Unloaded;
            return Err(err);
        }

        self.status = self.evaluate_loaded();
        info!(status = %self.status, "[GAME] Loaded position {}", fen);

        Ok(())
    }

    /// Tears the board down; a new position must be loaded before play resumes
    pub fn reset(&mut self) {
        self.board.clear();
        self.status = GameStatus::Unloaded;
        info!("[GAME] Board reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn fen(&self) -> String {
        self.board.fen()
    }

    /// Legal moves of the side to move
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let stm = self.board.stm();
        self.board.legal_moves(stm).collect()
    }

    /******************************************\
    |==========================================|
    |             Move Submission              |
    |==========================================|
    \******************************************/

    /// Submits a move as two coordinates such as `"E2"` and `"e4"`.
    pub fn submit_move(&mut self, start: &str, end: &str) -> Result<MoveReport, MoveError> {
        let square = |input: &str| {
            input
                .trim()
                .parse::<Square>()
                .map_err(|_| MoveError::OutOfRangeSquare(input.to_string()))
        };

        self.ensure_playable()
            .and_then(|_| {
                let (from, to) = (square(start)?, square(end)?);
                self.execute(from, to)
            })
            .inspect_err(|err| debug!(from = start, to = end, reason = %err, "[GAME] Move rejected"))
    }

    pub fn play(&mut self, mv: Move) -> Result<MoveReport, MoveError> {
        self.ensure_playable()
            .and_then(|_| self.execute(mv.from(), mv.to()))
            .inspect_err(|err| {
                debug!(from = %mv.from(), to = %mv.to(), reason = %err, "[GAME] Move rejected")
            })
    }

    /// Submits a move as two raw board indices, rejecting anything outside `0..64`
    pub fn play_indices(&mut self, start: i16, end: i16) -> Result<MoveReport, MoveError> {
        let square = |index: i16| {
            Square::try_index(index).ok_or_else(|| MoveError::OutOfRangeSquare(index.to_string()))
        };

        self.ensure_playable()
            .and_then(|_| {
                let (from, to) = (square(start)?, square(end)?);
                self.execute(from, to)
            })
            .inspect_err(|err| debug!(from = start, to = end, reason = %err, "[GAME] Move rejected"))
    }

    fn ensure_playable(&self) -> Result<(), MoveError> {
        match self.status {
            GameStatus::Unloaded => Err(MoveError::InvalidBoardState),
            status if status.is_over() => Err(MoveError::GameOver),
            _ if !self.board.is_valid() => Err(MoveError::InvalidBoardState),
            _ => Ok(()),
        }
    }

    fn ensure_kings(&self) -> Result<(), MoveError> {
        match Colour::iter().find(|&colour| self.board.king_square(colour).is_none()) {
            Some(colour) => Err(MoveError::MissingKing(colour)),
            None => Ok(()),
        }
    }

    fn execute(&mut self, from: Square, to: Square) -> Result<MoveReport, MoveError> {
        self.ensure_kings()?;
        self.board.validate_move(from, to)?;

        if !self.board.is_move_safe(from, to) {
            return Err(MoveError::KingWouldBeExposed { from, to });
        }

        let mover = self.board.stm();
        let piece = self
            .board
            .on(from)
            .map(|piece| piece.pt())
            .ok_or(MoveError::NoPieceAtSource(from))?;
        let castle = self.board.castle_side(from, to);

        let captured = self.board.commit_move(from, to).map(|piece| piece.pt());
        let announcement = self.conclude(mover);

        debug!(%from, %to, "[GAME] {} played {}", mover, Move::new(from, to));

        Ok(MoveReport {
            mover,
            piece,
            from,
            to,
            captured,
            castle,
            announcement,
        })
    }

    /// Looks at the opponent after a committed move; passes the turn unless the game is over
    fn conclude(&mut self, mover: Colour) -> Option<Announcement> {
        let opponent = !mover;
        let in_check = self.board.in_check(opponent);
        let can_move = self.board.has_legal_moves(opponent);

        match (in_check, can_move) {
            (true, false) => {
                self.status = GameStatus::Checkmate(opponent);
                info!("[GAME] Checkmate, {} wins", mover);
                Some(Announcement::Checkmate)
            }
            (false, false) => {
                self.status = GameStatus::Stalemate;
                info!("[GAME] Stalemate, {} has no legal moves", opponent);
                Some(Announcement::Stalemate)
            }
            (true, true) => {
                self.board.pass_turn();
                trace!("[GAME] {} is in check", opponent);
                Some(Announcement::Check)
            }
            (false, true) => {
                self.board.pass_turn();
                None
            }
        }
    }

    fn check_waiting_side(&self) -> Result<(), FenParseError> {
        let waiting = !self.board.stm();
        match self.board.in_check(waiting) {
            true => Err(FenParseError::OpponentInCheck(waiting)),
            false => Ok(()),
        }
    }

    /// Status of a freshly loaded position
    fn evaluate_loaded(&mut self) -> GameStatus {
        if self.ensure_kings().is_err() {
            return GameStatus::Active;
        }

        let stm = self.board.stm();
        if self.board.has_legal_moves(stm) {
            GameStatus::Active
        } else if self.board.in_check(stm) {
            GameStatus::Checkmate(stm)
        } else {
            GameStatus::Stalemate
        }
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
