use thiserror::Error;

use super::Board;
use crate::core::*;

/******************************************\
|==========================================|
|               Move Errors                |
|==========================================|
\******************************************/

/// Why a submitted move was refused. The board is never modified when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("No position has been loaded")]
    InvalidBoardState,

    #[error("'{0}' is not a square on the board")]
    OutOfRangeSquare(String),

    #[error("There is no piece at position {0}")]
    NoPieceAtSource(Square),

    #[error("It is not {0}'s turn to move")]
    WrongSideToMove(Colour),

    #[error("The path from {from} to {to} is blocked")]
    PathBlocked { from: Square, to: Square },

    #[error("A {piece} cannot move from {from} to {to}")]
    IllegalGeometry {
        piece: PieceType,
        from: Square,
        to: Square,
    },

    #[error("Cannot capture the piece on {0}")]
    IllegalCapture(Square),

    #[error("Castling from {from} to {to} is not available")]
    CastlingUnavailable { from: Square, to: Square },

    #[error("Moving from {from} to {to} would leave the king in check")]
    KingWouldBeExposed { from: Square, to: Square },

    #[error("{0} has no king on the board")]
    MissingKing(Colour),

    #[error("The game is over")]
    GameOver,
}

/******************************************\
|==========================================|
|              Move Validator              |
|==========================================|
\******************************************/

impl Board {
    /// Index-level entry point: rejects indices outside `0..64` before looking at the board
    pub fn validate_indices(&self, start: i16, end: i16) -> Result<Move, MoveError> {
        let square = |index: i16| {
            Square::try_index(index).ok_or_else(|| MoveError::OutOfRangeSquare(index.to_string()))
        };

        let (from, to) = (square(start)?, square(end)?);
        self.validate_move(from, to)?;

        Ok(Move::new(from, to))
    }

    /// Checks whether `from -> to` is pseudo-legal for the side to move.
    ///
    /// Runs piece presence and turn order, then the checks shared with move enumeration.
    /// King safety is not considered here; see [`Board::is_move_safe`].
    pub fn validate_move(&self, from: Square, to: Square) -> Result<(), MoveError> {
        let piece = self.on(from).ok_or(MoveError::NoPieceAtSource(from))?;

        if piece.colour() != self.stm() {
            return Err(MoveError::WrongSideToMove(piece.colour()));
        }

        self.check_pseudo_legal(from, to)
    }

    /// Turn-independent part of the validator, shared with move enumeration.
    ///
    /// Order: own-piece capture, path, castling (which decides on its own), pawn occupancy
    /// rule, piece geometry.
    pub(crate) fn check_pseudo_legal(&self, from: Square, to: Square) -> Result<(), MoveError> {
        let piece = self.on(from).ok_or(MoveError::NoPieceAtSource(from))?;

        if self.colour_on(to) == Some(piece.colour()) {
            return Err(MoveError::IllegalCapture(to));
        }

        if piece.pt() != PieceType::Knight && !self.path_clear(from, to) {
            return Err(MoveError::PathBlocked { from, to });
        }

        if piece.pt() == PieceType::King && Self::is_castle_shape(from, to) {
            return self.check_castle(from, to);
        }

        if piece.pt() == PieceType::Pawn {
            // Straight pushes need an empty square, diagonal steps an enemy piece
            let straight = from.file() == to.file();
            if straight != self.is_empty(to) {
                return Err(MoveError::IllegalGeometry {
                    piece: piece.pt(),
                    from,
                    to,
                });
            }
        }

        if !piece.can_move(from, to) {
            return Err(MoveError::IllegalGeometry {
                piece: piece.pt(),
                from,
                to,
            });
        }

        Ok(())
    }

    /// A king step of two files along its rank
    #[inline]
    pub(crate) fn is_castle_shape(from: Square, to: Square) -> bool {
        Square::file_dist(from, to) == 2 && Square::rank_dist(from, to) == 0
    }

    /******************************************\
    |==========================================|
    |              Castling Check              |
    |==========================================|
    \******************************************/

    /// Whether the king on `from` may castle to `to`
    pub fn castle_possible(&self, from: Square, to: Square) -> bool {
        self.check_castle(from, to).is_ok()
    }

    /// Castling needs an unmoved king and rook, empty squares between them, and a king
    /// that is not attacked on its start, transit or destination square.
    fn check_castle(&self, from: Square, to: Square) -> Result<(), MoveError> {
        let unavailable = MoveError::CastlingUnavailable { from, to };

        let Some(king) = self.on(from) else {
            return Err(unavailable);
        };
        let colour = king.colour();

        if king.pt() != PieceType::King || king.has_moved() {
            return Err(unavailable);
        }

        let Some(side) = CastleSide::from_king_move(colour, from, to) else {
            return Err(unavailable);
        };

        let rook_sq = side.rook_from(colour);
        if !self.is_unmoved(rook_sq, colour, PieceType::Rook) || !self.path_clear(from, rook_sq) {
            return Err(unavailable);
        }

        // The rook lands on the square the king passes through
        let transit = side.rook_to(colour);
        if [from, transit, to]
            .into_iter()
            .any(|sq| self.is_attacked(sq, colour))
        {
            return Err(unavailable);
        }

        Ok(())
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
