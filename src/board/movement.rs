use super::Board;
use crate::core::*;

impl Board {
    /// Puts a piece on an empty square.
    ///
    /// Keeps the king cache in step when the piece is a king. Low-level helper: turn,
    /// moved flags and validity are left alone.
    #[inline]
    pub(crate) fn add_piece(&mut self, piece: Piece, square: Square) {
        debug_assert!(self.is_empty(square), "add_piece: '{square}' is occupied");

        if piece.pt() == PieceType::King {
            self.set_king_square(piece.colour(), Some(square));
        }

        self.board[square.index()] = Some(piece);
    }

    /// Takes the piece off `square`, handing ownership to the caller.
    ///
    /// Clears the king cache when the removed piece is that side's cached king.
    #[inline]
    pub(crate) fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board[square.index()].take()?;

        if piece.pt() == PieceType::King && self.king_square(piece.colour()) == Some(square) {
            self.set_king_square(piece.colour(), None);
        }

        Some(piece)
    }

    /// Relocates the piece on `from` to `to`, returning whatever stood on `to`.
    ///
    /// Nothing happens when `from` is empty.
    #[inline]
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.remove_piece(from)?;
        let captured = self.remove_piece(to);
        self.add_piece(piece, to);
        captured
    }

    /// The castling wing a king move from `from` to `to` would use, if it is one of the
    /// four castling moves for the piece standing on `from`.
    pub fn castle_side(&self, from: Square, to: Square) -> Option<CastleSide> {
        let piece = self.on(from)?;

        if piece.pt() != PieceType::King || Square::file_dist(from, to) != 2 {
            return None;
        }

        CastleSide::from_king_move(piece.colour(), from, to)
    }

    /// Moves the castling rook next to the king's destination.
    ///
    /// The king itself is moved by `commit_move`.
    #[inline]
    fn castle(&mut self, colour: Colour, side: CastleSide) {
        let rook_from = side.rook_from(colour);
        let rook_to = side.rook_to(colour);

        self.move_piece(rook_from, rook_to);

        if let Some(rook) = self.on_mut(rook_to) {
            rook.set_moved(true);
        }
    }

    /// Permanently applies an already validated, king-safe move and returns the captured
    /// piece, if any.
    ///
    /// A castle relocates the rook as well and never captures. The side to move is not
    /// changed; handing over the turn is the caller's job.
    pub fn commit_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        if let Some(side) = self.castle_side(from, to) {
            let colour = self.colour_on(from)?;

            self.move_piece(from, to);
            if let Some(king) = self.on_mut(to) {
                king.set_moved(true);
            }
            self.castle(colour, side);

            return None;
        }

        let captured = self.move_piece(from, to);

        if let Some(piece) = self.on_mut(to) {
            piece.set_moved(true);
        }

        captured
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
