use super::Board;
use crate::core::*;

/******************************************\
|==========================================|
|            Legal Move Iterator           |
|==========================================|
\******************************************/

/// # Legal move enumeration
///
/// - Pairs every square of one colour with every square on the board, in index order
/// - Cheap filters (geometry, own-piece capture, path, pawn rule, castling) run before the
///   king-safety simulation, which is only reached by pseudo-legal candidates
/// - Lazy: checking for any legal move stops at the first one found
pub struct LegalMoves<'a> {
    board: &'a mut Board,
    colour: Colour,
    from: usize,
    to: usize,
}

impl<'a> LegalMoves<'a> {
    fn new(board: &'a mut Board, colour: Colour) -> Self {
        Self {
            board,
            colour,
            from: 0,
            to: 0,
        }
    }

    /// Whether the piece on `from` has any business going to `to`.
    fn is_candidate(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.board.on(from) else {
            return false;
        };

        let shape = piece.can_move(from, to)
            || (piece.pt() == PieceType::King && Board::is_castle_shape(from, to));

        shape && self.board.check_pseudo_legal(from, to).is_ok()
    }
}

impl Iterator for LegalMoves<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        while let Some(from) = Square::try_from_index(self.from) {
            if self.board.colour_on(from) == Some(self.colour) {
                while let Some(to) = Square::try_from_index(self.to) {
                    self.to += 1;

                    if self.is_candidate(from, to) && self.board.is_move_safe(from, to) {
                        return Some(Move::new(from, to));
                    }
                }
            }

            self.from += 1;
            self.to = 0;
        }

        None
    }
}

/******************************************\
|==========================================|
|          Terminal-State Detector         |
|==========================================|
\******************************************/

impl Board {
    /// Lazily enumerates every legal move of `colour`, castling included.
    ///
    /// Ignores whose turn it is. The board is borrowed mutably for the king-safety
    /// simulation but is unchanged whenever the iterator yields or finishes.
    pub fn legal_moves(&mut self, colour: Colour) -> LegalMoves<'_> {
        LegalMoves::new(self, colour)
    }

    pub fn has_legal_moves(&mut self, colour: Colour) -> bool {
        self.legal_moves(colour).next().is_some()
    }

    /// In check with nowhere to go
    pub fn is_checkmate(&mut self, colour: Colour) -> bool {
        self.in_check(colour) && !self.has_legal_moves(colour)
    }

    /// Not in check, but no legal move either
    pub fn is_stalemate(&mut self, colour: Colour) -> bool {
        !self.in_check(colour) && !self.has_legal_moves(colour)
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::{CASTLE_FEN, START_FEN};
    use Square::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_start_position_move_count() {
        let mut b = board(START_FEN);
        assert_eq!(b.legal_moves(Colour::White).count(), 20);
        assert_eq!(b.legal_moves(Colour::Black).count(), 20);
    }

    #[test]
    fn test_enumeration_includes_castling() {
        let mut b = board(CASTLE_FEN);
        let moves: Vec<Move> = b.legal_moves(Colour::White).collect();

        assert!(moves.contains(&Move::new(E1, G1)));
        assert!(moves.contains(&Move::new(E1, C1)));
        // 5 king steps + 2 castles + 10 (a1 rook) + 9 (h1 rook)
        assert_eq!(moves.len(), 26);
    }

    #[test]
    fn test_enumeration_leaves_board_untouched() {
        let mut b = board("r3k2r/pp3ppp/8/3q4/8/8/PP3PPP/R3K2R w KQkq - 0 1");
        let before = b.clone();
        let _ = b.legal_moves(Colour::White).count();
        let _ = b.legal_moves(Colour::Black).count();
        assert_eq!(b, before);
    }

    #[test]
    fn test_back_rank_checkmate() {
        let mut b = board("6k1/5ppp/8/8/8/8/8/K2R4 b - - 0 1");
        assert!(!b.is_checkmate(Colour::Black));

        let mut b = board("3R2k1/5ppp/8/8/8/8/8/K7 b - - 0 1");
        assert!(b.in_check(Colour::Black));
        assert!(!b.has_legal_moves(Colour::Black));
        assert!(b.is_checkmate(Colour::Black));
        assert!(!b.is_stalemate(Colour::Black));
    }

    #[test]
    fn test_check_with_escape_is_not_mate() {
        let mut b = board("3R2k1/5pp1/8/8/8/8/8/K7 b - - 0 1");
        assert!(b.in_check(Colour::Black));
        assert!(b.has_legal_moves(Colour::Black));
        assert_eq!(b.legal_moves(Colour::Black).collect::<Vec<_>>(), vec![Move::new(G8, H7)]);
        assert!(!b.is_checkmate(Colour::Black));
    }

    #[test]
    fn test_capture_escapes_mate() {
        // Knight on c6 can take the checking rook
        let mut b = board("3R2k1/5ppp/2n5/8/8/8/8/K7 b - - 0 1");
        assert!(b.in_check(Colour::Black));
        assert!(!b.is_checkmate(Colour::Black));
        assert_eq!(b.legal_moves(Colour::Black).collect::<Vec<_>>(), vec![Move::new(C6, D8)]);
    }

    #[test]
    fn test_block_escapes_mate() {
        // Bishop on c6 can drop back to e8
        let mut b = board("3R2k1/5ppp/2b5/8/8/8/8/K7 b - - 0 1");
        assert!(!b.is_checkmate(Colour::Black));
        assert_eq!(b.legal_moves(Colour::Black).collect::<Vec<_>>(), vec![Move::new(C6, E8)]);
    }

    #[test]
    fn test_stalemate() {
        let mut b = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!b.in_check(Colour::Black));
        assert!(!b.has_legal_moves(Colour::Black));
        assert!(b.is_stalemate(Colour::Black));
        assert!(!b.is_checkmate(Colour::Black));
    }

    #[test]
    fn test_pinned_pieces_do_not_save_stalemate() {
        // The bishop is pinned, the king is boxed in
        let mut b = board("k7/b7/8/8/8/8/8/Q1K5 b - - 0 1");
        assert!(!b.in_check(Colour::Black));
        assert_eq!(b.legal_moves(Colour::Black).count(), 2);

        let mut b = board("k7/b7/8/8/8/8/1R6/Q1K5 b - - 0 1");
        assert!(b.is_stalemate(Colour::Black));
    }
}
