use super::Board;
use crate::core::*;

/******************************************\
|==========================================|
|              Move Simulator              |
|==========================================|
\******************************************/

impl Board {
    /// Temporarily moves the piece on `from` to `to`, runs `probe` on the result, then puts
    /// every slot and the king cache back exactly as they were.
    ///
    /// Only the two touched slots and the king cache change; moved flags, turn and
    /// validity are never modified, so the restore is exact.
    pub(crate) fn with_move_applied<R>(
        &mut self,
        from: Square,
        to: Square,
        probe: impl FnOnce(&Board) -> R,
    ) -> R {
        let kings = self.kings;

        let moving = self.board[from.index()].take();
        let captured = std::mem::replace(&mut self.board[to.index()], moving);

        if let Some(piece) = &self.board[to.index()] {
            if piece.pt() == PieceType::King {
                self.kings[piece.colour().index()] = Some(to);
            }
        }
        if let Some(victim) = captured.as_ref().filter(|p| p.pt() == PieceType::King) {
            self.kings[victim.colour().index()] = None;
        }

        let result = probe(self);

        let moved = std::mem::replace(&mut self.board[to.index()], captured);
        self.board[from.index()] = moved;
        self.kings = kings;

        result
    }

    /// Whether playing `from -> to` leaves the mover's king unattacked.
    ///
    /// Only king exposure is judged here; the move is assumed to have passed validation.
    /// An empty `from` square is never safe.
    pub fn is_move_safe(&mut self, from: Square, to: Square) -> bool {
        let Some(colour) = self.colour_on(from) else {
            return false;
        };

        self.with_move_applied(from, to, |board| !board.in_check(colour))
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
    use crate::board::fen::START_FEN;
    use Square::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_pinned_piece_is_unsafe() {
        // Bishop on e2 pinned by the rook on e8
        let mut b = board("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(!b.is_move_safe(E2, D3));
        assert!(!b.is_move_safe(E2, F1));
        assert!(b.is_move_safe(E1, D1));
        assert!(b.is_move_safe(E1, F2));
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let mut b = board("4k3/8/8/8/8/8/r7/4K3 w - - 0 1");
        assert!(!b.is_move_safe(E1, E2));
        assert!(!b.is_move_safe(E1, D2));
        assert!(b.is_move_safe(E1, F1));
    }

    #[test]
    fn test_capturing_the_checker_is_safe() {
        let mut b = board("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1");
        assert!(b.in_check(Colour::White));
        assert!(b.is_move_safe(E1, D2));
        assert!(!b.is_move_safe(E1, E2));
        assert!(!b.is_move_safe(E1, D1));
    }

    #[test]
    fn test_simulation_restores_board() {
        let mut b = board("r3k2r/pp3ppp/8/3q4/8/8/PP3PPP/R3K2R w KQkq - 0 1");
        let before = b.clone();

        for from in Square::iter() {
            for to in Square::iter() {
                b.is_move_safe(from, to);
                assert_eq!(b, before, "Board changed after simulating {from}{to}");
            }
        }
    }

    #[test]
    fn test_probe_sees_moved_king() {
        let mut b = board(START_FEN);
        let seen = b.with_move_applied(E1, E4, |board| board.king_square(Colour::White));
        assert_eq!(seen, Some(E4));
        assert_eq!(b.king_square(Colour::White), Some(E1));

        let seen = b.with_move_applied(D1, E8, |board| board.king_square(Colour::Black));
        assert_eq!(seen, None);
        assert_eq!(b.king_square(Colour::Black), Some(E8));
    }

    #[test]
    fn test_empty_source_is_unsafe() {
        let mut b = board(START_FEN);
        assert!(!b.is_move_safe(E4, E5));
    }
}
