use super::Board;
use crate::core::*;

/******************************************\
|==========================================|
|             Attack Analysis              |
|==========================================|
\******************************************/

impl Board {
    /// Whether a piece of `colour` standing on `square` could be captured by the other side.
    ///
    /// A raw attack test: turn order and pins are ignored, and the square itself does not
    /// need to be occupied.
    pub fn is_attacked(&self, square: Square, colour: Colour) -> bool {
        let them = !colour;

        let held_by = |sq: Square, pts: &[PieceType]| {
            self.on(sq)
                .is_some_and(|p| p.colour() == them && pts.contains(&p.pt()))
        };

        let leapers = |dirs: &[Direction], pt: PieceType| {
            dirs.iter()
                .filter_map(|&dir| square.offset(dir))
                .any(|sq| held_by(sq, &[pt]))
        };

        let sliders = |dirs: &[Direction], pts: &[PieceType]| {
            dirs.iter()
                .filter_map(|&dir| self.first_occupied(square, dir))
                .any(|sq| held_by(sq, pts))
        };

        // Pawns capture towards the defender's side, so look along the defender's forward diagonals
        let pawn_dirs = [colour.forward_left(), colour.forward_right()];

        leapers(&Direction::KNIGHT, PieceType::Knight)
            || leapers(&pawn_dirs, PieceType::Pawn)
            || leapers(&Direction::KING, PieceType::King)
            || sliders(&Direction::ORTHOGONAL, &[PieceType::Rook, PieceType::Queen])
            || sliders(&Direction::DIAGONAL, &[PieceType::Bishop, PieceType::Queen])
    }

    /// First occupied square met walking from `from` (exclusive) in `dir`
    pub(crate) fn first_occupied(&self, from: Square, dir: Direction) -> Option<Square> {
        let mut sq = from;
        while let Some(next) = sq.offset(dir) {
            if !self.is_empty(next) {
                return Some(next);
            }
            sq = next;
        }
        None
    }

    /// Whether every square strictly between `from` and `to` is empty.
    ///
    /// Squares that do not share a rank, file or diagonal have nothing in between.
    pub fn path_clear(&self, from: Square, to: Square) -> bool {
        let Some(dir) = Direction::between(from, to) else {
            return true;
        };

        let mut sq = from;
        while let Some(next) = sq.offset(dir) {
            if next == to {
                return true;
            }
            if !self.is_empty(next) {
                return false;
            }
            sq = next;
        }

        true
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
