pub mod attacks;
pub mod fen;
pub mod movement;
pub mod simulate;
pub mod terminal;
pub mod validate;

pub use fen::{FenParseError, START_FEN};
pub use terminal::LegalMoves;
pub use validate::MoveError;

use crate::core::*;

/******************************************\
|==========================================|
|                  Board                   |
|==========================================|
\******************************************/

/// # Board representation
///
/// - 64 mailbox slots, each owning at most one piece
/// - `kings` caches the square of each side's king and is updated in the same step as any
///   king relocation, so check lookups never scan the board
/// - `valid` stays false until a position has been loaded

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    board: [Option<Piece>; Square::NUM],

    kings: [Option<Square>; Colour::NUM],

    half_moves: u16,

    stm: Colour,

    valid: bool,
}

/******************************************\
|==========================================|
|           Basic Implementation           |
|==========================================|
\******************************************/

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl Board {
    /// Empty, unloaded board: no pieces, no kings, White to move
    pub const fn new() -> Board {
        Board {
            board: [const { None }; Square::NUM],
            kings: [None; Colour::NUM],
            stm: Colour::White,
            half_moves: 0,
            valid: false,
        }
    }

    /// Drops every piece and returns to the unloaded state
    pub fn clear(&mut self) {
        *self = Board::new();
    }

    #[inline]
    pub fn on(&self, square: Square) -> Option<&Piece> {
        self.board[square.index()].as_ref()
    }

    #[inline]
    pub(crate) fn on_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.board[square.index()].as_mut()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.board[square.index()].is_none()
    }

    /// Colour of the piece standing on `square`, if any
    #[inline]
    pub fn colour_on(&self, square: Square) -> Option<Colour> {
        self.on(square).map(Piece::colour)
    }

    #[inline]
    pub fn stm(&self) -> Colour {
        self.stm
    }

    /// Number of half moves played since the start of the game
    #[inline]
    pub fn half_moves(&self) -> u16 {
        self.half_moves
    }

    #[inline]
    pub fn full_moves(&self) -> u16 {
        self.half_moves / 2 + 1
    }

    #[inline]
    pub fn king_square(&self, colour: Colour) -> Option<Square> {
        self.kings[colour.index()]
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether `colour`'s king is attacked. A side without a king is never in check.
    pub fn in_check(&self, colour: Colour) -> bool {
        self.king_square(colour)
            .is_some_and(|ksq| self.is_attacked(ksq, colour))
    }

    /// Hands the move to the other side
    pub fn pass_turn(&mut self) {
        self.stm = !self.stm;
        self.half_moves += 1;
    }

    /// Castling rights implied by the unmoved kings and rooks still on their home squares.
    ///
    /// This says nothing about whether castling is currently possible: blocking pieces and
    /// attacked squares are checked when the move is validated.
    pub fn castling(&self) -> Castling {
        let mut rights = Castling::NONE;

        for colour in Colour::iter() {
            for side in [CastleSide::King, CastleSide::Queen] {
                let king_home = self.is_unmoved(CastleSide::king_from(colour), colour, PieceType::King);
                let rook_home = self.is_unmoved(side.rook_from(colour), colour, PieceType::Rook);

                if king_home && rook_home {
                    rights.set(Castling::right(colour, side));
                }
            }
        }

        rights
    }

    /// Whether `square` holds an unmoved piece of the given colour and type
    pub(crate) fn is_unmoved(&self, square: Square, colour: Colour, pt: PieceType) -> bool {
        self.on(square)
            .is_some_and(|p| p.colour() == colour && p.pt() == pt && !p.has_moved())
    }

    /// Iterates over the squares occupied by `colour`
    pub fn squares_of(&self, colour: Colour) -> impl Iterator<Item = Square> + '_ {
        Square::iter().filter(move |&sq| self.colour_on(sq) == Some(colour))
    }

    pub(crate) fn set_stm(&mut self, stm: Colour) {
        self.stm = stm;
    }

    pub(crate) fn set_half_moves(&mut self, half_moves: u16) {
        self.half_moves = half_moves;
    }

    pub(crate) fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    pub(crate) fn set_king_square(&mut self, colour: Colour, square: Option<Square>) {
        self.kings[colour.index()] = square;
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{}", SEPARATOR)?;

        for rank in Rank::iter().rev() {
            write!(f, " {}   |", rank)?;

            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                let cell = match self.on(square) {
                    Some(piece) => piece.symbol(),
                    None => '.',
                };
                write!(f, " {} |", cell)?;
            }

            writeln!(f, "{}", SEPARATOR)?;
        }

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Current Side: {}", self.stm())?;
        writeln!(f, "Castling: {}", self.castling())?;
        writeln!(f, "Full Move: {}", self.full_moves())?;
        writeln!(f, "Fen: {}", self.fen())?;

        Ok(())
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
