use thiserror::Error;

use crate::core::{Colour, Square};

/******************************************\
|==========================================|
|                Piece Type                |
|==========================================|
\******************************************/

/// # Piece Type representation
///
/// - The closed set of chess piece kinds, each with its own movement geometry

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
   Pawn, Knight, Bishop, Rook, Queen, King,
}

impl PieceType {
    /// Number of elements in the PieceType enum
    pub const NUM: usize = 6;
}

crate::impl_enum_index!(PieceType);

/******************************************\
|==========================================|
|                  Piece                   |
|==========================================|
\******************************************/

/// # Piece representation
///
/// - A piece's identity (type and colour) never changes; only the `has_moved` flag does
/// - Not `Copy`: a piece lives in exactly one board slot and is moved between slots

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pt: PieceType,
    colour: Colour,
    has_moved: bool,
}

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Piece {
    /// Creates a piece that is treated as having moved already (no castling or double push)
    pub const fn new(colour: Colour, pt: PieceType) -> Self {
        Self {
            pt,
            colour,
            has_moved: true,
        }
    }

    /// Creates a piece still on its starting square
    pub const fn unmoved(colour: Colour, pt: PieceType) -> Self {
        Self {
            pt,
            colour,
            has_moved: false,
        }
    }

    /// Returns the piece type of the piece
    #[inline]
    pub const fn pt(&self) -> PieceType {
        self.pt
    }

    /// Returns the colour of the piece
    #[inline]
    pub const fn colour(&self) -> Colour {
        self.colour
    }

    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    #[inline]
    pub fn set_moved(&mut self, moved: bool) {
        self.has_moved = moved;
    }

    /// Whether `from -> to` matches this piece's movement shape.
    ///
    /// Pure geometry: occupancy, blocking, turn order and king safety are all checked
    /// elsewhere. A pawn accepts its diagonal capture step here; the validator decides
    /// whether there is something to capture.
    pub fn can_move(&self, from: Square, to: Square) -> bool {
        if from == to {
            return false;
        }

        let file_dist = Square::file_dist(from, to);
        let rank_dist = Square::rank_dist(from, to);
        let straight = file_dist == 0 || rank_dist == 0;
        let diagonal = file_dist == rank_dist;

        match self.pt {
            PieceType::King => file_dist.max(rank_dist) == 1,
            PieceType::Queen => straight || diagonal,
            PieceType::Rook => straight,
            PieceType::Bishop => diagonal,
            PieceType::Knight => matches!((file_dist, rank_dist), (1, 2) | (2, 1)),
            PieceType::Pawn => self.pawn_can_move(from, to, file_dist),
        }
    }

    fn pawn_can_move(&self, from: Square, to: Square, file_dist: u8) -> bool {
        let step = Square::rank_delta(from, to);
        let forward = self.colour.rank_step();

        match file_dist {
            0 if step == forward => true,
            0 if step == 2 * forward => !self.has_moved && from.rank() == self.colour.pawn_rank(),
            1 => step == forward,
            _ => false,
        }
    }

    /// FEN letter: upper case for White, lower case for Black
    pub fn symbol(&self) -> char {
        let c = self.pt.symbol();
        match self.colour {
            Colour::White => c.to_ascii_uppercase(),
            Colour::Black => c,
        }
    }
}

impl PieceType {
    /// Lower case FEN letter
    pub const fn symbol(&self) -> char {
        PIECE_STR.as_bytes()[*self as usize] as char
    }

    pub const fn name(&self) -> &'static str {
        match self {
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

/// Piece type letters in `PieceType` discriminant order
const PIECE_STR: &str = "pnbrqk";

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/******************************************\
|==========================================|
|                Parse Piece               |
|==========================================|
\******************************************/

impl TryFrom<char> for Piece {
    type Error = ParsePieceError;

    /// Parse a FEN piece letter. The piece is created as moved; position loading
    /// decides which pieces are still unmoved.
    fn try_from(piece_char: char) -> Result<Self, Self::Error> {
        let colour = match piece_char.is_ascii_uppercase() {
            true => Colour::White,
            false => Colour::Black,
        };

        let lower = piece_char.to_ascii_lowercase();
        let pt = PieceType::iter()
            .find(|pt| pt.symbol() == lower)
            .ok_or(ParsePieceError::InvalidChar(piece_char))?;

        Ok(Piece::new(colour, pt))
    }
}

impl std::str::FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(piece_char), None) => Piece::try_from(piece_char),
            _ => Err(ParsePieceError::InvalidLength(s.chars().count())),
        }
    }
}

/******************************************\
|==========================================|
|            Piece Parse Error             |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePieceError {
    #[error("Invalid length for piece string: {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid character for piece string: '{0}', expected one of PNBRQK/pnbrqk")]
    InvalidChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
