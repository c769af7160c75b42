use super::{File, Rank, Square};

/******************************************\
|==========================================|
|                 Colours                  |
|==========================================|
\******************************************/

/// # Colour Representation
///
/// Represents the two colours in chess: White and Black.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black
}

impl Colour {
    /// Number of elements in the Colour enum
    pub const NUM: usize = 2;
}

crate::impl_enum_index!(Colour);

/******************************************\
|==========================================|
|                 Direction                |
|==========================================|
\******************************************/

/// # Direction Representation
///
/// Represents the 8 directions in chess, plus the knight jumps

#[rustfmt::skip]
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    N = 8, S = -8, W = -1, E = 1,
    NE = 9, NW = 7, SE = -7, SW = -9,
    NNE = 17, NNW = 15, NEE = 10, NWW = 6,
    SEE = -6, SWW = -10, SSE = -15, SSW = -17,
}

impl Direction {
    /// Rook directions
    pub const ORTHOGONAL: [Direction; 4] = [Direction::N, Direction::S, Direction::E, Direction::W];

    /// Bishop directions
    pub const DIAGONAL: [Direction; 4] = [Direction::NE, Direction::NW, Direction::SE, Direction::SW];

    /// Knight jumps
    #[rustfmt::skip]
    pub const KNIGHT: [Direction; 8] = [
        Direction::NNE, Direction::NNW, Direction::NEE, Direction::NWW,
        Direction::SEE, Direction::SWW, Direction::SSE, Direction::SSW,
    ];

    /// Single king steps
    #[rustfmt::skip]
    pub const KING: [Direction; 8] = [
        Direction::N, Direction::S, Direction::E, Direction::W,
        Direction::NE, Direction::NW, Direction::SE, Direction::SW,
    ];
}

/******************************************\
|==========================================|
|                 Castling                 |
|==========================================|
\******************************************/

/// # Castling Representation
///
/// Represents the castling rights for a position

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Castling(pub u8);

crate::impl_flag_set!(Castling);

/// Which wing of the board a castling move uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Colour {
    /// Returns the rank step a pawn of this colour advances by
    pub const fn rank_step(&self) -> i8 {
        match self {
            Colour::White => 1,
            Colour::Black => -1,
        }
    }

    /// Returns the forward left direction (pawn capture) for a colour
    pub const fn forward_left(&self) -> Direction {
        match self {
            Colour::White => Direction::NW,
            Colour::Black => Direction::SE,
        }
    }

    /// Returns the forward right direction (pawn capture) for a colour
    pub const fn forward_right(&self) -> Direction {
        match self {
            Colour::White => Direction::NE,
            Colour::Black => Direction::SW,
        }
    }

    /// Rank on which this colour's pawns start
    pub const fn pawn_rank(&self) -> Rank {
        Rank::Rank2.relative(*self)
    }
}

impl std::ops::Not for Colour {
    type Output = Self;

    /// Returns the opposite colour
    fn not(self) -> Self::Output {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Colour::White => "White",
            Colour::Black => "Black",
        };
        write!(f, "{}", name)
    }
}

impl Square {
    /// Try to convert a raw board index to a square (`None` if out of bounds)
    pub const fn try_index(value: i16) -> Option<Self> {
        if value >= 0 && value < Square::NUM as i16 {
            Square::try_from_index(value as usize)
        } else {
            None
        }
    }

    /// Try to step from a square in a direction.
    ///
    /// Returns `None` when the step leaves the board, including steps that would wrap
    /// around from the H file to the A file (or back).
    #[inline]
    pub const fn offset(self, rhs: Direction) -> Option<Self> {
        let file = self.file() as u8;

        use Direction::*;
        let valid = match rhs {
            N | S => true,
            E | NE | NNE | SE | SSE if file < File::FileH as u8 => true,
            W | NW | NNW | SW | SSW if file > File::FileA as u8 => true,
            NEE | SEE if file < File::FileG as u8 => true,
            NWW | SWW if file > File::FileB as u8 => true,
            _ => false,
        };

        match valid {
            true => Square::try_index(self as i16 + rhs as i16),
            false => None,
        }
    }
}

impl Direction {
    /// Unit direction leading from one square to another along a rank, file or diagonal.
    ///
    /// Returns `None` when the squares are equal or not aligned.
    pub const fn between(from: Square, to: Square) -> Option<Self> {
        if from as u8 == to as u8 {
            return None;
        }

        let rank_dist = (to.rank() as i8) - (from.rank() as i8);
        let file_dist = (to.file() as i8) - (from.file() as i8);

        match (rank_dist, file_dist) {
            (0, i) if i < 0 => Some(Direction::W),
            (0, i) if i > 0 => Some(Direction::E),
            (i, 0) if i > 0 => Some(Direction::N),
            (i, 0) if i < 0 => Some(Direction::S),

            (i, j) if i == j && i < 0 => Some(Direction::SW),
            (i, j) if i == j && i > 0 => Some(Direction::NE),
            (i, j) if i == -j && i > 0 => Some(Direction::NW),
            (i, j) if i == -j && i < 0 => Some(Direction::SE),

            _ => None,
        }
    }
}

impl Castling {
    // Atomic castling rights
    pub const WK: Castling = Castling(1);
    pub const WQ: Castling = Castling(2);
    pub const BK: Castling = Castling(4);
    pub const BQ: Castling = Castling(8);
    // All or nothing castling rights
    pub const ALL: Castling = Castling(15);
    pub const NONE: Castling = Castling(0);

    /// Helper function to check if a castling right has another castling right as a subset
    pub fn has(self, right: Castling) -> bool {
        self & right != Castling::NONE
    }

    /// Helper function to set castling rights
    pub fn set(&mut self, right: Castling) {
        *self |= right;
    }

    /// Castling right for a colour on a given wing
    pub const fn right(colour: Colour, side: CastleSide) -> Self {
        match (colour, side) {
            (Colour::White, CastleSide::King) => Castling::WK,
            (Colour::White, CastleSide::Queen) => Castling::WQ,
            (Colour::Black, CastleSide::King) => Castling::BK,
            (Colour::Black, CastleSide::Queen) => Castling::BQ,
        }
    }
}

impl std::fmt::Display for Castling {
    /// Displays castling right in the `KQkq` format
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }

        let mut s = String::new();
        if self.has(Castling::WK) {
            s.push('K');
        }
        if self.has(Castling::WQ) {
            s.push('Q');
        }
        if self.has(Castling::BK) {
            s.push('k');
        }
        if self.has(Castling::BQ) {
            s.push('q');
        }

        write!(f, "{}", s)
    }
}

impl CastleSide {
    /// The king's starting square for a colour
    pub const fn king_from(colour: Colour) -> Square {
        Square::E1.relative(colour)
    }

    /// Where the king lands when castling on this wing
    pub const fn king_to(&self, colour: Colour) -> Square {
        match self {
            CastleSide::King => Square::G1.relative(colour),
            CastleSide::Queen => Square::C1.relative(colour),
        }
    }

    /// The corner the castling rook starts from
    pub const fn rook_from(&self, colour: Colour) -> Square {
        match self {
            CastleSide::King => Square::H1.relative(colour),
            CastleSide::Queen => Square::A1.relative(colour),
        }
    }

    /// Where the rook lands, next to the king on the inner side
    pub const fn rook_to(&self, colour: Colour) -> Square {
        match self {
            CastleSide::King => Square::F1.relative(colour),
            CastleSide::Queen => Square::D1.relative(colour),
        }
    }

    /// Recognises one of the four canonical castling king moves
    pub fn from_king_move(colour: Colour, from: Square, to: Square) -> Option<Self> {
        if from != Self::king_from(colour) {
            return None;
        }

        [CastleSide::King, CastleSide::Queen]
            .into_iter()
            .find(|side| side.king_to(colour) == to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_directions() {
        assert_eq!(Direction::between(Square::E4, Square::E5), Some(Direction::N));
        assert_eq!(Direction::between(Square::E4, Square::E3), Some(Direction::S));
        assert_eq!(Direction::between(Square::E4, Square::F4), Some(Direction::E));
        assert_eq!(Direction::between(Square::E4, Square::D4), Some(Direction::W));
        assert_eq!(Direction::between(Square::E4, Square::F5), Some(Direction::NE));
        assert_eq!(Direction::between(Square::E4, Square::D5), Some(Direction::NW));
        assert_eq!(Direction::between(Square::E4, Square::F3), Some(Direction::SE));
        assert_eq!(Direction::between(Square::E4, Square::D3), Some(Direction::SW));
    }

    #[test]
    fn test_non_adjacent_directions() {
        assert_eq!(Direction::between(Square::A4, Square::H4), Some(Direction::E));
        assert_eq!(Direction::between(Square::G8, Square::C8), Some(Direction::W));
        assert_eq!(Direction::between(Square::A1, Square::H8), Some(Direction::NE));
        assert_eq!(Direction::between(Square::A8, Square::H1), Some(Direction::SE));
        assert_eq!(Direction::between(Square::E4, Square::B7), Some(Direction::NW));
    }

    #[test]
    fn test_unaligned_squares() {
        assert_eq!(Direction::between(Square::E4, Square::E4), None);
        assert_eq!(Direction::between(Square::E4, Square::F6), None);
        assert_eq!(Direction::between(Square::A1, Square::B3), None);
        assert_eq!(Direction::between(Square::H4, Square::A5), None);
        assert_eq!(Direction::between(Square::H4, Square::A3), None);
    }

    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(Square::E4.offset(Direction::N), Some(Square::E5));
        assert_eq!(Square::E4.offset(Direction::SW), Some(Square::D3));
        assert_eq!(Square::E4.offset(Direction::NNE), Some(Square::F6));
        assert_eq!(Square::E4.offset(Direction::NEE), Some(Square::G5));

        assert_eq!(Square::H4.offset(Direction::E), None);
        assert_eq!(Square::A4.offset(Direction::W), None);
        assert_eq!(Square::E8.offset(Direction::N), None);
        assert_eq!(Square::E1.offset(Direction::S), None);
        assert_eq!(Square::H7.offset(Direction::NEE), None);
        assert_eq!(Square::G3.offset(Direction::SEE), None);
        assert_eq!(Square::B2.offset(Direction::SWW), None);
    }

    #[test]
    fn test_offset_never_wraps_files() {
        for sq in Square::iter() {
            for dir in Direction::KING.iter().chain(Direction::KNIGHT.iter()) {
                if let Some(next) = sq.offset(*dir) {
                    assert!(Square::file_dist(sq, next) <= 2, "{sq} -> {next}");
                    assert!(Square::rank_dist(sq, next) <= 2, "{sq} -> {next}");
                }
            }
        }
    }

    #[test]
    fn test_try_index() {
        assert_eq!(Square::try_index(0), Some(Square::A1));
        assert_eq!(Square::try_index(36), Some(Square::E5));
        assert_eq!(Square::try_index(63), Some(Square::H8));
        assert_eq!(Square::try_index(-1), None);
        assert_eq!(Square::try_index(64), None);
    }

    #[test]
    fn test_castling_display() {
        assert_eq!(Castling::ALL.to_string(), "KQkq");
        assert_eq!(Castling::NONE.to_string(), "-");
        assert_eq!((Castling::WK | Castling::BQ).to_string(), "Kq");
    }

    #[test]
    fn test_castle_side_squares() {
        assert_eq!(
            CastleSide::from_king_move(Colour::White, Square::E1, Square::G1),
            Some(CastleSide::King)
        );
        assert_eq!(
            CastleSide::from_king_move(Colour::Black, Square::E8, Square::C8),
            Some(CastleSide::Queen)
        );
        assert_eq!(CastleSide::from_king_move(Colour::White, Square::E8, Square::G8), None);
        assert_eq!(CastleSide::from_king_move(Colour::White, Square::D1, Square::F1), None);
        assert_eq!(CastleSide::Queen.rook_to(Colour::Black), Square::D8);
        assert_eq!(CastleSide::King.rook_from(Colour::White), Square::H1);
    }
}
