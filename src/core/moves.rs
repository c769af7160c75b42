use thiserror::Error;

use crate::core::{ParseSquareError, Square};

/******************************************\
|==========================================|
|                   Move                   |
|==========================================|
\******************************************/

/// # Move representation
///
/// - A move request: a start and an end square packed into 12 bits
/// - Bits 0-5 hold the start square, bits 6-11 the end square
/// - Carries no flags; castling and captures are read off the board when the move is played

#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub struct Move {
    data: u16,
}

impl Move {
    const FROM_SHIFT: u16 = 0;

    const TO_SHIFT: u16 = 6;

    const SQUARE_MASK: u16 = 0x3F;

    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        let data = ((from as u16) << Self::FROM_SHIFT) | ((to as u16) << Self::TO_SHIFT);
        Self { data }
    }

    #[inline(always)]
    pub const fn from(&self) -> Square {
        let index = (self.data >> Self::FROM_SHIFT) & Self::SQUARE_MASK;
        unsafe { Square::from_unchecked(index as u8) }
    }

    #[inline(always)]
    pub const fn to(&self) -> Square {
        let index = (self.data >> Self::TO_SHIFT) & Self::SQUARE_MASK;
        unsafe { Square::from_unchecked(index as u8) }
    }

    #[inline(always)]
    pub const fn raw(&self) -> u16 {
        self.data
    }
}

impl std::fmt::Display for Move {
    /// Long algebraic form, e.g. `e2e4`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from(), self.to())
    }
}

/******************************************\
|==========================================|
|                Parse Move                |
|==========================================|
\******************************************/

impl std::str::FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts `e2e4`, `E2E4` and `e2-e4`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = match s.len() {
            4 if s.is_char_boundary(2) => s.split_at(2),
            5 if s.is_char_boundary(2) && s.is_char_boundary(3) && &s[2..3] == "-" => {
                (&s[..2], &s[3..])
            }
            _ => return Err(ParseMoveError::InvalidLength(s.to_string())),
        };

        Ok(Move::new(from.parse()?, to.parse()?))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Invalid move string: '{0}', expected a start and end square such as e2e4")]
    InvalidLength(String),
    #[error(transparent)]
    Square(#[from] ParseSquareError),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::square::Square::*;

    #[test]
    fn test_encoding_decoding() {
        let m = Move::new(E2, E4);
        assert_eq!(m.from(), E2);
        assert_eq!(m.to(), E4);

        let corner = Move::new(H8, A1);
        assert_eq!(corner.from(), H8);
        assert_eq!(corner.to(), A1);
        assert_eq!(corner.raw(), 63);
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::new(E2, E4).to_string(), "e2e4");
        assert_eq!(Move::new(G8, F6).to_string(), "g8f6");
    }

    #[test]
    fn test_move_from_str() {
        assert_eq!("e2e4".parse::<Move>(), Ok(Move::new(E2, E4)));
        assert_eq!("E1G1".parse::<Move>(), Ok(Move::new(E1, G1)));
        assert_eq!("b8-c6".parse::<Move>(), Ok(Move::new(B8, C6)));
    }

    #[test]
    fn test_move_from_str_invalid() {
        assert!(matches!("e2".parse::<Move>(), Err(ParseMoveError::InvalidLength(_))));
        assert!(matches!("e2e4q".parse::<Move>(), Err(ParseMoveError::InvalidLength(_))));
        assert!(matches!(
            "i2e4".parse::<Move>(),
            Err(ParseMoveError::Square(ParseSquareError::InvalidFileChar('i')))
        ));
        assert!(matches!(
            "e2e9".parse::<Move>(),
            Err(ParseMoveError::Square(ParseSquareError::InvalidRankChar('9')))
        ));
    }
}
