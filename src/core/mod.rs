// Core module exports

// Board representation submodules
pub mod macros;
pub mod moves;
pub mod piece;
pub mod square;
pub mod types;

// Re-export common types for easier access
pub use moves::{Move, ParseMoveError};
pub use piece::{ParsePieceError, Piece, PieceType};
pub use square::{File, ParseFileError, ParseRankError, ParseSquareError, Rank, Square};
pub use types::{CastleSide, Castling, Colour, Direction};
