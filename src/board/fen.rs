use thiserror::Error;

use super::Board;
use crate::core::*;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const CASTLE_FEN: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

impl Board {
    /// Loads a position, replacing whatever the board held before.
    ///
    /// Only the placement and side to move are required; castling, en passant, halfmove
    /// and fullmove fields may be omitted from the end. The en passant field is checked
    /// for shape and then ignored. On error the board is left cleared and invalid.
    pub fn set(&mut self, fen: &str) -> Result<(), FenParseError> {
        self.clear();

        let parsed = self.parse_fields(fen);
        match &parsed {
            Ok(()) => self.set_valid(true),
            Err(_) => self.clear(),
        }

        parsed
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let mut board = Board::new();
        board.set(fen)?;
        Ok(board)
    }

    pub fn fen(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::iter().rev() {
            let mut empty_count = 0;
            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                match self.on(square) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.symbol());
                    }
                    None => {
                        empty_count += 1;
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.stm() {
            Colour::White => 'w',
            Colour::Black => 'b',
        });

        fen.push_str(&format!(" {} - 0 {}", self.castling(), self.full_moves()));

        fen
    }

    fn parse_fields(&mut self, fen: &str) -> Result<(), FenParseError> {
        let mut parts = fen.split_whitespace();

        let piece_placement = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        self.parse_piece_placement(piece_placement)?;

        let side_to_move = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        self.parse_side_to_move(side_to_move)?;

        if let Some(castling) = parts.next() {
            self.parse_castling(castling)?;
        }

        if let Some(enpassant) = parts.next() {
            Self::parse_enpassant(enpassant)?;
        }

        if let Some(fifty_move_token) = parts.next() {
            Self::parse_fifty_move(fifty_move_token)?;
        }

        if let Some(full_move_token) = parts.next() {
            let ply = self.parse_full_move(full_move_token)?;
            self.set_half_moves(ply);
        }

        if parts.next().is_some() {
            return Err(FenParseError::InvalidNumberOfFields);
        }

        Ok(())
    }

    fn parse_separator(
        rank_iter: &mut impl DoubleEndedIterator<Item = Rank>,
        rank: Rank,
        file: u8,
    ) -> Result<(Rank, u8), FenParseError> {
        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Rank {} ended prematurely at file index {} (expected 8) before '/'",
                rank, file
            )));
        }

        let next_rank = rank_iter.next().ok_or_else(|| {
            FenParseError::InvalidRankFormat(format!(
                "Too many rank separators ('/') found after completing rank {}",
                rank
            ))
        })?;

        Ok((next_rank, 0))
    }

    fn parse_skip(skip: char, idx: usize, rank: Rank, file: u8) -> Result<u8, FenParseError> {
        let skip_val = match skip.to_digit(10) {
            Some(digit @ 1..=8) => digit as u8,
            _ => {
                return Err(FenParseError::InvalidRankFormat(format!(
                    "Invalid skip digit '{}' (must be 1-8) at char index {}",
                    skip, idx
                )));
            }
        };

        if file + skip_val > 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Skip value {} exceeds rank length at file index {} on rank {}",
                skip_val, file, rank
            )));
        }

        Ok(skip_val)
    }

    fn parse_piece(&mut self, piece_char: char, rank: Rank, file: u8) -> Result<(), FenParseError> {
        let Some(file) = File::try_from_index(file as usize) else {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Piece placement '{}' attempted beyond file H on rank {}",
                piece_char, rank
            )));
        };

        let mut piece = Piece::try_from(piece_char)
            .map_err(|_| FenParseError::InvalidPiecePlacementChar(piece_char))?;

        let colour = piece.colour();
        match piece.pt() {
            PieceType::King if self.king_square(colour).is_some() => {
                return Err(FenParseError::MultipleKings(colour));
            }
            PieceType::Pawn if rank == colour.pawn_rank() => piece.set_moved(false),
            _ => {}
        }

        self.add_piece(piece, Square::from_parts(file, rank));

        Ok(())
    }

    fn parse_piece_placement(&mut self, piece_placement: &str) -> Result<(), FenParseError> {
        let mut rank_iter = Rank::iter().rev();

        let mut rank = rank_iter
            .next()
            .ok_or_else(|| FenParseError::InvalidRankFormat("Board has no ranks?".to_string()))?;

        let mut file: u8 = 0;

        for (i, char) in piece_placement.chars().enumerate() {
            match char {
                '/' => {
                    (rank, file) = Self::parse_separator(&mut rank_iter, rank, file)?;
                }

                skip if skip.is_ascii_digit() => {
                    file += Self::parse_skip(skip, i, rank, file)?;
                }

                piece_char => {
                    self.parse_piece(piece_char, rank, file)?;
                    file += 1;
                }
            }
        }

        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Final rank {} ended prematurely at file index {} (expected 8)",
                rank, file
            )));
        }

        if rank_iter.next().is_some() {
            return Err(FenParseError::InvalidRankFormat(
                "Not enough ranks specified in FEN string (expected 8)".to_string(),
            ));
        }

        Ok(())
    }

    fn parse_side_to_move(&mut self, side_to_move: &str) -> Result<(), FenParseError> {
        match side_to_move {
            "w" => self.set_stm(Colour::White),
            "b" => self.set_stm(Colour::Black),
            _ => return Err(FenParseError::InvalidSideToMove(side_to_move.to_string())),
        };
        Ok(())
    }

    /// A castling right marks the king and the matching corner rook as unmoved.
    /// Rights whose king or rook is not at home are dropped.
    fn parse_castling(&mut self, castling: &str) -> Result<(), FenParseError> {
        if castling == "-" {
            return Ok(());
        }

        for c in castling.chars() {
            let (colour, side) = match c {
                'K' => (Colour::White, CastleSide::King),
                'Q' => (Colour::White, CastleSide::Queen),
                'k' => (Colour::Black, CastleSide::King),
                'q' => (Colour::Black, CastleSide::Queen),
                _ => return Err(FenParseError::InvalidCastlingChar(c)),
            };

            let king_sq = CastleSide::king_from(colour);
            let rook_sq = side.rook_from(colour);

            let is_home = |sq: Square, pt: PieceType| {
                self.on(sq).is_some_and(|p| p.colour() == colour && p.pt() == pt)
            };

            if !(is_home(king_sq, PieceType::King) && is_home(rook_sq, PieceType::Rook)) {
                continue;
            }

            for sq in [king_sq, rook_sq] {
                if let Some(piece) = self.on_mut(sq) {
                    piece.set_moved(false);
                }
            }
        }

        Ok(())
    }

    fn parse_enpassant(enpassant: &str) -> Result<(), FenParseError> {
        if enpassant == "-" {
            return Ok(());
        }

        enpassant
            .parse::<Square>()
            .map(|_| ())
            .map_err(|_| FenParseError::InvalidEnPassantSquare(enpassant.to_string()))
    }

    fn parse_fifty_move(fifty_move_token: &str) -> Result<u8, FenParseError> {
        fifty_move_token
            .parse::<u8>()
            .map_err(|_| FenParseError::InvalidHalfmoveClock(fifty_move_token.to_string()))
    }

    fn parse_full_move(&self, full_move_token: &str) -> Result<u16, FenParseError> {
        let full_move_number = full_move_token
            .parse::<u16>()
            .map_err(|_| FenParseError::InvalidFullmoveNumber(full_move_token.to_string()))?;

        if full_move_number == 0 {
            return Err(FenParseError::InvalidFullmoveNumber(format!(
                "Fullmove number cannot be 0, found: {}",
                full_move_token
            )));
        }

        let ply = (full_move_number - 1)
            .checked_mul(2)
            .and_then(|ply| ply.checked_add(self.stm() as u16))
            .ok_or_else(|| FenParseError::InvalidFullmoveNumber(full_move_token.to_string()))?;

        Ok(ply)
    }
}

/******************************************\
|==========================================|
|             Fen Parse Errors             |
|==========================================|
\******************************************/

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum FenParseError {
    #[error("FEN string needs a placement and side to move, and at most 6 fields")]
    InvalidNumberOfFields,

    #[error("Invalid character in FEN piece placement: '{0}'")]
    InvalidPiecePlacementChar(char),

    #[error("Invalid rank format in FEN piece placement: {0}")]
    InvalidRankFormat(String),

    #[error("Invalid side to move in FEN: '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),

    #[error("Invalid character in FEN castling availability: '{0}'")]
    InvalidCastlingChar(char),

    #[error("Invalid en passant target square in FEN: '{0}'")]
    InvalidEnPassantSquare(String),

    #[error("Invalid halfmove clock value in FEN: '{0}'")]
    InvalidHalfmoveClock(String),

    #[error("Invalid fullmove number value in FEN: '{0}'")]
    InvalidFullmoveNumber(String),

    #[error("More than one {0} king in FEN piece placement")]
    MultipleKings(Colour),

    #[error("{0} is in check but it is not {0}'s turn to move")]
    OpponentInCheck(Colour),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    fn pt_on(board: &Board, sq: Square) -> Option<(Colour, PieceType)> {
        board.on(sq).map(|p| (p.colour(), p.pt()))
    }

    #[test]
    fn test_parse_start_fen() {
        let mut board = Board::new();
        assert!(board.set(START_FEN).is_ok());

        assert_eq!(pt_on(&board, Square::A1), Some((Colour::White, PieceType::Rook)));
        assert_eq!(pt_on(&board, Square::E1), Some((Colour::White, PieceType::King)));
        assert_eq!(pt_on(&board, Square::H8), Some((Colour::Black, PieceType::Rook)));
        assert_eq!(pt_on(&board, Square::D8), Some((Colour::Black, PieceType::Queen)));
        assert_eq!(pt_on(&board, Square::E4), None);
        assert_eq!(board.stm(), Colour::White);
        assert_eq!(board.castling(), Castling::ALL);
        assert_eq!(board.half_moves(), 0);
        assert!(board.is_valid());
        assert_eq!(board.fen(), START_FEN);
    }

    #[test]
    fn test_moved_flags_after_load() {
        let board = Board::from_fen(START_FEN).unwrap();
        assert!(!board.on(Square::E2).unwrap().has_moved());
        assert!(!board.on(Square::D7).unwrap().has_moved());
        assert!(!board.on(Square::E1).unwrap().has_moved());
        assert!(!board.on(Square::H8).unwrap().has_moved());
        // Knights and bishops carry no history that matters
        assert!(board.on(Square::G1).unwrap().has_moved());

        let board = Board::from_fen("4k3/8/8/8/4P3/8/8/R3K2R w - - 0 1").unwrap();
        assert!(board.on(Square::E4).unwrap().has_moved());
        assert!(board.on(Square::E1).unwrap().has_moved());
        assert!(board.on(Square::A1).unwrap().has_moved());
    }

    #[test]
    fn test_castling_rights_without_pieces_are_dropped() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w KQkq - 0 1").unwrap();
        assert_eq!(board.castling(), Castling::WK);
        assert_eq!(board.fen(), "4k3/8/8/8/8/8/8/4K2R w K - 0 1");
    }

    #[test]
    fn test_optional_trailing_fields() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
        assert_eq!(board.stm(), Colour::Black);
        assert_eq!(board.castling(), Castling::NONE);
        assert_eq!(board.half_moves(), 0);

        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - e3 12 30").unwrap();
        assert_eq!(board.half_moves(), 59);
        assert_eq!(board.full_moves(), 30);
        assert_eq!(board.fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 30");
    }

    #[test]
    fn test_missing_king_still_loads() {
        let board = Board::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(board.is_valid());
        assert_eq!(board.king_square(Colour::White), Some(Square::E1));
        assert_eq!(board.king_square(Colour::Black), None);
    }

    #[test]
    fn test_fen_multiple_kings() {
        let mut board = Board::new();
        let result = board.set("4k3/8/8/8/8/8/8/3KK3 w - - 0 1");
        assert_eq!(result, Err(FenParseError::MultipleKings(Colour::White)));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_error_leaves_board_cleared() {
        let mut board = Board::from_fen(START_FEN).unwrap();
        assert!(board.set("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(!board.is_valid());
        assert!(Square::iter().all(|sq| board.is_empty(sq)));
        assert_eq!(board.king_square(Colour::White), None);
    }

    #[test]
    fn test_fen_invalid_piece() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidPiecePlacementChar('x'))
        ));
    }

    #[test]
    fn test_fen_invalid_rank_length_short() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("ended prematurely at file index 7")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_short_at_end() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1";
        let result = board.set(fen);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Final rank 1 ended prematurely at file index 7")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_long_piece() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("attempted beyond file H")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_long_skip() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/P6P1/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Skip value 1 exceeds rank length")
        );
    }

    #[test]
    fn test_fen_invalid_skip_digits() {
        let mut board = Board::new();

        let zero = "rnbqkbnr/pppp0ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(
            board
                .set(zero)
                .unwrap_err()
                .to_string()
                .contains("Invalid skip digit '0'")
        );

        let nine = "rnbqkbnr/pppp9ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(
            board
                .set(nine)
                .unwrap_err()
                .to_string()
                .contains("Invalid skip digit '9'")
        );
    }

    #[test]
    fn test_fen_rank_count() {
        let mut board = Board::new();

        let too_many = board.set("8/8/8/8/8/8/8/8/8 w - - 0 1");
        assert!(too_many.unwrap_err().to_string().contains("Too many rank separators"));

        let too_few = board.set("8/8/8/8/8/8/8 w - - 0 1");
        assert!(too_few.unwrap_err().to_string().contains("Not enough ranks specified"));
    }

    #[test]
    fn test_fen_field_errors() {
        let mut board = Board::new();
        let placement = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

        assert_eq!(board.set(placement), Err(FenParseError::InvalidNumberOfFields));
        assert_eq!(board.set(""), Err(FenParseError::InvalidNumberOfFields));
        assert_eq!(
            board.set(&format!("{placement} white")),
            Err(FenParseError::InvalidSideToMove("white".to_string()))
        );
        assert_eq!(
            board.set(&format!("{placement} w KX")),
            Err(FenParseError::InvalidCastlingChar('X'))
        );
        assert_eq!(
            board.set(&format!("{placement} w KQkq e9")),
            Err(FenParseError::InvalidEnPassantSquare("e9".to_string()))
        );
        assert_eq!(
            board.set(&format!("{placement} w KQkq - 300")),
            Err(FenParseError::InvalidHalfmoveClock("300".to_string()))
        );
        assert!(matches!(
            board.set(&format!("{placement} w KQkq - 0 0")),
            Err(FenParseError::InvalidFullmoveNumber(_))
        ));
        assert_eq!(
            board.set(&format!("{placement} w KQkq - 0 1 extra")),
            Err(FenParseError::InvalidNumberOfFields)
        );
    }

    #[test]
    fn test_reload_replaces_previous_position() {
        let mut board = Board::from_fen(START_FEN).unwrap();
        board.set(CASTLE_FEN).unwrap();
        assert!(board.is_empty(Square::E2));
        assert!(board.is_empty(Square::D1));
        assert_eq!(board.fen(), CASTLE_FEN);
    }
}
