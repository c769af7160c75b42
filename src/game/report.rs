use crate::core::*;

/******************************************\
|==========================================|
|               Announcement               |
|==========================================|
\******************************************/

/// What an accepted move did to the opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    Check,
    Checkmate,
    Stalemate,
}

/******************************************\
|==========================================|
|               Move Report                |
|==========================================|
\******************************************/

/// Description of an accepted move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub mover: Colour,
    pub piece: PieceType,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceType>,
    pub castle: Option<CastleSide>,
    pub announcement: Option<Announcement>,
}

impl MoveReport {
    pub fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.announcement,
            Some(Announcement::Checkmate | Announcement::Stalemate)
        )
    }
}

impl std::fmt::Display for MoveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let opponent = !self.mover;

        write!(
            f,
            "{}'s {} moves from {} to {}",
            self.mover, self.piece, self.from, self.to
        )?;

        if let Some(captured) = self.captured {
            write!(f, " taking {}'s {}", opponent, captured)?;
        }

        match self.castle {
            Some(CastleSide::King) => write!(f, " castling king side")?,
            Some(CastleSide::Queen) => write!(f, " castling queen side")?,
            None => {}
        }

        match self.announcement {
            Some(Announcement::Check) => write!(f, "\n{} is in check", opponent),
            Some(Announcement::Checkmate) => write!(f, "\n{} is in checkmate", opponent),
            Some(Announcement::Stalemate) => write!(f, "\nStalemate"),
            None => Ok(()),
        }
    }
}
