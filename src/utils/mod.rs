pub mod perft;

pub use perft::{divide, perft, perft_test};
