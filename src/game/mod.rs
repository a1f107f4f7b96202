pub mod puzzle;
pub mod session;

pub use puzzle::{Puzzle, PuzzleError};
pub use session::GameSession;
