mod clue;
mod clue_definition;
mod puzzle_snapshot;

pub use clue::Clue;
pub use clue_definition::{ClueDefinition, PuzzleDefinition};
pub use puzzle_snapshot::{ClueContext, PuzzleSnapshot, SubmissionOutcome};
