use serde::{Deserialize, Serialize};

/// Everything a front-end needs to present one clue: the rendered text plus
/// the bookkeeping around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueContext {
    pub clue_id: String,
    pub rendered_text: String,
    pub completed: bool,
    pub previous_answers: Vec<String>,
    pub depends_on: Vec<String>,
    pub first_dependent: Option<String>,
}

/// Result of one answer submission, with the post-submission view refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub correct: bool,
    pub clue: ClueContext,
    pub active_clues: Vec<String>,
    pub is_complete: bool,
    pub score: i64,
}

/// Full view of the puzzle at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    pub rendered_text: String,
    pub active_clues: Vec<ClueContext>,
    pub is_complete: bool,
    pub score: i64,
    pub total_clues: usize,
}
