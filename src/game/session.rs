use std::path::Path;

use itertools::Itertools;
use log::trace;

use crate::game::puzzle::{Puzzle, PuzzleError};
use crate::model::{ClueContext, PuzzleSnapshot, SubmissionOutcome};

/// Owns one [`Puzzle`] and exposes the query and mutation surface a
/// front-end drives: active clue listing, per-clue context, answer
/// submission with a refreshed view, and whole-puzzle snapshots.
///
/// One session per puzzle, no shared state anywhere else; a host that
/// handles concurrent callers must serialize access to the session.
pub struct GameSession {
    puzzle: Puzzle,
}

impl GameSession {
    pub fn new(puzzle: Puzzle) -> Self {
        Self { puzzle }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        Ok(Self::new(Puzzle::from_json_file(path)?))
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Currently answerable clue ids, sorted for stable display.
    pub fn active_clue_ids(&self) -> Vec<String> {
        self.puzzle.active_clues().iter().cloned().sorted().collect()
    }

    pub fn clue_context(&self, clue_id: &str) -> Result<ClueContext, PuzzleError> {
        let rendered_text = self.puzzle.render_clue(clue_id)?;
        let clue = self
            .puzzle
            .clue(clue_id)
            .ok_or_else(|| PuzzleError::ClueNotFound(clue_id.to_string()))?;

        Ok(ClueContext {
            clue_id: clue.id.clone(),
            rendered_text,
            completed: clue.completed,
            previous_answers: clue.previous_answers.clone(),
            depends_on: clue.depends_on.clone(),
            first_dependent: self.puzzle.first_dependent(clue_id).map(str::to_string),
        })
    }

    /// Submits an answer and returns the correctness together with the
    /// post-submission view. Unknown clue ids are an error; inactive or
    /// completed clues simply come back as not accepted.
    pub fn submit_answer(
        &mut self,
        clue_id: &str,
        attempt: &str,
    ) -> Result<SubmissionOutcome, PuzzleError> {
        if self.puzzle.clue(clue_id).is_none() {
            return Err(PuzzleError::ClueNotFound(clue_id.to_string()));
        }

        let correct = self.puzzle.submit_answer(clue_id, attempt);
        trace!(
            target: "session",
            "Answer for {} was {}",
            clue_id,
            if correct { "correct" } else { "not accepted" }
        );

        Ok(SubmissionOutcome {
            correct,
            clue: self.clue_context(clue_id)?,
            active_clues: self.active_clue_ids(),
            is_complete: self.puzzle.is_complete(),
            score: self.puzzle.score(),
        })
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        let active_clues = self
            .active_clue_ids()
            .iter()
            .filter_map(|id| self.clue_context(id).ok())
            .collect();

        PuzzleSnapshot {
            rendered_text: self.puzzle.render_puzzle(),
            active_clues,
            is_complete: self.puzzle.is_complete(),
            score: self.puzzle.score(),
            total_clues: self.puzzle.total_clues(),
        }
    }
}
