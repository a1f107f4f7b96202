use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use itertools::Itertools;
use log::trace;
use thiserror::Error;

use crate::model::{Clue, PuzzleDefinition};

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("puzzle must have exactly one end clue; found {count} end clues: {ids:?}")]
    EndClueCount { count: usize, ids: Vec<String> },
    #[error("clue id '{0}' not found")]
    ClueNotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid puzzle file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The clue dependency graph and its play state.
///
/// Built once from a [`PuzzleDefinition`]; after construction the graph is
/// immutable and only answer submission mutates state. A clue moves from
/// pending to active once every clue it depends on is completed, and from
/// active to completed when answered correctly. The single end clue stops
/// at active: it is the final reveal, not a solvable entry.
#[derive(Debug, Clone)]
pub struct Puzzle {
    clues: IndexMap<String, Clue>,
    /// dependency id -> ids that depend on it (unlock fan-out)
    forward_edges: IndexMap<String, Vec<String>>,
    /// clue id -> ids it depends on (prerequisite check)
    reverse_edges: IndexMap<String, Vec<String>>,
    start_clues: Vec<String>,
    end_clues: Vec<String>,
    active_clues: HashSet<String>,
    incorrect_guesses: u32,
}

impl Puzzle {
    pub fn new(definition: PuzzleDefinition) -> Result<Self, PuzzleError> {
        let mut clues: IndexMap<String, Clue> = IndexMap::new();
        for (id, def) in definition.clues {
            clues.insert(
                id.clone(),
                Clue::new(id, def.text, def.answer, def.depends_on),
            );
        }

        let mut forward_edges: IndexMap<String, Vec<String>> =
            clues.keys().map(|id| (id.clone(), Vec::new())).collect();
        let mut reverse_edges: IndexMap<String, Vec<String>> =
            clues.keys().map(|id| (id.clone(), Vec::new())).collect();

        for (id, clue) in &clues {
            for dependency_id in &clue.depends_on {
                if !clues.contains_key(dependency_id) {
                    // dangling reference; the id never made it into the input
                    trace!(
                        target: "puzzle",
                        "Dropping unknown dependency {} of clue {}",
                        dependency_id,
                        id
                    );
                    continue;
                }
                if let Some(dependencies) = reverse_edges.get_mut(id) {
                    dependencies.push(dependency_id.clone());
                }
                if let Some(dependents) = forward_edges.get_mut(dependency_id) {
                    dependents.push(id.clone());
                }
            }
        }

        let start_clues: Vec<String> = clues
            .keys()
            .filter(|id| reverse_edges[id.as_str()].is_empty())
            .cloned()
            .sorted()
            .collect();
        let end_clues: Vec<String> = clues
            .keys()
            .filter(|id| forward_edges[id.as_str()].is_empty())
            .cloned()
            .sorted()
            .collect();

        for id in &end_clues {
            if let Some(clue) = clues.get_mut(id) {
                clue.mark_end_clue();
            }
        }

        if end_clues.len() != 1 {
            return Err(PuzzleError::EndClueCount {
                count: end_clues.len(),
                ids: end_clues,
            });
        }

        trace!(
            target: "puzzle",
            "Built puzzle: {} clues, start {:?}, end {:?}",
            clues.len(),
            start_clues,
            end_clues
        );

        let active_clues: HashSet<String> = start_clues.iter().cloned().collect();
        Ok(Self {
            clues,
            forward_edges,
            reverse_edges,
            start_clues,
            end_clues,
            active_clues,
            incorrect_guesses: 0,
        })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        let contents = fs::read_to_string(path)?;
        let definition: PuzzleDefinition = serde_json::from_str(&contents)?;
        Self::new(definition)
    }

    /// Attempts to answer a clue. Unknown or inactive clue ids are rejected
    /// without side effects. A correct answer deactivates the clue and
    /// activates every dependent whose prerequisites are all met; a wrong
    /// answer on anything but the end clue counts against the score.
    pub fn submit_answer(&mut self, clue_id: &str, attempt: &str) -> bool {
        if !self.active_clues.contains(clue_id) {
            trace!(target: "puzzle", "Ignoring answer for inactive clue {}", clue_id);
            return false;
        }
        let clue = match self.clues.get_mut(clue_id) {
            Some(clue) => clue,
            None => return false,
        };

        let is_end_clue = clue.is_end_clue;
        let correct = clue.submit_answer(attempt);

        if correct {
            trace!(target: "puzzle", "Clue {} completed", clue_id);
            self.active_clues.remove(clue_id);
            self.reveal_unlocked(clue_id);
        } else if !is_end_clue {
            self.incorrect_guesses += 1;
        }
        correct
    }

    /// Activates every dependent of a just-completed clue whose full
    /// prerequisite set is now completed. Re-checks the whole set on each
    /// completion event, so repeated invocation is idempotent.
    fn reveal_unlocked(&mut self, completed_id: &str) {
        let dependents = match self.forward_edges.get(completed_id) {
            Some(dependents) => dependents.clone(),
            None => return,
        };

        for dependent_id in dependents {
            let already_completed = self
                .clues
                .get(&dependent_id)
                .map(|clue| clue.completed)
                .unwrap_or(true);
            if already_completed {
                continue;
            }

            let prerequisites_met = self
                .reverse_edges
                .get(&dependent_id)
                .map(|dependencies| {
                    dependencies.iter().all(|id| {
                        self.clues
                            .get(id)
                            .map(|clue| clue.completed)
                            .unwrap_or(false)
                    })
                })
                .unwrap_or(true);

            if prerequisites_met {
                trace!(target: "puzzle", "Unlocking clue {}", dependent_id);
                self.active_clues.insert(dependent_id);
            }
        }
    }

    /// True once every clue other than the end clue is completed. The end
    /// clue never completes through submission, so it is excluded.
    pub fn is_complete(&self) -> bool {
        self.clues
            .values()
            .filter(|clue| !clue.is_end_clue)
            .all(|clue| clue.completed)
    }

    pub fn render_clue(&self, clue_id: &str) -> Result<String, PuzzleError> {
        match self.clues.get(clue_id) {
            Some(clue) => Ok(clue.render(&self.clues)),
            None => Err(PuzzleError::ClueNotFound(clue_id.to_string())),
        }
    }

    /// Renders the whole puzzle, i.e. the end clue.
    pub fn render_puzzle(&self) -> String {
        self.clues[self.end_clue_id()].render(&self.clues)
    }

    /// First clue depending on `clue_id`, in construction order. A
    /// convenience lookup, positional rather than best-match.
    pub fn first_dependent(&self, clue_id: &str) -> Option<&str> {
        self.forward_edges
            .get(clue_id)
            .and_then(|dependents| dependents.first())
            .map(String::as_str)
    }

    pub fn clue(&self, clue_id: &str) -> Option<&Clue> {
        self.clues.get(clue_id)
    }

    pub fn clues(&self) -> &IndexMap<String, Clue> {
        &self.clues
    }

    pub fn active_clues(&self) -> &HashSet<String> {
        &self.active_clues
    }

    pub fn start_clues(&self) -> &[String] {
        &self.start_clues
    }

    pub fn end_clue_id(&self) -> &str {
        // construction guarantees exactly one end clue
        &self.end_clues[0]
    }

    pub fn total_clues(&self) -> usize {
        self.clues.len()
    }

    pub fn incorrect_guesses(&self) -> u32 {
        self.incorrect_guesses
    }

    /// One point per clue, minus one per wrong guess. Signed: a determined
    /// enough player can go negative.
    pub fn score(&self) -> i64 {
        self.total_clues() as i64 - i64::from(self.incorrect_guesses)
    }
}
