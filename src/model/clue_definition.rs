use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One raw clue entry as it appears in a puzzle JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueDefinition {
    /// The display template; may embed other clue ids.
    #[serde(rename = "clue", default)]
    pub text: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// The full puzzle input: clue id to definition, in file order. Insertion
/// order is preserved so graph adjacency lists are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    #[serde(default)]
    pub clues: IndexMap<String, ClueDefinition>,
}
