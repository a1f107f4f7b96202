use indexmap::IndexMap;

/// One node of the puzzle graph: a piece of text hiding an answer. The text
/// may embed other clue ids, which render as nested bracketed clues until
/// those clues are solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub id: String,
    pub text: String,
    pub answer: String,
    pub depends_on: Vec<String>,
    pub completed: bool,
    pub is_end_clue: bool,
    /// Every submitted attempt, correct or not, in submission order and with
    /// original case and whitespace. Display history only, never game logic.
    pub previous_answers: Vec<String>,
}

impl Clue {
    pub fn new(id: String, text: String, answer: String, depends_on: Vec<String>) -> Self {
        Self {
            id,
            text,
            answer,
            depends_on,
            completed: false,
            is_end_clue: false,
            previous_answers: Vec::new(),
        }
    }

    /// Turns this clue into the puzzle's final reveal. End clues are never
    /// solved by typing, so the stored answer is blanked.
    pub fn mark_end_clue(&mut self) {
        self.is_end_clue = true;
        self.answer = String::new();
    }

    /// Records the attempt and checks it against the answer, ignoring case
    /// and surrounding whitespace. End clues always fail.
    ///
    /// There is no re-answer guard here; the puzzle layer gates submissions
    /// by activation state.
    pub fn submit_answer(&mut self, attempt: &str) -> bool {
        self.previous_answers.push(attempt.to_string());

        if self.is_end_clue {
            return false;
        }

        let correct = attempt.trim().to_lowercase() == self.answer.trim().to_lowercase();
        if correct {
            self.completed = true;
        }
        correct
    }

    /// Produces the display text for this clue given the full clue map.
    ///
    /// Completed clues render as their answer. Pending clues render their
    /// text with each dependency substituted by its own rendering, wrapped
    /// in square brackets while that dependency is unsolved. End clues
    /// render their raw text, embedded ids included: the final reveal is
    /// shown literally.
    pub fn render(&self, clues: &IndexMap<String, Clue>) -> String {
        if self.is_end_clue {
            return self.text.clone();
        }
        if self.completed {
            return self.answer.clone();
        }

        let mut rendered = self.text.clone();
        for dependency_id in &self.depends_on {
            if let Some(dependency) = clues.get(dependency_id) {
                let substitution = if dependency.completed {
                    dependency.render(clues)
                } else {
                    format!("[{}]", dependency.render(clues))
                };
                rendered = replace_id_token(&rendered, dependency_id, &substitution, clues);
            }
        }
        rendered
    }
}

/// Replaces every occurrence of `id` in `text` with `substitution`, skipping
/// occurrences that are really the leading characters of a longer known clue
/// id, so that replacing `C1` never clobbers part of `C11`.
fn replace_id_token(
    text: &str,
    id: &str,
    substitution: &str,
    clues: &IndexMap<String, Clue>,
) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(id) {
        result.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        // If a longer id also matches at this position, the shorter id is a
        // prefix of it; emit the longer id untouched.
        let shadowing = clues
            .keys()
            .filter(|other| other.len() > id.len() && tail.starts_with(other.as_str()))
            .map(|other| other.len())
            .max();

        match shadowing {
            Some(len) => {
                result.push_str(&tail[..len]);
                rest = &tail[len..];
            }
            None => {
                result.push_str(substitution);
                rest = &tail[id.len()..];
            }
        }
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clue(id: &str, text: &str, answer: &str, depends_on: &[&str]) -> Clue {
        Clue::new(
            id.to_string(),
            text.to_string(),
            answer.to_string(),
            depends_on.iter().map(|d| d.to_string()).collect(),
        )
    }

    fn clue_map(clues: Vec<Clue>) -> IndexMap<String, Clue> {
        clues.into_iter().map(|c| (c.id.clone(), c)).collect()
    }

    #[test]
    fn test_new_clue_starts_pending() {
        let c = clue("#C1#", "Test clue text", "Test Answer", &["#C0#"]);
        assert_eq!(c.id, "#C1#");
        assert_eq!(c.text, "Test clue text");
        assert_eq!(c.answer, "Test Answer");
        assert_eq!(c.depends_on, vec!["#C0#".to_string()]);
        assert!(!c.completed);
        assert!(!c.is_end_clue);
        assert!(c.previous_answers.is_empty());
    }

    #[test]
    fn test_submit_answer_correct() {
        let mut c = clue("#C1#", "text", "Correcto", &[]);
        assert!(c.submit_answer("Correcto"));
        assert!(c.completed);
    }

    #[test]
    fn test_submit_answer_case_insensitive() {
        let mut c = clue("#C1#", "text", "CaSeSeNsItIvE", &[]);
        assert!(c.submit_answer("casesensitive"));
        assert!(c.completed);

        let mut c2 = clue("#C2#", "text", "answer", &[]);
        assert!(c2.submit_answer("ANSWER"));
        assert!(c2.completed);
    }

    #[test]
    fn test_submit_answer_ignores_surrounding_whitespace() {
        let mut c = clue("#C1#", "text", "Answer", &[]);
        assert!(c.submit_answer("  Answer  "));
        assert!(c.completed);
    }

    #[test]
    fn test_submit_answer_incorrect() {
        let mut c = clue("#C1#", "text", "Correct", &[]);
        assert!(!c.submit_answer("Incorrect"));
        assert!(!c.completed);
    }

    #[test]
    fn test_submit_answer_empty_attempt() {
        let mut c = clue("#C1#", "text", "NotEmpty", &[]);
        assert!(!c.submit_answer(""));
        assert!(!c.completed);
    }

    #[test]
    fn test_submit_answer_empty_answer_is_solvable() {
        let mut c = clue("#C1#", "text", "", &[]);
        assert!(c.submit_answer(""));
        assert!(c.completed);

        c.completed = false;
        assert!(!c.submit_answer("not empty"));
        assert!(!c.completed);
    }

    #[test]
    fn test_submit_answer_records_history_verbatim() {
        let mut c = clue("#C1#", "text", "Answer", &[]);
        c.submit_answer("  First Try ");
        c.submit_answer("ANSWER");
        c.submit_answer("again");
        assert_eq!(
            c.previous_answers,
            vec![
                "  First Try ".to_string(),
                "ANSWER".to_string(),
                "again".to_string()
            ]
        );
    }

    #[test]
    fn test_render_completed_clue() {
        let mut c1 = clue("#C1#", "Text C1", "Ans C1", &[]);
        c1.completed = true;
        let clues = clue_map(vec![c1]);
        assert_eq!(clues["#C1#"].render(&clues), "Ans C1");
    }

    #[test]
    fn test_render_pending_no_dependencies() {
        let clues = clue_map(vec![clue("#C1#", "Text C1", "Ans C1", &[])]);
        assert_eq!(clues["#C1#"].render(&clues), "Text C1");
    }

    #[test]
    fn test_render_pending_dependency_is_bracketed() {
        let clues = clue_map(vec![
            clue("#C1#", "Text C1", "Ans C1", &[]),
            clue("#C2#", "Text C2 #C1#", "Ans C2", &["#C1#"]),
        ]);
        assert_eq!(clues["#C2#"].render(&clues), "Text C2 [Text C1]");
    }

    #[test]
    fn test_render_completed_dependency_is_unbracketed() {
        let mut c1 = clue("#C1#", "Text C1", "Ans C1", &[]);
        c1.completed = true;
        let clues = clue_map(vec![c1, clue("#C2#", "Text C2 #C1#", "Ans C2", &["#C1#"])]);
        assert_eq!(clues["#C2#"].render(&clues), "Text C2 Ans C1");
    }

    #[test]
    fn test_render_nested_dependencies_all_pending() {
        let clues = clue_map(vec![
            clue("#C1#", "Text C1", "Ans C1", &[]),
            clue("#C2#", "Text C2 #C1#", "Ans C2", &["#C1#"]),
            clue("#C3#", "Text C3 #C2#", "Ans C3", &["#C2#"]),
        ]);
        assert_eq!(clues["#C3#"].render(&clues), "Text C3 [Text C2 [Text C1]]");
    }

    #[test]
    fn test_render_nested_dependencies_inner_completed() {
        let mut c1 = clue("#C1#", "Text C1", "Ans C1", &[]);
        c1.completed = true;
        let clues = clue_map(vec![
            c1,
            clue("#C2#", "Text C2 #C1#", "Ans C2", &["#C1#"]),
            clue("#C3#", "Text C3 #C2#", "Ans C3", &["#C2#"]),
        ]);
        assert_eq!(clues["#C3#"].render(&clues), "Text C3 [Text C2 Ans C1]");
    }

    #[test]
    fn test_render_nested_dependencies_middle_completed() {
        let mut c1 = clue("#C1#", "Text C1", "Ans C1", &[]);
        c1.completed = true;
        let mut c2 = clue("#C2#", "Text C2 #C1#", "Ans C2", &["#C1#"]);
        c2.completed = true;
        let clues = clue_map(vec![
            c1,
            c2,
            clue("#C3#", "Text C3 #C2#", "Ans C3", &["#C2#"]),
        ]);
        assert_eq!(clues["#C3#"].render(&clues), "Text C3 Ans C2");
    }

    #[test]
    fn test_render_id_prefix_of_longer_id() {
        let clues = clue_map(vec![
            clue("#C1#", "A", "Ans C1", &[]),
            clue("#C11#", "B", "Ans C11", &[]),
            clue("#C2#", "Test #C1# and #C11#", "Ans C2", &["#C1#", "#C11#"]),
        ]);
        assert_eq!(clues["#C2#"].render(&clues), "Test [A] and [B]");
    }

    #[test]
    fn test_render_id_prefix_of_longer_id_one_completed() {
        let mut c1 = clue("#C1#", "A", "Ans C1", &[]);
        c1.completed = true;
        let clues = clue_map(vec![
            c1,
            clue("#C11#", "B", "Ans C11", &[]),
            clue("#C2#", "Test #C1# and #C11#", "Ans C2", &["#C1#", "#C11#"]),
        ]);
        assert_eq!(clues["#C2#"].render(&clues), "Test Ans C1 and [B]");
    }

    #[test]
    fn test_replace_id_token_skips_longer_id_without_delimiters() {
        let clues = clue_map(vec![clue("C1", "A", "a", &[]), clue("C11", "B", "b", &[])]);
        assert_eq!(
            replace_id_token("see C11 then C1", "C1", "X", &clues),
            "see C11 then X"
        );
    }

    #[test]
    fn test_render_diamond_dependency() {
        //     C1
        //    /  \
        //   C2  C3
        //    \  /
        //     C4
        let clues = clue_map(vec![
            clue("#C1#", "Text C1", "Ans C1", &[]),
            clue("#C2#", "Loves #C1#", "Ans C2", &["#C1#"]),
            clue("#C3#", "Hates #C1#", "Ans C3", &["#C1#"]),
            clue("#C4#", "End #C2# #C3#", "Ans C4", &["#C2#", "#C3#"]),
        ]);
        assert_eq!(
            clues["#C4#"].render(&clues),
            "End [Loves [Text C1]] [Hates [Text C1]]"
        );
    }

    #[test]
    fn test_render_diamond_dependency_shared_ancestor_completed() {
        let mut c1 = clue("#C1#", "Text C1", "Ans C1", &[]);
        c1.completed = true;
        let clues = clue_map(vec![
            c1,
            clue("#C2#", "Loves #C1#", "Ans C2", &["#C1#"]),
            clue("#C3#", "Hates #C1#", "Ans C3", &["#C1#"]),
            clue("#C4#", "End #C2# #C3#", "Ans C4", &["#C2#", "#C3#"]),
        ]);
        assert_eq!(
            clues["#C4#"].render(&clues),
            "End [Loves Ans C1] [Hates Ans C1]"
        );
    }

    #[test]
    fn test_render_diamond_dependency_branch_completed() {
        let mut c1 = clue("#C1#", "Text C1", "Ans C1", &[]);
        c1.completed = true;
        let mut c2 = clue("#C2#", "Loves #C1#", "Ans C2", &["#C1#"]);
        c2.completed = true;
        let clues = clue_map(vec![
            c1,
            c2,
            clue("#C3#", "Hates #C1#", "Ans C3", &["#C1#"]),
            clue("#C4#", "End #C2# #C3#", "Ans C4", &["#C2#", "#C3#"]),
        ]);
        assert_eq!(clues["#C4#"].render(&clues), "End Ans C2 [Hates Ans C1]");
    }

    #[test]
    fn test_mark_end_clue_blanks_answer() {
        let mut c = clue("#E1#", "This is the end.", "ShouldBeIgnored", &[]);
        c.mark_end_clue();
        assert!(c.is_end_clue);
        assert_eq!(c.answer, "", "end clue answer should be blanked");
        assert!(!c.completed);
    }

    #[test]
    fn test_end_clue_never_accepts_an_answer() {
        let mut c = clue("#E1#", "Final text.", "OriginalAnswer", &[]);
        c.mark_end_clue();

        assert!(!c.submit_answer("AnyAttempt"));
        assert!(!c.completed);

        // Not even the blank answer it was forced to.
        assert!(!c.submit_answer(""));
        assert!(!c.completed);
        assert_eq!(c.previous_answers.len(), 2);
    }

    #[test]
    fn test_end_clue_renders_raw_text() {
        let mut end = clue("#E1#", "EndText #C1#", "OriginalAnswer", &["#C1#"]);
        end.mark_end_clue();

        let dependency = clue("#C1#", "DepText", "DepAns", &[]);
        let mut clues = clue_map(vec![dependency, end]);

        // The final reveal is literal: embedded ids stay as-is.
        assert_eq!(clues["#E1#"].render(&clues), "EndText #C1#");

        if let Some(dep) = clues.get_mut("#C1#") {
            dep.completed = true;
        }
        assert_eq!(clues["#E1#"].render(&clues), "EndText #C1#");

        if let Some(end) = clues.get_mut("#E1#") {
            end.completed = true;
        }
        assert_eq!(clues["#E1#"].render(&clues), "EndText #C1#");
    }
}
