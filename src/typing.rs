use std::time::SystemTime;

use rand::{rngs::ThreadRng, Rng};
use tracing::debug;

use crate::prompts::{Category, Language, PromptRotator};

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum CharState {
    Unset,
    Correct,
    Incorrect,
}

/// Live figures shown next to the prompt.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct Metrics {
    pub accuracy: f64,
    pub cpm: u64,
    pub elapsed_secs: u64,
}

impl Metrics {
    pub fn accuracy_pct(&self) -> u64 {
        self.accuracy.round() as u64
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            accuracy: 100.0,
            cpm: 0,
            elapsed_secs: 0,
        }
    }
}

/// represents one practice prompt being typed, plus the prompt queued after it
#[derive(Debug)]
pub struct TypingSession<R: Rng = ThreadRng> {
    target: String,
    next_target: Option<String>,
    input: String,
    states: Vec<CharState>,
    started_at: Option<SystemTime>,
    language: Language,
    category: Category,
    rotator: PromptRotator<R>,
}

impl<R: Rng> TypingSession<R> {
    pub fn new(rotator: PromptRotator<R>, language: Language, category: Category) -> Self {
        let mut session = Self {
            target: String::new(),
            next_target: None,
            input: String::new(),
            states: vec![],
            started_at: None,
            language,
            category,
            rotator,
        };
        session.load_next_prompt();
        session
    }

    pub fn update(&mut self, new_input: &str) {
        self.update_at(new_input, SystemTime::now());
    }

    /// Replace the typed text and re-grade it against the target.
    pub fn update_at(&mut self, new_input: &str, now: SystemTime) {
        self.input.clear();
        self.input.push_str(new_input);

        if self.started_at.is_none() && !self.input.is_empty() {
            self.started_at = Some(now);
        }

        let mut typed = self.input.chars();
        self.states = self
            .target
            .chars()
            .map(|expected| match typed.next() {
                None => CharState::Unset,
                Some(c) if c == expected => CharState::Correct,
                Some(_) => CharState::Incorrect,
            })
            .collect();
    }

    pub fn metrics(&self, now: SystemTime) -> Metrics {
        let typed = self.input.chars().count();
        let correct = self
            .states
            .iter()
            .filter(|s| **s == CharState::Correct)
            .count();

        let accuracy = if typed > 0 {
            correct as f64 / typed as f64 * 100.0
        } else {
            100.0
        };

        let elapsed_secs = self
            .started_at
            .and_then(|start| now.duration_since(start).ok())
            .map_or(0, |d| d.as_secs());

        let cpm = if elapsed_secs == 0 {
            0
        } else {
            (typed as f64 / (elapsed_secs as f64 / 60.0)).round() as u64
        };

        Metrics {
            accuracy,
            cpm,
            elapsed_secs,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.input.chars().count() >= self.target.chars().count()
    }

    /// Promote the queued prompt and queue a fresh one. Callers only do this
    /// once [`is_complete`](Self::is_complete) holds.
    pub fn advance(&mut self) {
        self.load_next_prompt();
    }

    pub fn set_category_and_language(&mut self, language: Language, category: Category) {
        self.language = language;
        self.category = category;
        self.next_target = None;
        self.load_next_prompt();
    }

    pub fn set_language(&mut self, language: Language) {
        self.set_category_and_language(language, self.category);
    }

    pub fn set_category(&mut self, category: Category) {
        self.set_category_and_language(self.language, category);
    }

    fn load_next_prompt(&mut self) {
        self.target = match self.next_target.take() {
            Some(queued) => queued,
            None => self.rotator.next(self.language, self.category),
        };
        self.next_target = Some(self.rotator.next(self.language, self.category));
        self.clear_input();
        debug!(
            language = %self.language,
            category = %self.category,
            len = self.target.chars().count(),
            "new prompt"
        );
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.states = vec![CharState::Unset; self.target.chars().count()];
        self.started_at = None;
    }

    /// Character the learner should type next, if any remain.
    pub fn expected_char(&self) -> Option<char> {
        self.target.chars().nth(self.input.chars().count())
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn next_target(&self) -> &str {
        self.next_target.as_deref().unwrap_or_default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn states(&self) -> &[CharState] {
        &self.states
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::Catalog;
    use rand::{rngs::StdRng, SeedableRng};
    use std::time::Duration;

    fn single_prompt_session(prompt: &str) -> TypingSession<StdRng> {
        let mut catalog = Catalog::default();
        catalog.insert(Language::English, Category::Words, vec![prompt.to_string()]);
        TypingSession::new(
            PromptRotator::with_rng(catalog, StdRng::seed_from_u64(1)),
            Language::English,
            Category::Words,
        )
    }

    fn builtin_session(language: Language, category: Category) -> TypingSession<StdRng> {
        TypingSession::new(
            PromptRotator::with_rng(Catalog::builtin().unwrap(), StdRng::seed_from_u64(42)),
            language,
            category,
        )
    }

    #[test]
    fn test_new_session_has_both_slots() {
        let session = builtin_session(Language::English, Category::Sentences);

        assert!(!session.target().is_empty());
        assert!(!session.next_target().is_empty());
        assert_eq!(session.input(), "");
        assert!(session.states().iter().all(|s| *s == CharState::Unset));
        assert_eq!(session.states().len(), session.target().chars().count());
        assert!(!session.has_started());
    }

    #[test]
    fn test_exact_match_is_all_correct() {
        let mut session = single_prompt_session("cat");

        session.update("cat");

        assert_eq!(session.states(), &[CharState::Correct; 3]);
        assert_eq!(session.metrics(SystemTime::now()).accuracy_pct(), 100);
    }

    #[test]
    fn test_partial_mismatch_accuracy() {
        let mut session = single_prompt_session("cat");

        session.update("cap");

        assert_eq!(
            session.states(),
            &[CharState::Correct, CharState::Correct, CharState::Incorrect]
        );
        let metrics = session.metrics(SystemTime::now());
        assert!((metrics.accuracy - 66.666).abs() < 0.01);
        assert_eq!(metrics.accuracy_pct(), 67);
    }

    #[test]
    fn test_untyped_positions_stay_unset() {
        let mut session = single_prompt_session("hello");

        session.update("hx");

        assert_eq!(
            session.states(),
            &[
                CharState::Correct,
                CharState::Incorrect,
                CharState::Unset,
                CharState::Unset,
                CharState::Unset
            ]
        );
        assert_eq!(session.expected_char(), Some('l'));
    }

    #[test]
    fn test_states_follow_backspace() {
        let mut session = single_prompt_session("dog");

        session.update("dox");
        session.update("do");

        assert_eq!(
            session.states(),
            &[CharState::Correct, CharState::Correct, CharState::Unset]
        );
    }

    #[test]
    fn test_overtyped_input_counts_toward_accuracy() {
        let mut session = single_prompt_session("hi");

        session.update("hiya");

        assert_eq!(session.states(), &[CharState::Correct, CharState::Correct]);
        assert_eq!(session.metrics(SystemTime::now()).accuracy_pct(), 50);
    }

    #[test]
    fn test_default_metrics_before_typing() {
        let session = single_prompt_session("cat");

        let metrics = session.metrics(SystemTime::now());

        assert_eq!(metrics, Metrics::default());
        assert_eq!(metrics.accuracy_pct(), 100);
    }

    #[test]
    fn test_started_at_recorded_on_first_input_only() {
        let mut session = single_prompt_session("cat");
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);

        session.update_at("", t0);
        assert!(!session.has_started());

        session.update_at("c", t0);
        session.update_at("ca", t0 + Duration::from_secs(5));
        session.update_at("", t0 + Duration::from_secs(6));

        assert_eq!(session.started_at(), Some(t0));
    }

    #[test]
    fn test_cpm_for_fifty_chars_in_thirty_seconds() {
        let text = "a".repeat(50);
        let mut session = single_prompt_session(&text);
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(10_000);

        session.update_at(&text, t0);
        let metrics = session.metrics(t0 + Duration::from_secs(30));

        assert_eq!(metrics.elapsed_secs, 30);
        assert_eq!(metrics.cpm, 100);
    }

    #[test]
    fn test_cpm_zero_within_first_second() {
        let mut session = single_prompt_session("hello");
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(50);

        session.update_at("hel", t0);

        assert_eq!(session.metrics(t0 + Duration::from_millis(999)).cpm, 0);
        assert_eq!(session.metrics(t0 - Duration::from_secs(3)).elapsed_secs, 0);
    }

    #[test]
    fn test_elapsed_is_floored() {
        let mut session = single_prompt_session("hello");
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(50);

        session.update_at("hello", t0);
        let metrics = session.metrics(t0 + Duration::from_millis(2_900));

        assert_eq!(metrics.elapsed_secs, 2);
        assert_eq!(metrics.cpm, 150);
    }

    #[test]
    fn test_is_complete_by_length() {
        let mut session = single_prompt_session("hello");

        for (len, input) in ["", "h", "he", "hel", "hell", "hello", "hellos"]
            .iter()
            .enumerate()
        {
            session.update(input);
            assert_eq!(session.is_complete(), len >= 5, "input {input:?}");
        }
    }

    #[test]
    fn test_is_complete_counts_chars_not_bytes() {
        let mut session = single_prompt_session("사과");

        session.update("사");
        assert!(!session.is_complete());

        session.update("사고");
        assert!(session.is_complete());
        assert_eq!(session.states(), &[CharState::Correct, CharState::Incorrect]);
    }

    #[test]
    fn test_advance_promotes_next_target() {
        let mut session = builtin_session(Language::Korean, Category::Words);

        for _ in 0..20 {
            let queued = session.next_target().to_string();
            let target = session.target().to_string();
            session.update(&target);

            session.advance();

            assert_eq!(session.target(), queued);
            assert!(!session.next_target().is_empty());
            assert_eq!(session.input(), "");
            assert!(!session.has_started());
            assert!(session.states().iter().all(|s| *s == CharState::Unset));
        }
    }

    #[test]
    fn test_advance_resets_metrics() {
        let mut session = single_prompt_session("ab");
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(500);
        session.update_at("ax", t0);

        session.advance();

        assert_eq!(session.metrics(t0 + Duration::from_secs(10)), Metrics::default());
    }

    #[test]
    fn test_set_category_and_language_redraws_both_slots() {
        let mut session = builtin_session(Language::Korean, Category::Words);
        session.update("사");

        session.set_category_and_language(Language::English, Category::Consonants);

        let home_row = Catalog::builtin().unwrap();
        let entries = home_row.partition(Language::English, Category::Consonants);
        assert!(entries.contains(&session.target().to_string()));
        assert!(entries.contains(&session.next_target().to_string()));
        assert_eq!(session.language(), Language::English);
        assert_eq!(session.category(), Category::Consonants);
        assert_eq!(session.input(), "");
        assert!(!session.has_started());
    }

    #[test]
    fn test_set_language_keeps_category() {
        let mut session = builtin_session(Language::English, Category::Sentences);

        session.set_language(Language::Korean);

        let catalog = Catalog::builtin().unwrap();
        assert_eq!(session.category(), Category::Sentences);
        assert!(catalog
            .partition(Language::Korean, Category::Sentences)
            .contains(&session.target().to_string()));
    }

    #[test]
    fn test_update_does_not_touch_prompts() {
        let mut session = builtin_session(Language::English, Category::Words);
        let target = session.target().to_string();
        let next = session.next_target().to_string();

        session.update("zzzzzzzzzzzzzzzzzzzzzzz");

        assert_eq!(session.target(), target);
        assert_eq!(session.next_target(), next);
    }
}
