//! Compatibility quiz.
//!
//! A fixed sequence of two-option questions. Answering locks the question
//! and records whether the chosen option was the "match"; the quiz then
//! advances after [`ADVANCE_DELAY_MS`]. After the last question the number
//! of matches picks one of six result tiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::surface::{write_flag, write_text, write_visible, Attr, DisplaySurface, Target};

/// Pause between locking an answer and showing the next question.
pub const ADVANCE_DELAY_MS: u64 = 280;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    #[serde(default)]
    pub is_match: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub key: String,
    pub prompt: String,
    pub options: [QuizOption; 2],
}

impl QuizQuestion {
    /// Question whose first option is the match when `first_matches`.
    pub fn new(
        key: impl Into<String>,
        prompt: impl Into<String>,
        a: impl Into<String>,
        b: impl Into<String>,
        first_matches: bool,
    ) -> Self {
        Self {
            key: key.into(),
            prompt: prompt.into(),
            options: [
                QuizOption {
                    label: a.into(),
                    is_match: first_matches,
                },
                QuizOption {
                    label: b.into(),
                    is_match: !first_matches,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTier {
    MindReader,
    KnowEachOther,
    SomeCommon,
    Unpredictable,
    Chaos,
    Fallback,
}

impl ResultTier {
    /// Tier for an exact match count.
    pub fn from_matches(matches: usize) -> Self {
        match matches {
            5 => ResultTier::MindReader,
            4 => ResultTier::KnowEachOther,
            3 => ResultTier::SomeCommon,
            2 => ResultTier::Unpredictable,
            1 => ResultTier::Chaos,
            _ => ResultTier::Fallback,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ResultTier::MindReader => "Mind reader! You know me better than I know myself 💘",
            ResultTier::KnowEachOther => "We really know each other 💞",
            ResultTier::SomeCommon => "We have quite a bit in common 💗",
            ResultTier::Unpredictable => "I'm full of surprises, aren't I? 😏",
            ResultTier::Chaos => "Pure chaos... and I still love you 🙈",
            ResultTier::Fallback => "How??",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub matches: usize,
    pub total: usize,
    pub tier: ResultTier,
    pub score_line: String,
    pub message: String,
}

impl QuizResult {
    pub fn new(matches: usize, total: usize) -> Self {
        let tier = ResultTier::from_matches(matches);
        Self {
            matches,
            total,
            tier,
            score_line: format!("You matched {matches} out of {total} answers"),
            message: tier.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    current: usize,
    answers: BTreeMap<String, bool>,
    locked: Vec<bool>,
    selected: Vec<Option<usize>>,
    result: Option<QuizResult>,
}

impl Quiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let n = questions.len();
        Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
            locked: vec![false; n],
            selected: vec![None; n],
            result: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_locked(&self, question: usize) -> bool {
        self.locked.get(question).copied().unwrap_or(false)
    }

    pub fn answers(&self) -> &BTreeMap<String, bool> {
        &self.answers
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Lock in `option` for `question`.
    ///
    /// Ignored unless `question` is the active, unlocked one.
    pub fn answer(&mut self, question: usize, option: usize) -> Option<Event> {
        if question != self.current || self.is_locked(question) || self.result.is_some() {
            tracing::trace!(question, current = self.current, "answer ignored");
            return None;
        }
        let q = self.questions.get(question)?;
        let chosen = q.options.get(option)?;
        let key = q.key.clone();
        let is_match = chosen.is_match;

        self.locked[question] = true;
        self.selected[question] = Some(option);
        self.answers.insert(key.clone(), is_match);
        Some(Event::QuizAnswered {
            question,
            key,
            is_match,
            advance_in_ms: ADVANCE_DELAY_MS,
        })
    }

    /// Delayed advance scheduled by [`answer`](Self::answer). Stale calls
    /// (after a reset or for another question) do nothing.
    pub fn advance_from(&mut self, question: usize) -> Option<Event> {
        if question != self.current || !self.is_locked(question) || self.result.is_some() {
            return None;
        }
        self.advance()
    }

    /// Activate the next question, or finish and score.
    pub fn advance(&mut self) -> Option<Event> {
        if self.result.is_some() {
            return None;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            return Some(Event::QuizAdvanced {
                question: self.current,
            });
        }
        let matches = self.answers.values().filter(|m| **m).count();
        let result = QuizResult::new(matches, self.questions.len());
        tracing::debug!(matches, total = result.total, "quiz finished");
        self.result = Some(result.clone());
        Some(Event::QuizCompleted { result })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.current = 0;
        self.answers.clear();
        self.locked.iter_mut().for_each(|l| *l = false);
        self.selected.iter_mut().for_each(|s| *s = None);
        self.result = None;
        Some(Event::QuizReset)
    }

    // ── Render ───────────────────────────────────────────────────────

    pub fn render(&self, surface: &mut dyn DisplaySurface) {
        let finished = self.result.is_some();
        for (qi, question) in self.questions.iter().enumerate() {
            let target = Target::QuizQuestion(qi);
            write_text(surface, target.clone(), &question.prompt);
            write_visible(surface, target, !finished && qi == self.current);
            for (oi, option) in question.options.iter().enumerate() {
                let target = Target::QuizOption(qi, oi);
                write_text(surface, target.clone(), &option.label);
                write_flag(surface, target.clone(), Attr::Selected, self.selected[qi] == Some(oi));
                write_flag(surface, target, Attr::Disabled, self.locked[qi]);
            }
        }
        write_visible(surface, Target::QuizResult, finished);
        match &self.result {
            Some(result) => {
                write_text(surface, Target::QuizScore, &result.score_line);
                write_text(surface, Target::QuizMessage, &result.message);
            }
            None => {
                write_text(surface, Target::QuizScore, "");
                write_text(surface, Target::QuizMessage, "");
            }
        }
    }
}
