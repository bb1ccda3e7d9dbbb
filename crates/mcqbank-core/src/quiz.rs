//! Quiz session state machine.
//!
//! A session samples questions from one subject/chapter, lets the user move
//! back and forth recording answers, and scores the attempt on submission.
//! It works on its own copy of the sampled records and never touches the
//! store.

use std::collections::BTreeMap;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BankError, Result};
use crate::model::{Choice, QuestionRecord, Store};
use crate::repository::filter;

/// Quiz length offered before the user picks one, capped by the pool size.
pub const DEFAULT_QUIZ_SIZE: usize = 5;

/// Quiz length to offer for a pool of `pool` questions.
pub fn default_sample_size(pool: usize) -> usize {
    DEFAULT_QUIZ_SIZE.min(pool)
}

/// Result of a submitted quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 * 100.0 / self.total as f64
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// One attempt at a sampled quiz.
///
/// Deserializing checks the same shape `start` guarantees: at least one
/// item, a current index and answer keys within the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SavedSession")]
pub struct QuizSession {
    subject: String,
    chapter: String,
    items: Vec<QuestionRecord>,
    current_index: usize,
    answers: BTreeMap<usize, Choice>,
    finished: bool,
}

#[derive(Deserialize)]
struct SavedSession {
    subject: String,
    chapter: String,
    items: Vec<QuestionRecord>,
    current_index: usize,
    #[serde(default)]
    answers: BTreeMap<usize, Choice>,
    #[serde(default)]
    finished: bool,
}

impl TryFrom<SavedSession> for QuizSession {
    type Error = BankError;

    fn try_from(saved: SavedSession) -> Result<Self> {
        let len = saved.items.len();
        if len == 0 {
            return Err(BankError::validation("saved quiz has no questions"));
        }
        if saved.current_index >= len {
            return Err(BankError::validation(format!(
                "saved quiz is at question {} of {len}",
                saved.current_index + 1
            )));
        }
        if let Some(index) = saved.answers.keys().find(|&&i| i >= len) {
            return Err(BankError::validation(format!(
                "saved quiz answers question {} of {len}",
                index + 1
            )));
        }
        Ok(Self {
            subject: saved.subject,
            chapter: saved.chapter,
            items: saved.items,
            current_index: saved.current_index,
            answers: saved.answers,
            finished: saved.finished,
        })
    }
}

impl QuizSession {
    /// Sample `sample_size` distinct questions from `subject`/`chapter`.
    pub fn start(store: &Store, subject: &str, chapter: &str, sample_size: usize) -> Result<Self> {
        Self::start_with_rng(store, subject, chapter, sample_size, &mut rand::rng())
    }

    /// Like [`QuizSession::start`], drawing from the given RNG.
    pub fn start_with_rng<R: Rng + ?Sized>(
        store: &Store,
        subject: &str,
        chapter: &str,
        sample_size: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut pool: Vec<QuestionRecord> = filter(store, subject, chapter)
            .into_iter()
            .map(|l| l.record.clone())
            .collect();

        if pool.is_empty() {
            return Err(BankError::validation(format!(
                "no questions available for {subject} / {chapter}"
            )));
        }
        if sample_size < 1 || sample_size > pool.len() {
            return Err(BankError::validation(format!(
                "number of questions must be between 1 and {} (got {sample_size})",
                pool.len()
            )));
        }

        pool.shuffle(rng);
        pool.truncate(sample_size);

        debug!(%subject, %chapter, size = sample_size, "quiz started");
        Ok(Self {
            subject: subject.to_string(),
            chapter: chapter.to_string(),
            items: pool,
            current_index: 0,
            answers: BTreeMap::new(),
            finished: false,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    pub fn items(&self) -> &[QuestionRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question currently shown.
    pub fn current(&self) -> &QuestionRecord {
        &self.items[self.current_index]
    }

    /// The answer recorded for `index`, if any.
    pub fn selected(&self, index: usize) -> Option<Choice> {
        self.answers.get(&index).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Fraction of the quiz reached, counting the current question.
    pub fn progress(&self) -> f64 {
        (self.current_index + 1) as f64 / self.items.len() as f64
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.items.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Record or overwrite the answer for question `index`.
    pub fn answer(&mut self, index: usize, choice: Choice) -> Result<()> {
        if self.finished {
            return Err(BankError::validation("quiz already submitted"));
        }
        if index >= self.items.len() {
            return Err(BankError::validation(format!(
                "question {} does not exist in a quiz of {}",
                index + 1,
                self.items.len()
            )));
        }
        self.answers.insert(index, choice);
        Ok(())
    }

    /// Answer the question currently shown.
    pub fn answer_current(&mut self, choice: Choice) -> Result<()> {
        self.answer(self.current_index, choice)
    }

    /// Move to the next question. Does nothing on the last one.
    pub fn advance(&mut self) {
        if !self.is_last() {
            self.current_index += 1;
        }
    }

    /// Move to the previous question. Does nothing on the first one.
    pub fn retreat(&mut self) {
        if !self.is_first() {
            self.current_index -= 1;
        }
    }

    /// Score the attempt and close the session. Unanswered questions count as wrong.
    pub fn submit(&mut self) -> Result<Score> {
        if self.finished {
            return Err(BankError::validation("quiz already submitted"));
        }
        let correct = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, item)| self.answers.get(i) == Some(&item.answer))
            .count();
        self.finished = true;

        let score = Score {
            correct,
            total: self.items.len(),
        };
        debug!(subject = %self.subject, chapter = %self.chapter, %score, "quiz submitted");
        Ok(score)
    }
}
