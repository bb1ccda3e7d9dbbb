//! Core data model types for mcqbank.
//!
//! A store is an ordered list of multiple-choice questions. Records have no
//! persisted identifier; a record is addressed by its [`Position`] in storage
//! order, which is re-derived every time the store is loaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BankError;

/// One of the four answer slots of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    /// All choices in display order.
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::A => write!(f, "A"),
            Choice::B => write!(f, "B"),
            Choice::C => write!(f, "C"),
            Choice::D => write!(f, "D"),
        }
    }
}

impl FromStr for Choice {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Choice::A),
            "B" => Ok(Choice::B),
            "C" => Ok(Choice::C),
            "D" => Ok(Choice::D),
            other => Err(BankError::validation(format!(
                "answer must be one of A, B, C, D (got '{other}')"
            ))),
        }
    }
}

/// A single stored multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Subject the chapter belongs to.
    pub subject: String,
    /// Chapter within the subject.
    pub chapter: String,
    /// The question prompt.
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    /// The correct option.
    pub answer: Choice,
}

impl QuestionRecord {
    /// Text of the option for `choice`.
    pub fn option(&self, choice: Choice) -> &str {
        match choice {
            Choice::A => &self.option_a,
            Choice::B => &self.option_b,
            Choice::C => &self.option_c,
            Choice::D => &self.option_d,
        }
    }

    /// Whether this record belongs to the given subject and chapter.
    /// Matching is exact and case-sensitive.
    pub fn is_in(&self, subject: &str, chapter: &str) -> bool {
        self.subject == subject && self.chapter == chapter
    }
}

/// Raw input for a new question, as collected from the user.
#[derive(Debug, Clone)]
pub struct QuestionDraft {
    pub subject: String,
    pub chapter: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub answer: Choice,
}

/// Replacement values for an existing question.
///
/// Subject and chapter are not editable; moving a question means deleting
/// and re-adding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEdit {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub answer: Choice,
}

impl QuestionEdit {
    /// Start an edit pre-filled with the current values of `record`.
    pub fn from_record(record: &QuestionRecord) -> Self {
        Self {
            question: record.question.clone(),
            option_a: record.option_a.clone(),
            option_b: record.option_b.clone(),
            option_c: record.option_c.clone(),
            option_d: record.option_d.clone(),
            answer: record.answer,
        }
    }
}

/// Storage-order index of a record. Only valid for the store it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub usize);

impl Position {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record together with the position it was found at.
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    pub position: Position,
    pub record: &'a QuestionRecord,
}

/// The in-memory image of the backing file, in persisted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    records: Vec<QuestionRecord>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: Position) -> Option<&QuestionRecord> {
        self.records.get(position.index())
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Iterate records with their positions.
    pub fn iter(&self) -> impl Iterator<Item = Located<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| Located {
                position: Position(i),
                record,
            })
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<QuestionRecord> {
        &mut self.records
    }
}
