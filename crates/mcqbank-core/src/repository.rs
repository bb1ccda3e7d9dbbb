//! Query and mutation API over a record store.
//!
//! Queries are free functions over a loaded [`Store`]. Mutations go through
//! [`QuestionBank`], which validates input, applies the change to a copy of
//! the caller's snapshot, persists it, and only then hands the new snapshot
//! back. A failed mutation leaves both the snapshot and the file untouched.

use std::collections::BTreeSet;

use tracing::info;

use crate::error::{BankError, Result};
use crate::model::{Located, Position, QuestionDraft, QuestionEdit, QuestionRecord, Store};
use crate::store::RecordStore;

/// Distinct subjects, sorted and deduplicated.
pub fn list_subjects(store: &Store) -> Vec<String> {
    store
        .records()
        .iter()
        .map(|r| r.subject.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Distinct chapters of `subject`, sorted and deduplicated.
pub fn list_chapters(store: &Store, subject: &str) -> Vec<String> {
    store
        .records()
        .iter()
        .filter(|r| r.subject == subject)
        .map(|r| r.chapter.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// All records in `subject`/`chapter`, in storage order.
///
/// An unknown pairing yields an empty list.
pub fn filter<'a>(store: &'a Store, subject: &str, chapter: &str) -> Vec<Located<'a>> {
    store
        .iter()
        .filter(|l| l.record.is_in(subject, chapter))
        .collect()
}

/// Number of records in `subject`/`chapter`.
pub fn count(store: &Store, subject: &str, chapter: &str) -> usize {
    store
        .records()
        .iter()
        .filter(|r| r.is_in(subject, chapter))
        .count()
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BankError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim and check `value` unless it is unchanged from `current`, which is kept as stored.
fn revised(field: &str, value: String, current: &str) -> Result<String> {
    if value == current {
        return Ok(value);
    }
    required(field, &value)
}

fn apply_edit(record: &mut QuestionRecord, edit: QuestionEdit) -> Result<()> {
    let question = revised("question", edit.question, &record.question)?;
    let option_a = revised("option A", edit.option_a, &record.option_a)?;
    let option_b = revised("option B", edit.option_b, &record.option_b)?;
    let option_c = revised("option C", edit.option_c, &record.option_c)?;
    let option_d = revised("option D", edit.option_d, &record.option_d)?;

    record.question = question;
    record.option_a = option_a;
    record.option_b = option_b;
    record.option_c = option_c;
    record.option_d = option_d;
    record.answer = edit.answer;
    Ok(())
}

/// Mutating front end over a [`RecordStore`].
#[derive(Debug)]
pub struct QuestionBank<S> {
    backend: S,
}

impl<S: RecordStore> QuestionBank<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load a fresh snapshot of the store.
    pub fn load(&self) -> Result<Store> {
        self.backend.load()
    }

    /// Append a new question and persist.
    ///
    /// Every field is trimmed; an empty subject, chapter, question or option
    /// is rejected before anything is written.
    pub fn add(&self, store: &Store, draft: QuestionDraft) -> Result<Store> {
        let record = QuestionRecord {
            subject: required("subject", &draft.subject)?,
            chapter: required("chapter", &draft.chapter)?,
            question: required("question", &draft.question)?,
            option_a: required("option A", &draft.option_a)?,
            option_b: required("option B", &draft.option_b)?,
            option_c: required("option C", &draft.option_c)?,
            option_d: required("option D", &draft.option_d)?,
            answer: draft.answer,
        };

        let subject = record.subject.clone();
        let chapter = record.chapter.clone();
        let mut next = store.clone();
        next.records_mut().push(record);
        self.backend.save(&next)?;

        info!(position = store.len(), %subject, %chapter, "question added");
        Ok(next)
    }

    /// Replace the question text, options and answer at `position`, then persist.
    ///
    /// Changed fields are trimmed and must not be empty. Fields equal to the
    /// stored value are kept byte for byte.
    pub fn edit(&self, store: &Store, position: Position, edit: QuestionEdit) -> Result<Store> {
        check_position(store, position)?;

        let mut next = store.clone();
        apply_edit(&mut next.records_mut()[position.index()], edit)?;
        self.backend.save(&next)?;

        info!(position = position.index(), "question edited");
        Ok(next)
    }

    /// Remove the record at `position` and persist. Later positions shift down by one.
    pub fn delete(&self, store: &Store, position: Position) -> Result<Store> {
        check_position(store, position)?;

        let mut next = store.clone();
        let removed = next.records_mut().remove(position.index());
        self.backend.save(&next)?;

        info!(
            position = position.index(),
            subject = %removed.subject,
            chapter = %removed.chapter,
            "question deleted"
        );
        Ok(next)
    }
}

fn check_position(store: &Store, position: Position) -> Result<()> {
    if position.index() >= store.len() {
        return Err(BankError::NotFound {
            position: position.index(),
            len: store.len(),
        });
    }
    Ok(())
}
