//! mcqbank-core — question store, repository, and quiz engine.
//!
//! This crate holds the data model, the flat-file record store, the
//! subject/chapter query and CRUD layer built on it, and the quiz session
//! state machine that the `mcqbank` CLI drives.

pub mod error;
pub mod model;
pub mod navigation;
pub mod quiz;
pub mod repository;
pub mod store;

pub use error::{BankError, Result};
pub use model::{Choice, Located, Position, QuestionDraft, QuestionEdit, QuestionRecord, Store};
pub use navigation::{AppState, Screen};
pub use quiz::{QuizSession, Score};
pub use repository::QuestionBank;
pub use store::{CsvStore, MemoryStore, RecordStore};
