//! Record store backends.
//!
//! The store is always read and written whole. [`CsvStore`] is the on-disk
//! format shared with other tools; [`MemoryStore`] backs tests and embedders
//! that do not want a file.

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{BankError, Result};
use crate::model::{Choice, QuestionRecord, Store};

/// Column names of the backing file, in order.
pub const HEADER: [&str; 8] = [
    "Subject", "Chapter", "Question", "OptionA", "OptionB", "OptionC", "OptionD", "Answer",
];

/// A backend that can load and persist the whole question store.
pub trait RecordStore {
    /// Read the full store. A missing backing file yields an empty store.
    fn load(&self) -> Result<Store>;

    /// Replace the persisted store with `store`.
    ///
    /// On failure the previously persisted content must still be readable.
    fn save(&self, store: &Store) -> Result<()>;
}

/// One row of the backing file.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Subject")]
    subject: String,
    #[serde(rename = "Chapter")]
    chapter: String,
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "OptionA")]
    option_a: String,
    #[serde(rename = "OptionB")]
    option_b: String,
    #[serde(rename = "OptionC")]
    option_c: String,
    #[serde(rename = "OptionD")]
    option_d: String,
    #[serde(rename = "Answer")]
    answer: String,
}

impl CsvRow {
    fn from_record(record: &QuestionRecord) -> Self {
        Self {
            subject: record.subject.clone(),
            chapter: record.chapter.clone(),
            question: record.question.clone(),
            option_a: record.option_a.clone(),
            option_b: record.option_b.clone(),
            option_c: record.option_c.clone(),
            option_d: record.option_d.clone(),
            answer: record.answer.to_string(),
        }
    }

    fn into_record(self) -> Result<QuestionRecord> {
        let answer: Choice = self.answer.parse()?;
        Ok(QuestionRecord {
            subject: self.subject,
            chapter: self.chapter,
            question: self.question,
            option_a: self.option_a,
            option_b: self.option_b,
            option_c: self.option_c,
            option_d: self.option_d,
            answer,
        })
    }
}

/// Comma-separated file backend.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, message: impl ToString) -> BankError {
        BankError::StorageRead {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }

    fn write_error(&self, message: impl ToString) -> BankError {
        BankError::StorageWrite {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }

    fn write_rows(&self, out: impl Write, store: &Store) -> std::result::Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        writer.write_record(HEADER)?;
        for record in store.records() {
            writer.serialize(CsvRow::from_record(record))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl RecordStore for CsvStore {
    fn load(&self) -> Result<Store> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no question store yet, starting empty");
                return Ok(Store::new());
            }
            Err(e) => return Err(self.read_error(e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers = reader.headers().map_err(|e| self.read_error(e))?;
        if headers.iter().ne(HEADER.iter().copied()) {
            let found: Vec<&str> = headers.iter().collect();
            return Err(self.read_error(format!(
                "unexpected header {:?}, expected {:?}",
                found, HEADER
            )));
        }

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row.map_err(|e| self.read_error(e))?;
            let record = row
                .into_record()
                .map_err(|e| self.read_error(format!("row {}: {e}", i + 1)))?;
            records.push(record);
        }

        debug!(path = %self.path.display(), count = records.len(), "loaded question store");
        Ok(Store::from_records(records))
    }

    fn save(&self, store: &Store) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.write_error(e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.write_error(e))?;
        let written = self
            .write_rows(tmp.as_file_mut(), store)
            .map_err(|e| self.write_error(e))
            .and_then(|()| tmp.as_file().sync_all().map_err(|e| self.write_error(e)));
        if let Err(e) = written {
            warn!(path = %self.path.display(), error = %e, "question store not saved");
            return Err(e);
        }

        tmp.persist(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e.error, "question store not saved");
            self.write_error(e.error)
        })?;

        debug!(path = %self.path.display(), count = store.len(), "saved question store");
        Ok(())
    }
}

/// In-memory backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    store: RefCell<Store>,
    fail_next_save: Cell<bool>,
    saves: Cell<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already holds `store`.
    pub fn with_store(store: Store) -> Self {
        Self {
            store: RefCell::new(store),
            ..Self::default()
        }
    }

    /// Make the next `save` fail with a storage write error.
    pub fn fail_next_save(&self) {
        self.fail_next_save.set(true);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Store> {
        Ok(self.store.borrow().clone())
    }

    fn save(&self, store: &Store) -> Result<()> {
        if self.fail_next_save.replace(false) {
            return Err(BankError::StorageWrite {
                path: PathBuf::from("<memory>"),
                message: "simulated write failure".into(),
            });
        }
        *self.store.borrow_mut() = store.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
