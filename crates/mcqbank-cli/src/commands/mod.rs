//! Subcommand implementations.

use std::path::Path;

use anyhow::Result;

use mcqbank_core::repository::filter;
use mcqbank_core::{CsvStore, Position, QuestionBank, Store};

use crate::config::{load_config_from, McqConfig};

pub mod browse;
pub mod edit;
pub mod init;
pub mod quiz;

/// Resolved configuration plus the question bank it points at.
pub struct Context {
    pub config: McqConfig,
    pub bank: QuestionBank<CsvStore>,
}

impl Context {
    pub fn load(config_path: Option<&Path>, data: Option<&Path>) -> Result<Self> {
        let mut config = load_config_from(config_path)?;
        if let Some(data) = data {
            config.data_file = data.to_path_buf();
        }
        let bank = QuestionBank::new(CsvStore::new(&config.data_file));
        Ok(Self { config, bank })
    }

    pub fn store(&self) -> Result<Store> {
        Ok(self.bank.load()?)
    }
}

/// Map the 1-based number shown by `list` to a storage position.
pub fn locate(store: &Store, subject: &str, chapter: &str, number: usize) -> Result<Position> {
    let found = filter(store, subject, chapter);
    number
        .checked_sub(1)
        .and_then(|i| found.get(i))
        .map(|l| l.position)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no question Q{number} in {subject} / {chapter} ({} questions)",
                found.len()
            )
        })
}
