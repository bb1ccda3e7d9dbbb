//! Menu navigation state.
//!
//! Everything a front end needs to remember between user actions lives in
//! [`AppState`], which is passed explicitly to whoever drives the menus and
//! can be saved as JSON.

use serde::{Deserialize, Serialize};

use crate::error::{BankError, Result};
use crate::model::{Position, Store};
use crate::quiz::{QuizSession, Score};

/// Which menu the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Screen {
    Main,
    /// Question editor. With no subject selected this is the subject list,
    /// with a subject but no chapter the chapter list, otherwise the question
    /// list of that chapter.
    Modify {
        subject: Option<String>,
        chapter: Option<String>,
        editing: Option<Position>,
    },
    Quiz,
}

/// Navigation state plus any quiz in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub screen: Screen,
    pub quiz: Option<QuizSession>,
    /// Score of the most recently submitted quiz.
    pub last_score: Option<Score>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Main,
            quiz: None,
            last_score: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_modify(&mut self) {
        self.screen = Screen::Modify {
            subject: None,
            chapter: None,
            editing: None,
        };
    }

    pub fn open_quiz(&mut self) {
        self.screen = Screen::Quiz;
        self.quiz = None;
    }

    /// Pick an existing or brand-new subject in the editor.
    pub fn select_subject(&mut self, name: &str) -> Result<()> {
        let name = non_blank("subject", name)?;
        match &mut self.screen {
            Screen::Modify {
                subject, chapter, ..
            } => {
                *subject = Some(name);
                *chapter = None;
                Ok(())
            }
            _ => Err(wrong_screen("select a subject")),
        }
    }

    /// Pick an existing or brand-new chapter of the selected subject.
    pub fn select_chapter(&mut self, name: &str) -> Result<()> {
        let name = non_blank("chapter", name)?;
        match &mut self.screen {
            Screen::Modify {
                subject: Some(_),
                chapter,
                ..
            } => {
                *chapter = Some(name);
                Ok(())
            }
            _ => Err(wrong_screen("select a chapter")),
        }
    }

    /// Mark the question at `position` as being edited.
    ///
    /// The position must address a record of the selected chapter in `store`.
    pub fn begin_edit(&mut self, store: &Store, position: Position) -> Result<()> {
        match &mut self.screen {
            Screen::Modify {
                subject: Some(subject),
                chapter: Some(chapter),
                editing,
            } => {
                match store.get(position) {
                    Some(record) if record.is_in(subject, chapter) => {}
                    _ => {
                        return Err(BankError::NotFound {
                            position: position.index(),
                            len: store.len(),
                        })
                    }
                }
                *editing = Some(position);
                Ok(())
            }
            _ => Err(wrong_screen("edit a question")),
        }
    }

    pub fn finish_edit(&mut self) {
        if let Screen::Modify { editing, .. } = &mut self.screen {
            *editing = None;
        }
    }

    /// The question currently being edited, if any.
    pub fn editing(&self) -> Option<Position> {
        match &self.screen {
            Screen::Modify { editing, .. } => *editing,
            _ => None,
        }
    }

    /// Step back one level: chapter list to subject list to main menu.
    pub fn back(&mut self) {
        match &mut self.screen {
            Screen::Modify {
                subject,
                chapter,
                editing,
            } => {
                *editing = None;
                if chapter.take().is_some() {
                    return;
                }
                if subject.take().is_some() {
                    return;
                }
                self.main_menu();
            }
            Screen::Quiz => self.main_menu(),
            Screen::Main => {}
        }
    }

    /// Return to the main menu, abandoning selections and any running quiz.
    pub fn main_menu(&mut self) {
        self.screen = Screen::Main;
        self.quiz = None;
    }

    /// Start a quiz on the quiz screen, replacing any previous one.
    pub fn start_quiz(
        &mut self,
        store: &Store,
        subject: &str,
        chapter: &str,
        sample_size: usize,
    ) -> Result<&mut QuizSession> {
        if self.screen != Screen::Quiz {
            return Err(wrong_screen("start a quiz"));
        }
        let session = QuizSession::start(store, subject, chapter, sample_size)?;
        Ok(self.quiz.insert(session))
    }

    /// Submit the running quiz and clear it, keeping only the score.
    pub fn submit_quiz(&mut self) -> Result<Score> {
        let mut session = self
            .quiz
            .take()
            .ok_or_else(|| BankError::validation("no quiz in progress"))?;
        let score = session.submit()?;
        self.last_score = Some(score);
        Ok(score)
    }
}

fn non_blank(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BankError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn wrong_screen(action: &str) -> BankError {
    BankError::validation(format!("cannot {action} from this menu"))
}
