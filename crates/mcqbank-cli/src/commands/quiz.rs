//! The `mcqbank quiz` command: an interactive quiz on stdin/stdout.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use mcqbank_core::quiz::default_sample_size;
use mcqbank_core::repository::count;
use mcqbank_core::{AppState, Choice, QuizSession, Score};

use super::Context;

const HELP: &str = "Commands: a-d answer, n next, p previous, s submit (last question), q quit";

pub fn execute(ctx: &Context, subject: &str, chapter: &str, requested: Option<usize>) -> Result<()> {
    let store = ctx.store()?;
    let pool = count(&store, subject, chapter);
    if pool == 0 {
        println!("No questions available for {subject} > {chapter}.");
        return Ok(());
    }
    let size = requested.unwrap_or_else(|| match ctx.config.default_quiz_size {
        Some(preferred) => preferred.min(pool),
        None => default_sample_size(pool),
    });

    let mut state = AppState::new();
    state.open_quiz();
    state.start_quiz(&store, subject, chapter, size)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut state, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Drive the quiz held in `state` until it is submitted, abandoned, or input ends.
///
/// Returns the score if the quiz was submitted.
pub fn run<R: BufRead, W: Write>(
    state: &mut AppState,
    input: R,
    mut out: W,
) -> Result<Option<Score>> {
    writeln!(out, "{HELP}")?;
    let mut lines = input.lines();

    loop {
        let Some(quiz) = state.quiz.as_mut() else {
            return Ok(None);
        };
        render(quiz, &mut out)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out, "\nQuiz abandoned.")?;
            state.main_menu();
            return Ok(None);
        };
        let line = line?;
        let command = line.trim().to_ascii_lowercase();

        match command.as_str() {
            "a" | "b" | "c" | "d" => {
                let choice: Choice = command.parse()?;
                if let Err(e) = quiz.answer_current(choice) {
                    writeln!(out, "Error: {e}")?;
                }
            }
            "n" => {
                if quiz.is_last() {
                    writeln!(out, "This is the last question.")?;
                }
                quiz.advance();
            }
            "p" => {
                if quiz.is_first() {
                    writeln!(out, "This is the first question.")?;
                }
                quiz.retreat();
            }
            "s" => {
                if !quiz.is_last() {
                    writeln!(out, "Submit is available on the last question.")?;
                    continue;
                }
                let score = state.submit_quiz()?;
                writeln!(out, "Your Score: {score} ({:.0}%)", score.percent())?;
                return Ok(Some(score));
            }
            "q" => {
                state.main_menu();
                writeln!(out, "Back to main menu.")?;
                return Ok(None);
            }
            "" => {}
            other => writeln!(out, "Unknown command '{other}'. {HELP}")?,
        }
    }
}

fn render<W: Write>(quiz: &QuizSession, out: &mut W) -> io::Result<()> {
    let index = quiz.current_index();
    let record = quiz.current();

    writeln!(out)?;
    writeln!(out, "{} > {}", quiz.subject(), quiz.chapter())?;
    writeln!(
        out,
        "Question {} of {} ({:.0}%)",
        index + 1,
        quiz.len(),
        quiz.progress() * 100.0
    )?;
    writeln!(out, "{}", record.question)?;
    for choice in Choice::ALL {
        let marker = if quiz.selected(index) == Some(choice) {
            "*"
        } else {
            " "
        };
        writeln!(out, " {marker}{choice}) {}", record.option(choice))?;
    }
    match quiz.selected(index) {
        Some(choice) => writeln!(out, "Your answer: {choice}"),
        None => writeln!(out, "Your answer: -"),
    }
}
