//! The `mcqbank subjects`, `chapters` and `list` commands.

use anyhow::Result;
use comfy_table::{Cell, Table};

use mcqbank_core::repository::{filter, list_chapters, list_subjects};
use mcqbank_core::Choice;

use super::Context;

pub fn subjects(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let subjects = list_subjects(&store);

    if subjects.is_empty() {
        println!("No subjects found. Please add some questions first.");
        return Ok(());
    }
    for subject in &subjects {
        println!("{subject}");
    }
    Ok(())
}

pub fn chapters(ctx: &Context, subject: &str) -> Result<()> {
    let store = ctx.store()?;
    let chapters = list_chapters(&store, subject);

    if chapters.is_empty() {
        println!("No chapters found for {subject}.");
        return Ok(());
    }
    for chapter in &chapters {
        println!("{chapter}");
    }
    Ok(())
}

pub fn list(ctx: &Context, subject: &str, chapter: &str) -> Result<()> {
    let store = ctx.store()?;
    let found = filter(&store, subject, chapter);

    println!("{subject} > {chapter}");
    if found.is_empty() {
        println!("No questions added yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "A", "B", "C", "D", "Answer"]);
    for (i, located) in found.iter().enumerate() {
        let record = located.record;
        let mut row = vec![Cell::new(format!("Q{}", i + 1)), Cell::new(&record.question)];
        row.extend(Choice::ALL.iter().map(|c| Cell::new(record.option(*c))));
        row.push(Cell::new(record.answer));
        table.add_row(row);
    }

    println!("{table}");
    println!("{} question(s)", found.len());
    Ok(())
}
