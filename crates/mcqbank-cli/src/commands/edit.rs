//! The `mcqbank add`, `edit` and `delete` commands.

use anyhow::Result;

use mcqbank_core::repository::count;
use mcqbank_core::{Choice, QuestionDraft, QuestionEdit};

use super::{locate, Context};

/// Fields given on the command line for `edit`; `None` keeps the stored value.
pub struct EditArgs {
    pub question: Option<String>,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub answer: Option<Choice>,
}

impl EditArgs {
    fn apply(self, mut edit: QuestionEdit) -> QuestionEdit {
        if let Some(q) = self.question {
            edit.question = q;
        }
        if let Some(a) = self.option_a {
            edit.option_a = a;
        }
        if let Some(b) = self.option_b {
            edit.option_b = b;
        }
        if let Some(c) = self.option_c {
            edit.option_c = c;
        }
        if let Some(d) = self.option_d {
            edit.option_d = d;
        }
        if let Some(answer) = self.answer {
            edit.answer = answer;
        }
        edit
    }
}

pub fn add(ctx: &Context, draft: QuestionDraft) -> Result<()> {
    let store = ctx.store()?;
    let store = ctx.bank.add(&store, draft)?;

    let Some(added) = store.records().last() else {
        anyhow::bail!("question store is empty after adding");
    };
    let number = count(&store, &added.subject, &added.chapter);
    println!(
        "Question added as Q{number} in {} > {}.",
        added.subject, added.chapter
    );
    Ok(())
}

pub fn edit(
    ctx: &Context,
    subject: &str,
    chapter: &str,
    number: usize,
    args: EditArgs,
) -> Result<()> {
    let store = ctx.store()?;
    let position = locate(&store, subject, chapter, number)?;
    let Some(current) = store.get(position) else {
        anyhow::bail!("no question at position {position}");
    };

    let edit = args.apply(QuestionEdit::from_record(current));
    ctx.bank.edit(&store, position, edit)?;
    println!("Changes saved to Q{number}.");
    Ok(())
}

pub fn delete(ctx: &Context, subject: &str, chapter: &str, number: usize) -> Result<()> {
    let store = ctx.store()?;
    let position = locate(&store, subject, chapter, number)?;
    ctx.bank.delete(&store, position)?;
    println!("Question Q{number} deleted.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_keep_their_value() {
        let base = QuestionEdit {
            question: "old".into(),
            option_a: "a".into(),
            option_b: "b".into(),
            option_c: "c".into(),
            option_d: "d".into(),
            answer: Choice::A,
        };
        let args = EditArgs {
            question: Some("new".into()),
            option_a: None,
            option_b: None,
            option_c: Some("see".into()),
            option_d: None,
            answer: Some(Choice::C),
        };
        let edited = args.apply(base);
        assert_eq!(edited.question, "new");
        assert_eq!(edited.option_a, "a");
        assert_eq!(edited.option_c, "see");
        assert_eq!(edited.answer, Choice::C);
    }
}
