//! mcqbank CLI — author multiple-choice questions and take quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use mcqbank_core::{Choice, QuestionDraft};

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "mcqbank",
    version,
    about = "Multiple-choice study quiz manager"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Question store (CSV), overrides the configured data file
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config (at --config, default ./mcqbank.toml) and an empty question store
    Init,

    /// List subjects
    Subjects,

    /// List chapters of a subject
    Chapters {
        #[arg(long)]
        subject: String,
    },

    /// Show the questions of a chapter
    List {
        #[arg(long)]
        subject: String,

        #[arg(long)]
        chapter: String,
    },

    /// Add a question
    Add {
        #[arg(long)]
        subject: String,

        #[arg(long)]
        chapter: String,

        /// Question text
        #[arg(long)]
        question: String,

        #[arg(long)]
        option_a: String,

        #[arg(long)]
        option_b: String,

        #[arg(long)]
        option_c: String,

        #[arg(long)]
        option_d: String,

        /// Correct answer: A, B, C or D
        #[arg(long)]
        answer: Choice,
    },

    /// Edit a question; fields not given keep their value
    Edit {
        #[arg(long)]
        subject: String,

        #[arg(long)]
        chapter: String,

        /// Question number as shown by `list`
        #[arg(long)]
        number: usize,

        #[arg(long)]
        question: Option<String>,

        #[arg(long)]
        option_a: Option<String>,

        #[arg(long)]
        option_b: Option<String>,

        #[arg(long)]
        option_c: Option<String>,

        #[arg(long)]
        option_d: Option<String>,

        #[arg(long)]
        answer: Option<Choice>,
    },

    /// Delete a question
    Delete {
        #[arg(long)]
        subject: String,

        #[arg(long)]
        chapter: String,

        /// Question number as shown by `list`
        #[arg(long)]
        number: usize,
    },

    /// Take a quiz over a chapter
    Quiz {
        #[arg(long)]
        subject: String,

        #[arg(long)]
        chapter: String,

        /// Number of questions (default: config `default_quiz_size`, capped by the chapter size)
        #[arg(long)]
        count: Option<usize>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mcqbank=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        config,
        data,
        command,
    } = cli;
    let context = || commands::Context::load(config.as_deref(), data.as_deref());

    match command {
        Commands::Init => commands::init::execute(config.as_deref(), data.as_deref()),
        Commands::Subjects => commands::browse::subjects(&context()?),
        Commands::Chapters { subject } => commands::browse::chapters(&context()?, &subject),
        Commands::List { subject, chapter } => {
            commands::browse::list(&context()?, &subject, &chapter)
        }
        Commands::Add {
            subject,
            chapter,
            question,
            option_a,
            option_b,
            option_c,
            option_d,
            answer,
        } => commands::edit::add(
            &context()?,
            QuestionDraft {
                subject,
                chapter,
                question,
                option_a,
                option_b,
                option_c,
                option_d,
                answer,
            },
        ),
        Commands::Edit {
            subject,
            chapter,
            number,
            question,
            option_a,
            option_b,
            option_c,
            option_d,
            answer,
        } => commands::edit::edit(
            &context()?,
            &subject,
            &chapter,
            number,
            commands::edit::EditArgs {
                question,
                option_a,
                option_b,
                option_c,
                option_d,
                answer,
            },
        ),
        Commands::Delete {
            subject,
            chapter,
            number,
        } => commands::edit::delete(&context()?, &subject, &chapter, number),
        Commands::Quiz {
            subject,
            chapter,
            count,
        } => commands::quiz::execute(&context()?, &subject, &chapter, count),
    }
}
