//! The `mcqbank init` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use mcqbank_core::{CsvStore, RecordStore, Store};

use crate::config::CONFIG_FILE;

/// Write a starter config (at `config`, default `./mcqbank.toml`) and an
/// empty question store next to it. Existing files are left alone.
pub fn execute(config: Option<&Path>, data: Option<&Path>) -> Result<()> {
    let config_path = config.unwrap_or(Path::new(CONFIG_FILE));
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty());

    // Relative entries in the config resolve against its directory, while
    // `--data` is relative to the working directory.
    let (entry, data_file) = match data {
        Some(path) if path.is_relative() && config_dir.is_some() => {
            let absolute = std::path::absolute(path)?;
            (absolute.clone(), absolute)
        }
        Some(path) => (path.to_path_buf(), path.to_path_buf()),
        None => {
            let entry = PathBuf::from("questions.csv");
            let on_disk = config_dir.map_or_else(|| entry.clone(), |dir| dir.join(&entry));
            (entry, on_disk)
        }
    };

    if config_path.exists() {
        println!("{} already exists, skipping.", config_path.display());
    } else {
        if let Some(dir) = config_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        std::fs::write(config_path, sample_config(&entry))
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        println!("Created {}", config_path.display());
    }

    if data_file.exists() {
        println!("{} already exists, skipping.", data_file.display());
    } else {
        CsvStore::new(&data_file).save(&Store::new())?;
        println!("Created {}", data_file.display());
    }

    println!("\nNext steps:");
    println!(
        "  1. Add a question: mcqbank add --subject Math --chapter Algebra \\\n       \
         --question \"2 + 2 = ?\" --option-a 3 --option-b 4 --option-c 5 --option-d 22 --answer B"
    );
    println!("  2. Review it:      mcqbank list --subject Math --chapter Algebra");
    println!("  3. Take a quiz:    mcqbank quiz --subject Math --chapter Algebra");

    Ok(())
}

fn sample_config(data_file: &Path) -> String {
    format!(
        r#"# mcqbank configuration

# Question store, relative to this file.
data_file = "{}"

# Quiz length when --count is not given (capped by the chapter size).
default_quiz_size = 5
"#,
        data_file.display().to_string().replace('\\', "/")
    )
}
