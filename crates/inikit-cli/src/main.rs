//! Inikit CLI
//!
//! Shell-friendly access to INI-style configuration files:
//! - list groups, or the keys of one group
//! - get/set a value by dotted key (`group.key`)
//! - dump the whole group tree as JSON

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use inikit_doc::{Direction, Document};
use inikit_io::FileLineIo;

#[derive(Parser)]
#[command(name = "inikit")]
#[command(author, version, about = "Inspect and edit INI-style configuration files")]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List groups, or the keys of one group.
    List {
        file: PathBuf,
        /// Restrict the listing to one group's entries.
        #[arg(long)]
        group: Option<String>,
    },
    /// Print the value stored under a dotted key.
    Get { file: PathBuf, key: String },
    /// Assign a value to a dotted key and write the file back.
    Set {
        file: PathBuf,
        key: String,
        value: String,
    },
    /// Dump the group tree as pretty-printed JSON.
    Json { file: PathBuf },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.command {
        Commands::List { file, group } => {
            let doc = load(&file)?;
            match group {
                Some(name) => {
                    let Some(values) = doc.group(&name) else {
                        eprintln!("{} no group named {:?}", "error:".red().bold(), name);
                        return Ok(ExitCode::FAILURE);
                    };
                    for (key, value) in values {
                        println!("{}={}", key.cyan(), value);
                    }
                }
                None => {
                    for (name, values) in doc.groups() {
                        println!("{} ({} entries)", name.cyan().bold(), values.len());
                    }
                }
            }
        }
        Commands::Get { file, key } => {
            let doc = load(&file)?;
            match doc.value(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("{} no value under {:?}", "error:".red().bold(), key);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Set { file, key, value } => {
            // Read-modify-write; a missing file starts out as an empty
            // document.
            let mut doc = if file.exists() {
                load(&file)?
            } else {
                Document::new()
            };
            doc.set(&key, value);
            let mut sink = FileLineIo::open(&file, Direction::Output)
                .with_context(|| format!("open {} for writing", file.display()))?;
            doc.write_to(&mut sink)
                .with_context(|| format!("write {}", file.display()))?;
            println!("{} {}", "wrote".green().bold(), file.display());
        }
        Commands::Json { file } => {
            let doc = load(&file)?;
            let json = serde_json::to_string_pretty(doc.groups())
                .context("serialize group tree")?;
            println!("{json}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load(path: &Path) -> Result<Document> {
    let mut source = FileLineIo::open(path, Direction::Input)
        .with_context(|| format!("open {}", path.display()))?;
    let mut doc = Document::new();
    doc.read_from(&mut source)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(doc)
}
