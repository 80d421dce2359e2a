//! inidoc: inspect and edit INI files without disturbing their layout.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use inidoc::{config, edit_plan, Document, IniError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inidoc")]
#[command(about = "Round-trip faithful INI editing", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Write compact JSON regardless of configuration
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value of a key
    Get {
        /// INI file to read
        file: PathBuf,
        /// Section name, empty for the default section
        section: String,
        /// Key to look up
        key: String,
        /// Printed when the key is missing or empty
        #[arg(long)]
        default: Option<String>,
    },
    /// Set the value of a key, creating the section and key if needed
    Set {
        /// INI file to edit
        file: PathBuf,
        /// Section name, empty for the default section
        section: String,
        /// Key to set
        key: String,
        /// New value
        value: String,
    },
    /// List section names
    Sections {
        /// INI file to read
        file: PathBuf,
    },
    /// List the keys of a section
    Keys {
        /// INI file to read
        file: PathBuf,
        /// Section name, empty for the default section
        section: String,
    },
    /// Rename a section
    RenameSection {
        /// INI file to edit
        file: PathBuf,
        /// Current section name
        section: String,
        /// New section name
        to: String,
    },
    /// Rename a key within a section
    RenameKey {
        /// INI file to edit
        file: PathBuf,
        /// Section name, empty for the default section
        section: String,
        /// Current key
        key: String,
        /// New key
        to: String,
    },
    /// Remove a section
    RemoveSection {
        /// INI file to edit
        file: PathBuf,
        /// Section to remove
        section: String,
    },
    /// Remove a key from a section
    RemoveKey {
        /// INI file to edit
        file: PathBuf,
        /// Section name, empty for the default section
        section: String,
        /// Key to remove
        key: String,
    },
    /// Print the document as it would be saved
    Dump {
        /// INI file to read
        file: PathBuf,
        /// Print the document tree as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Apply an edit plan from a JSON file
    Apply {
        /// Edit plan to apply
        plan: PathBuf,
    },
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if args.compact {
        cfg.pretty_json = false;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    run(args.command, &cfg)
}

fn run(command: Command, cfg: &config::Config) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    match command {
        Command::Get {
            file,
            section,
            key,
            default,
        } => {
            let doc = Document::open(&file)?;
            let value = doc
                .get(&section, &key)
                .filter(|value| !value.is_empty())
                .or(default.as_deref());
            match value {
                Some(value) => writeln!(stdout, "{value}")?,
                None => return Err(IniError::KeyNotFound(key).into()),
            }
        }
        Command::Set {
            file,
            section,
            key,
            value,
        } => {
            let mut doc = open_for_edit(&file, cfg)?;
            doc.set(&section, &key, &value)?;
            save_if_dirty(&mut doc, &file)?;
        }
        Command::Sections { file } => {
            let doc = Document::open(&file)?;
            for section in doc.sections().filter(|section| section.has_header()) {
                writeln!(stdout, "{}", section.name())?;
            }
        }
        Command::Keys { file, section } => {
            let doc = Document::open(&file)?;
            let section = doc
                .section(&section)
                .ok_or(IniError::SectionNotFound(section))?;
            for kv in section.entries() {
                writeln!(stdout, "{}", kv.key())?;
            }
        }
        Command::RenameSection { file, section, to } => {
            let mut doc = Document::open(&file)?;
            doc.rename_section(&section, &to)?;
            save_if_dirty(&mut doc, &file)?;
        }
        Command::RenameKey {
            file,
            section,
            key,
            to,
        } => {
            let mut doc = Document::open(&file)?;
            if !doc.contains_section(&section) {
                return Err(IniError::SectionNotFound(section).into());
            }
            doc.section_mut(&section)?.rename_key(&key, &to)?;
            save_if_dirty(&mut doc, &file)?;
        }
        Command::RemoveSection { file, section } => {
            let mut doc = Document::open(&file)?;
            doc.remove_section(&section)?;
            save_if_dirty(&mut doc, &file)?;
        }
        Command::RemoveKey { file, section, key } => {
            let mut doc = Document::open(&file)?;
            if !doc.contains_section(&section) {
                return Err(IniError::SectionNotFound(section).into());
            }
            doc.section_mut(&section)?.remove_key(&key)?;
            save_if_dirty(&mut doc, &file)?;
        }
        Command::Dump { file, json } => {
            let doc = Document::open(&file)?;
            if json {
                let json = if cfg.pretty_json {
                    serde_json::to_string_pretty(&doc)
                } else {
                    serde_json::to_string(&doc)
                }
                .map_err(io::Error::other)?;
                writeln!(stdout, "{json}")?;
            } else {
                doc.write_to(&mut stdout)?;
            }
        }
        Command::Apply { plan } => {
            let plan = edit_plan::EditPlan::from_path(&plan)?;
            for path in plan.apply()? {
                writeln!(stdout, "{}", path.display())?;
            }
        }
    }
    Ok(())
}

fn open_for_edit(file: &Path, cfg: &config::Config) -> io::Result<Document> {
    if cfg.create_missing && !file.exists() {
        return Ok(Document::new());
    }
    Ok(Document::open(file)?)
}

fn save_if_dirty(doc: &mut Document, file: &Path) -> io::Result<()> {
    if doc.is_dirty() {
        doc.save(file)?;
    }
    Ok(())
}
