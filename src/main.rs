//! Purpose: `rosterlite` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Human-facing data goes to stdout; errors are emitted as JSON
//! on stderr and the exit code is derived from `to_exit_code`.
//! Invariants: All roster mutations go through `core::roster::Roster`
//! (advisory lock held for the handle's lifetime).
use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use rosterlite::core::error::{to_exit_code, Error, ErrorKind};
use rosterlite::core::export::export_json;
use rosterlite::core::import::import_bytes;
use rosterlite::core::roster::Roster;
use rosterlite::json::{parse, render, tokenize};

#[derive(Parser)]
#[command(
    name = "rosterlite",
    version,
    about = "Flat-file people records with JSON import/export",
    arg_required_else_help = true
)]
struct Cli {
    #[arg(long, default_value = "people.db", help = "Path to the roster file")]
    db: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert a person and print the stored record
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: i32,
    },
    /// Print every person, one JSON object per line
    List,
    /// Print the first person with the given name
    Find { name: String },
    /// Print roster metadata
    Info,
    /// Replace the roster contents from an export file
    Import { file: PathBuf },
    /// Write the roster as JSON text to stdout or a file
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Tokenize and parse a JSON file, printing a diagnostic outline
    Inspect {
        file: PathBuf,
        #[arg(long, help = "List the token stream instead of the tree outline")]
        tokens: bool,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Add { name, age } => {
            let mut roster = Roster::open(&cli.db)?;
            let person = roster.insert(&name, age)?;
            println!("{}", json!(person));
            Ok(())
        }
        Command::List => {
            let mut roster = Roster::open(&cli.db)?;
            for person in roster.people()? {
                println!("{}", json!(person));
            }
            Ok(())
        }
        Command::Find { name } => {
            let mut roster = Roster::open(&cli.db)?;
            match roster.find(&name)? {
                Some(person) => {
                    println!("{}", json!(person));
                    Ok(())
                }
                None => Err(Error::new(ErrorKind::NotFound)
                    .with_message(format!("no person named \"{name}\""))),
            }
        }
        Command::Info => {
            let roster = Roster::open(&cli.db)?;
            let meta = roster.meta();
            println!(
                "{}",
                json!({
                    "autoIncrementId": meta.next_id,
                    "count": meta.count,
                    "path": roster.path(),
                })
            );
            Ok(())
        }
        Command::Import { file } => {
            let input = read_file(&file)?;
            let (meta, people) = import_bytes(&input)?;
            let mut roster = Roster::open(&cli.db)?;
            roster.replace_all(meta, &people)?;
            println!("{}", json!({ "imported": people.len() }));
            Ok(())
        }
        Command::Export { out } => {
            let mut roster = Roster::open(&cli.db)?;
            let people = roster.people()?;
            let text = export_json(&roster.meta(), &people);
            match out {
                Some(path) => fs::write(&path, text).map_err(|err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write export file")
                        .with_path(path)
                        .with_source(err)
                }),
                None => {
                    print!("{text}");
                    Ok(())
                }
            }
        }
        Command::Inspect { file, tokens } => inspect(&file, tokens),
    }
}

fn inspect(file: &PathBuf, list_tokens: bool) -> Result<(), Error> {
    let input = read_file(file)?;
    let (tokens, lex_error) = tokenize(&input);

    if list_tokens {
        // Tokens recognized before a lexical error are still listed.
        for token in tokens.iter() {
            println!(
                "{}",
                json!({
                    "kind": token.kind.name(),
                    "line": token.line,
                    "column": token.column,
                    "text": token.literal(&input),
                })
            );
        }
    }

    if let Some(error) = lex_error {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("lex error: {error}"))
            .with_path(file)
            .with_source(error));
    }
    if list_tokens {
        return Ok(());
    }

    let root = parse(&tokens, &input).map_err(|error| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("parse error: {error}"))
            .with_path(file)
            .with_source(error)
    })?;
    print!("{}", render(&root));
    Ok(())
}

fn read_file(path: &PathBuf) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|err| {
        let kind = if err.kind() == io::ErrorKind::NotFound {
            ErrorKind::NotFound
        } else {
            ErrorKind::Io
        };
        Error::new(kind)
            .with_message("failed to read file")
            .with_path(path)
            .with_source(err)
    })
}

fn emit_error(err: &Error) {
    eprintln!(
        "{}",
        json!({
            "error": {
                "kind": err.kind().label(),
                "message": err.to_string(),
            }
        })
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
