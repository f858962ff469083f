use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use versekey::{BookCodeTable, CompoundVerseKey, Error, ParseOptions};

#[derive(Parser)]
#[command(name = "versekey", about = "Parse and expand compact Bible verse references")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse references and print their canonical and short forms
    Parse(RefArgs),
    /// Expand references into their individual verses, one per line
    Expand(RefArgs),
}

#[derive(Args)]
struct RefArgs {
    /// References to process, e.g. GEN_1:1 or SA2_19:12-19
    #[arg(required = true)]
    references: Vec<String>,

    /// Read references in OSIS notation, e.g. Gen.1.1
    #[arg(long)]
    osis: bool,

    /// Enforce strict book codes and verse ordering
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => match cmd_parse(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            },
        },
        Commands::Expand(args) => match cmd_expand(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            },
        },
    }
}

/// Parse each reference and print `canonical = short` per line.
///
/// # Errors
///
/// Returns the first parse error encountered.
fn cmd_parse(args: &RefArgs) -> Result<(), Error> {
    let table = BookCodeTable::standard();
    let options = options_for(args);

    for reference in &args.references {
        let key = CompoundVerseKey::parse_with(reference, table, options)?;
        println!("{} = {}", key.reference_text(), key.short_text());
    }

    Ok(())
}

/// Expand each reference into its individual verses, one per line.
///
/// # Errors
///
/// Returns the first parse error encountered.
fn cmd_expand(args: &RefArgs) -> Result<(), Error> {
    let table = BookCodeTable::standard();
    let options = options_for(args);

    for reference in &args.references {
        let key = CompoundVerseKey::parse_with(reference, table, options)?;
        for verse in &key {
            println!("{verse}");
        }
    }

    Ok(())
}

fn options_for(args: &RefArgs) -> ParseOptions {
    let mut options = if args.osis {
        ParseOptions::osis()
    } else {
        ParseOptions::default()
    };
    if args.strict {
        options.strict_books = true;
        options.strict_order = true;
    }
    options
}
