use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use anagrams::{Anagrammer, SearchOptions, DEFAULT_WORD_LIST};

struct Args {
    string: String,
    dictionary_path: String,
    options: SearchOptions,
    limit: Option<usize>,
    verbose: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        string: String::new(),
        dictionary_path: DEFAULT_WORD_LIST.to_string(),
        options: SearchOptions::default(),
        limit: None,
        verbose: false,
    };

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Find anagrams of the given string");
        ap.refer(&mut args.string)
            .required()
            .add_argument("string", Store, "String to generate anagrams of");
        ap.refer(&mut args.options.min_words)
            .add_option(&["-w", "--min-words"], Store, "The minimum number of words in the generated anagrams");
        ap.refer(&mut args.options.max_words)
            .add_option(&["-W", "--max-words"], Store, "The maximum number of words in the generated anagrams");
        ap.refer(&mut args.options.min_word_length)
            .add_option(&["-l", "--min-letters"], Store, "The minimum number of letters per word in the generated anagrams");
        ap.refer(&mut args.options.max_word_length)
            .add_option(&["-L", "--max-letters"], Store, "The maximum number of letters per word in the generated anagrams");
        ap.refer(&mut args.dictionary_path)
            .add_option(&["-f", "--dictionary"], Store, "The path of the word list");
        ap.refer(&mut args.limit)
            .add_option(&["-n", "--limit"], StoreOption, "Stop after printing this many anagrams");
        ap.refer(&mut args.verbose)
            .add_option(&["-v", "--verbose"], StoreTrue, "Log progress to stderr");
        ap.parse_args_or_exit();
    }

    args
}

fn print_set<W: Write>(out: &mut W, set: &[String]) -> io::Result<()> {
    writeln!(out, "{}", set.join(" "))
}

/// Prints up to `limit` anagrams, one per line, returning how many were printed.
///
/// A closed pipe ends the output early without an error.
fn print_anagrams<W, I>(out: &mut W, sets: I, limit: Option<usize>) -> anagrams::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut printed = 0;
    for set in sets.into_iter().take(limit.unwrap_or(usize::MAX)) {
        match print_set(out, &set) {
            Ok(()) => printed += 1,
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(printed),
            Err(e) => return Err(e.into()),
        }
    }
    match out.flush() {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(e.into()),
        _ => Ok(printed),
    }
}

fn run(args: Args) -> anagrams::Result<()> {
    args.options.validate()?;

    let anagrammer = Anagrammer::from_dictionary_path(&args.dictionary_path)?;
    let anagrams = anagrammer.find_anagrams(&args.string, &args.options)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let printed = print_anagrams(&mut out, anagrams, args.limit)?;

    debug!(printed, "done");
    Ok(())
}

fn main() -> ExitCode {
    let args = parse_args();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("anagrams: {e}");
            ExitCode::FAILURE
        }
    }
}
