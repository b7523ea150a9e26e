//! Reading newline-delimited word lists.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{AnagramError, Result};

/// Word list used when none is given on the command line.
pub const DEFAULT_WORD_LIST: &str = "/usr/share/dict/words";

/// Reads every line of the file at `path`, trimmed, skipping blank lines.
///
/// A missing or unreadable file is an error; nothing is retried.
pub fn read_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let wrap = |source: io::Error| AnagramError::WordList {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(wrap)?;
    let mut words = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(wrap)?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        words.push(word.to_string());
    }

    debug!(path = %path.display(), count = words.len(), "read word list");
    Ok(words)
}
