//! Program loader: comma-separated decimal text into an initial memory image.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::num::ParseIntError;
use std::path::Path;

use thiserror::Error;

use crate::{Memory, Word};

/// Failure to turn program text into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A token is not a base-10 signed integer.
    #[error("malformed program: token {index} ({token:?}) is not an integer")]
    MalformedProgram {
        /// Zero-based token position, which is also its target address.
        index: usize,
        /// Offending token after trimming.
        token: String,
        /// Integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The byte stream could not be read or was not UTF-8.
    #[error("could not read program: {0}")]
    Io(#[from] io::Error),
}

/// Parses program text into memory, token `i` at address `i`.
///
/// Surrounding whitespace is ignored. Each token is also trimmed before it is
/// parsed, so `1, 2` and `1 ,2` load the same as `1,2`; whitespace inside a
/// number (`1 2`) is still malformed.
///
/// # Errors
///
/// Returns [`LoadError::MalformedProgram`] for the first token that does not
/// parse, including empty tokens and empty input.
pub fn parse_program(text: &str) -> Result<Memory, LoadError> {
    text.trim()
        .split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            token
                .parse::<Word>()
                .map_err(|source| LoadError::MalformedProgram {
                    index,
                    token: token.to_string(),
                    source,
                })
        })
        .collect()
}

/// Reads the whole stream and parses it as a program.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the stream fails or is not UTF-8, and
/// [`LoadError::MalformedProgram`] for bad tokens.
pub fn load_program(mut reader: impl Read) -> Result<Memory, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_program(&text)
}

/// Opens `path` and loads it as a program.
///
/// # Errors
///
/// See [`load_program`]; opening the file can also fail with
/// [`LoadError::Io`].
pub fn load_program_file(path: impl AsRef<Path>) -> Result<Memory, LoadError> {
    let file = File::open(path)?;
    load_program(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{load_program, parse_program, LoadError};
    use crate::Memory;

    #[test]
    fn tokens_land_at_consecutive_addresses() {
        let memory = parse_program("1,9,10,3,2,3,11,0,99,30,40,50").expect("valid program");
        assert_eq!(memory.len(), 12);
        assert_eq!(memory.get(0), 1);
        assert_eq!(memory.get(11), 50);
    }

    #[test]
    fn surrounding_and_inner_whitespace_is_ignored() {
        let memory = parse_program("  1002, 4 ,3,4,-33\n").expect("valid program");
        assert_eq!(memory.get(0), 1002);
        assert_eq!(memory.get(1), 4);
        assert_eq!(memory.get(4), -33);

        assert_eq!(parse_program("1, 2").expect("spaced comma"), Memory::from_words([1, 2]));
        assert!(parse_program("1 2,3").is_err());
    }

    #[test]
    fn bad_token_reports_index_and_text() {
        let error = parse_program("1,2,x3,4").expect_err("x3 is not an integer");
        match error {
            LoadError::MalformedProgram { index, token, .. } => {
                assert_eq!(index, 2);
                assert_eq!(token, "x3");
            }
            LoadError::Io(other) => panic!("unexpected io error: {other}"),
        }
    }

    #[test]
    fn trailing_comma_and_empty_input_are_malformed() {
        assert!(matches!(
            parse_program("1,2,"),
            Err(LoadError::MalformedProgram { index: 2, .. })
        ));
        assert!(matches!(
            parse_program("   "),
            Err(LoadError::MalformedProgram { index: 0, .. })
        ));
    }

    #[test]
    fn non_utf8_stream_is_an_io_error() {
        let error = load_program(Cursor::new(vec![0xFF, 0xFE])).expect_err("invalid utf-8");
        assert!(matches!(error, LoadError::Io(_)));
    }

    #[test]
    fn stream_loader_matches_text_parser() {
        let from_stream = load_program(Cursor::new("3,0,4,0,99\n")).expect("valid stream");
        let from_text = parse_program("3,0,4,0,99").expect("valid text");
        assert_eq!(from_stream, from_text);
    }
}
