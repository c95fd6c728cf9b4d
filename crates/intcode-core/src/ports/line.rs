use std::io::{BufRead, Write};

use super::{InputPort, OutputPort, PortError};
use crate::Word;

/// Reads one integer per line from a buffered reader.
///
/// Blank lines are skipped. End of stream reports [`PortError::Exhausted`].
#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> LineInput<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> InputPort for LineInput<R> {
    fn read_value(&mut self) -> Result<Word, PortError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Err(PortError::Exhausted);
            }
            let token = self.line.trim();
            if token.is_empty() {
                continue;
            }
            return token
                .parse()
                .map_err(|_| PortError::Malformed(token.to_string()));
        }
    }
}

/// Writes one integer per line and flushes after each value.
#[derive(Debug)]
pub struct LineOutput<W> {
    writer: W,
}

impl<W: Write> LineOutput<W> {
    /// Wraps a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputPort for LineOutput<W> {
    fn write_value(&mut self, value: Word) -> Result<(), PortError> {
        writeln!(self.writer, "{value}")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{LineInput, LineOutput};
    use crate::ports::{InputPort, OutputPort, PortError};

    #[test]
    fn reads_trimmed_integers_and_skips_blank_lines() {
        let mut input = LineInput::new(Cursor::new("  8\n\n-12 \n"));
        assert_eq!(input.read_value().ok(), Some(8));
        assert_eq!(input.read_value().ok(), Some(-12));
        assert!(matches!(input.read_value(), Err(PortError::Exhausted)));
    }

    #[test]
    fn non_integer_line_is_malformed() {
        let mut input = LineInput::new(Cursor::new("eight\n"));
        match input.read_value() {
            Err(PortError::Malformed(token)) => assert_eq!(token, "eight"),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn writes_one_value_per_line() {
        let mut output = LineOutput::new(Vec::<u8>::new());
        output.write_value(1).expect("vec writer");
        output.write_value(-999).expect("vec writer");
        assert_eq!(output.into_inner(), b"1\n-999\n");
    }
}
