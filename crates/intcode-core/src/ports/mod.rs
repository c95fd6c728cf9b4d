//! Input and output port contracts consumed by the I/O operations.
//!
//! In-memory adapters live here; line-oriented stream adapters are in
//! [`line`] and bounded channel adapters in [`channel`].

use std::collections::VecDeque;
use std::io;

use thiserror::Error;

use crate::Word;

/// Channel-backed ports for wiring machines across threads.
pub mod channel;
/// Line-oriented ports over `BufRead` / `Write` streams.
pub mod line;

pub use channel::{ChannelInput, ChannelOutput};
pub use line::{LineInput, LineOutput};

/// Transfer failure reported by a port adapter.
#[derive(Debug, Error)]
pub enum PortError {
    /// No further value is available.
    #[error("no more values available")]
    Exhausted,
    /// The source produced something that is not an integer.
    #[error("malformed value {0:?}")]
    Malformed(String),
    /// The peer on the other side of the port went away.
    #[error("port disconnected")]
    Disconnected,
    /// Underlying stream failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Sequential source of words consumed by the input operation.
pub trait InputPort {
    /// Returns the next value in program order. May block.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when no value can be produced.
    fn read_value(&mut self) -> Result<Word, PortError>;
}

/// Sequential sink receiving words from the output operation.
pub trait OutputPort {
    /// Accepts the next value in program order. May block for backpressure.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the sink refuses the value.
    fn write_value(&mut self, value: Word) -> Result<(), PortError>;
}

impl<T: InputPort + ?Sized> InputPort for &mut T {
    fn read_value(&mut self) -> Result<Word, PortError> {
        (**self).read_value()
    }
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    fn write_value(&mut self, value: Word) -> Result<(), PortError> {
        (**self).write_value(value)
    }
}

impl InputPort for VecDeque<Word> {
    fn read_value(&mut self) -> Result<Word, PortError> {
        self.pop_front().ok_or(PortError::Exhausted)
    }
}

impl OutputPort for Vec<Word> {
    fn write_value(&mut self, value: Word) -> Result<(), PortError> {
        self.push(value);
        Ok(())
    }
}

/// Input port with nothing to read, for programs that take no input.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputPort for NoInput {
    fn read_value(&mut self) -> Result<Word, PortError> {
        Err(PortError::Exhausted)
    }
}

/// Output port that drops every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardOutput;

impl OutputPort for DiscardOutput {
    fn write_value(&mut self, _value: Word) -> Result<(), PortError> {
        Ok(())
    }
}
