use std::sync::mpsc::{Receiver, SyncSender};

use super::{InputPort, OutputPort, PortError};
use crate::Word;

/// Input port fed by a channel. Blocks until a value arrives.
///
/// A disconnected sender with an empty buffer reports
/// [`PortError::Exhausted`].
#[derive(Debug)]
pub struct ChannelInput {
    receiver: Receiver<Word>,
}

impl ChannelInput {
    /// Wraps the receiving half of a channel.
    #[must_use]
    pub const fn new(receiver: Receiver<Word>) -> Self {
        Self { receiver }
    }
}

impl InputPort for ChannelInput {
    fn read_value(&mut self) -> Result<Word, PortError> {
        self.receiver.recv().map_err(|_| PortError::Exhausted)
    }
}

/// Output port draining into a bounded channel.
///
/// A full channel blocks the machine until the receiver catches up.
#[derive(Debug, Clone)]
pub struct ChannelOutput {
    sender: SyncSender<Word>,
}

impl ChannelOutput {
    /// Wraps the sending half of a bounded channel.
    #[must_use]
    pub const fn new(sender: SyncSender<Word>) -> Self {
        Self { sender }
    }
}

impl OutputPort for ChannelOutput {
    fn write_value(&mut self, value: Word) -> Result<(), PortError> {
        self.sender
            .send(value)
            .map_err(|_| PortError::Disconnected)
    }
}
