use std::io::Write;

use intcode_core::{describe, ExecutionStats, Memory, TraceEvent, TraceSink};

/// Which reports the runner prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportOptions {
    /// Print every decoded instruction before it executes.
    pub trace: bool,
    /// Print execution statistics after the run.
    pub stats: bool,
    /// Print the memory image and the word at address 0 on halt.
    pub dump: bool,
}

/// Trace sink backing `--trace`, `--stats`, and `--dump`.
///
/// Write failures on the report stream are ignored; they never end a run.
#[derive(Debug)]
pub struct ReportSink<W> {
    writer: W,
    options: ReportOptions,
    stats: ExecutionStats,
}

impl<W: Write> ReportSink<W> {
    /// Creates a sink writing to `writer`.
    #[must_use]
    pub fn new(writer: W, options: ReportOptions) -> Self {
        Self {
            writer,
            options,
            stats: ExecutionStats::new(),
        }
    }

    /// Statistics gathered so far.
    #[must_use]
    pub const fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    /// Writes the statistics report when `--stats` is on.
    pub fn finish(&mut self) {
        if self.options.stats {
            let _ = writeln!(self.writer, "{}", self.stats);
        }
    }

    /// Writes a memory image labelled as the state at a fault.
    pub fn fault_dump(&mut self, memory: &Memory) {
        let _ = writeln!(self.writer, "memory: {memory}");
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for ReportSink<W> {
    fn on_event(&mut self, event: TraceEvent) {
        if self.options.trace {
            if let TraceEvent::InstructionStart { instruction } = &event {
                let _ = writeln!(self.writer, "{}", describe(instruction));
            }
        }
        self.stats.on_event(event);
    }

    fn on_halt(&mut self, memory: &Memory) {
        if self.options.dump {
            let _ = writeln!(self.writer, "memory: {memory}");
            let _ = writeln!(self.writer, "result: {}", memory.get(0));
        }
    }
}
