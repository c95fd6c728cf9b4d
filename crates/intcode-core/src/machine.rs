//! Execution loop: decode at pc, dispatch, advance, until halt or fault.

use std::collections::VecDeque;

use crate::api::{
    CancellationToken, MachineConfig, MachineSnapshot, NoopTrace, RunOutcome, StepOutcome,
    TraceEvent, TraceSink,
};
use crate::decoder::Decoder;
use crate::execute::{execute_instruction, ExecuteContext, ExecuteOutcome};
use crate::fault::{Fault, FaultCode};
use crate::ports::{InputPort, OutputPort};
use crate::{Address, Memory, RunState, Word};

/// One machine instance: exclusively owns its memory and program counter.
#[derive(Debug, Clone)]
pub struct Machine {
    memory: Memory,
    pc: Address,
    run_state: RunState,
    steps: u64,
    config: MachineConfig,
    cancellation: Option<CancellationToken>,
    latched_fault: Option<Fault>,
}

impl Machine {
    /// Creates an idle machine at `pc = 0` with the default configuration.
    #[must_use]
    pub fn new(memory: Memory) -> Self {
        Self::with_config(memory, MachineConfig::default())
    }

    /// Creates an idle machine at `pc = 0`.
    #[must_use]
    pub const fn with_config(memory: Memory, config: MachineConfig) -> Self {
        Self {
            memory,
            pc: 0,
            run_state: RunState::Idle,
            steps: 0,
            config,
            cancellation: None,
            latched_fault: None,
        }
    }

    /// Attaches a cooperative cancellation token checked before every instruction.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Memory image.
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable memory image, for patching a program before it runs.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Consumes the machine, returning its memory.
    #[must_use]
    pub fn into_memory(self) -> Memory {
        self.memory
    }

    /// Address of the next instruction.
    #[must_use]
    pub const fn pc(&self) -> Address {
        self.pc
    }

    /// Current execution state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Instructions retired so far.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Configuration this machine was built with.
    #[must_use]
    pub const fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Fault that stopped the machine, if any.
    #[must_use]
    pub const fn latched_fault(&self) -> Option<Fault> {
        self.latched_fault
    }

    /// Copies the host-visible state.
    #[must_use]
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            pc: self.pc,
            run_state: self.run_state,
            steps: self.steps,
            memory: self.memory.clone(),
        }
    }

    /// Runs until halt.
    ///
    /// # Errors
    ///
    /// Returns the first [`Fault`]; the machine stays in
    /// [`RunState::Faulted`] afterwards.
    pub fn exec(
        &mut self,
        input: &mut dyn InputPort,
        output: &mut dyn OutputPort,
    ) -> Result<RunOutcome, Fault> {
        self.exec_traced(input, output, &mut NoopTrace)
    }

    /// Runs until halt, feeding `inputs` and collecting every output.
    ///
    /// # Errors
    ///
    /// Returns the first [`Fault`], including [`FaultCode::InputExhausted`]
    /// once `inputs` runs dry.
    pub fn exec_with_inputs(
        &mut self,
        inputs: impl IntoIterator<Item = Word>,
    ) -> Result<Vec<Word>, Fault> {
        let mut input: VecDeque<Word> = inputs.into_iter().collect();
        let mut output: Vec<Word> = Vec::new();
        self.exec(&mut input, &mut output)?;
        Ok(output)
    }

    /// Runs until halt, reporting every step to `trace`.
    ///
    /// Calling this on a halted machine returns immediately; on a faulted
    /// machine it returns the latched fault.
    ///
    /// # Errors
    ///
    /// Returns the first [`Fault`].
    pub fn exec_traced(
        &mut self,
        input: &mut dyn InputPort,
        output: &mut dyn OutputPort,
        trace: &mut dyn TraceSink,
    ) -> Result<RunOutcome, Fault> {
        loop {
            if self.step(input, output, trace)? == StepOutcome::Halted {
                return Ok(RunOutcome {
                    steps: self.steps,
                    final_pc: self.pc,
                });
            }
        }
    }

    /// Executes exactly one instruction.
    ///
    /// This is the decode-to-dispatch boundary where steppers and debuggers
    /// attach.
    ///
    /// # Errors
    ///
    /// Returns the fault raised by the budget check, decoding, or the
    /// operation, and latches it.
    pub fn step(
        &mut self,
        input: &mut dyn InputPort,
        output: &mut dyn OutputPort,
        trace: &mut dyn TraceSink,
    ) -> Result<StepOutcome, Fault> {
        match self.run_state {
            RunState::Halted => return Ok(StepOutcome::Halted),
            RunState::Faulted(code) => {
                return Err(self
                    .latched_fault
                    .unwrap_or_else(|| Fault::new(code, self.pc, 0)));
            }
            RunState::Idle => self.run_state = RunState::Running,
            RunState::Running => {}
        }

        if let Err(fault) = self.check_budget() {
            return Err(self.latch(fault, trace));
        }

        let instr = match Decoder::decode_bounded(&self.memory, self.pc, self.config.address_limit)
        {
            Ok(instr) => instr,
            Err(fault) => return Err(self.latch(fault, trace)),
        };
        trace.on_event(TraceEvent::InstructionStart { instruction: instr });

        let outcome = execute_instruction(
            &instr,
            &mut ExecuteContext {
                memory: &mut self.memory,
                input,
                output,
                trace: &mut *trace,
                address_limit: self.config.address_limit,
            },
        );

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(fault) => return Err(self.latch(fault, trace)),
        };
        self.steps += 1;

        match outcome {
            ExecuteOutcome::Advance => self.pc = instr.next_pc(),
            ExecuteOutcome::Jump(target) => self.pc = target,
            ExecuteOutcome::Halt => {
                self.run_state = RunState::Halted;
                trace.on_event(TraceEvent::Halted {
                    pc: self.pc,
                    steps: self.steps,
                });
                trace.on_halt(&self.memory);
                return Ok(StepOutcome::Halted);
            }
        }

        Ok(StepOutcome::Retired {
            opcode: instr.opcode,
            next_pc: self.pc,
        })
    }

    fn check_budget(&self) -> Result<(), Fault> {
        let steps = Word::try_from(self.steps).unwrap_or(Word::MAX);

        if self
            .cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
        {
            return Err(Fault::new(FaultCode::Cancelled, self.pc, steps));
        }

        match self.config.step_limit {
            Some(limit) if self.steps >= limit => {
                Err(Fault::new(FaultCode::StepLimitExceeded, self.pc, steps))
            }
            _ => Ok(()),
        }
    }

    fn latch(&mut self, fault: Fault, trace: &mut dyn TraceSink) -> Fault {
        self.run_state = RunState::Faulted(fault.code);
        self.latched_fault = Some(fault);
        trace.on_event(TraceEvent::FaultRaised { fault });
        fault
    }
}
