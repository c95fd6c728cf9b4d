#![no_main]

use std::collections::VecDeque;

use intcode_core::{
    disassemble, load_program, Decoder, DiscardOutput, Machine, MachineConfig, Memory, Word,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Text path: whatever parses must run to halt or a fault.
    if let Ok(memory) = load_program(data) {
        let config = MachineConfig::default()
            .with_step_limit(10_000)
            .with_address_limit(1 << 16);
        let mut machine = Machine::with_config(memory, config);
        let mut input: VecDeque<Word> = VecDeque::from([0, 1, 8]);
        let _ = machine.exec(&mut input, &mut DiscardOutput);
    }

    // Word path: raw 8-byte chunks as memory words.
    let words: Vec<Word> = data
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            Word::from_le_bytes(bytes)
        })
        .collect();
    let memory = Memory::from_words(words);
    let _ = Decoder::decode(&memory, 0);
    let _ = disassemble(&memory, 0, memory.len());

    let config = MachineConfig::default()
        .with_step_limit(10_000)
        .with_address_limit(1 << 16);
    let mut machine = Machine::with_config(memory, config);
    let _ = machine.exec_with_inputs([7, -7]);
});
