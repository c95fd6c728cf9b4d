//! CLI entry point for the `intcode` runner binary.

use std::collections::VecDeque;
use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use intcode_cli::{parse_input_list, ReportOptions, ReportSink};
use intcode_core::{
    load_program_file, InputPort, LineInput, LineOutput, Machine, MachineConfig, Word,
};
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: intcode <program> [options]

Runs a comma-separated Intcode program until it halts.

Options:
  -i, --input <list>   Comma-separated input values (default: one per line on stdin)
      --trace          Print each decoded instruction to stderr
      --stats          Print execution statistics to stderr after the run
      --dump           Print memory and address 0 to stderr on halt
      --max-steps <n>  Fault after <n> instructions
  -h, --help           Show this help message

Examples:
  intcode program.txt
  intcode program.txt -i 8
  intcode program.txt --input 1,2,3 --trace
";

/// Exit status for command-line usage mistakes.
const USAGE_EXIT: i32 = 2;

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    program: PathBuf,
    inputs: Option<Vec<Word>>,
    report: ReportOptions,
    max_steps: Option<u64>,
}

#[derive(Debug)]
enum ParseResult {
    Run(RunArgs),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut program: Option<PathBuf> = None;
    let mut inputs: Option<Vec<Word>> = None;
    let mut report = ReportOptions::default();
    let mut max_steps: Option<u64> = None;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--trace" {
            report.trace = true;
            continue;
        }
        if arg == "--stats" {
            report.stats = true;
            continue;
        }
        if arg == "--dump" {
            report.dump = true;
            continue;
        }

        if arg == "-i" || arg == "--input" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --input".to_string())?;
            inputs = Some(parse_input_list(&value.to_string_lossy())?);
            continue;
        }

        if arg == "--max-steps" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --max-steps".to_string())?;
            let value = value.to_string_lossy();
            let limit = value
                .parse::<u64>()
                .map_err(|_| format!("invalid step limit: {value}"))?;
            max_steps = Some(limit);
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if program.is_some() {
            return Err("multiple program paths provided".to_string());
        }
        program = Some(PathBuf::from(arg));
    }

    let program = program.ok_or_else(|| "missing program path".to_string())?;
    Ok(ParseResult::Run(RunArgs {
        program,
        inputs,
        report,
        max_steps,
    }))
}

fn run(args: RunArgs) -> Result<(), i32> {
    let memory = match load_program_file(&args.program) {
        Ok(memory) => memory,
        Err(e) => {
            eprintln!("error: {}: {e}", args.program.display());
            return Err(1);
        }
    };

    let config = MachineConfig {
        step_limit: args.max_steps,
        ..MachineConfig::default()
    };
    let mut machine = Machine::with_config(memory, config);

    let mut listed;
    let mut lines;
    let input: &mut dyn InputPort = match args.inputs {
        Some(values) => {
            listed = VecDeque::from(values);
            &mut listed
        }
        None => {
            lines = LineInput::new(io::stdin().lock());
            &mut lines
        }
    };
    let mut output = LineOutput::new(io::stdout().lock());
    let mut report = ReportSink::new(io::stderr().lock(), args.report);

    let result = machine.exec_traced(input, &mut output, &mut report);
    report.finish();

    match result {
        Ok(_) => Ok(()),
        Err(fault) => {
            eprintln!("error: {fault}");
            report.fault_dump(machine.memory());
            Err(1)
        }
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(args)) => match run(args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            USAGE_EXIT
        }
    };

    std::process::exit(exit_code);
}
