//! Zeus Compiler CLI

use std::process::ExitCode;

use zeusc::commands::{check_file, compile_file, lex_file, parse_file};
use zeusc::{init_tracing, parse_args};

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let command = args[1].as_str();
    let mut parsed = parse_args(&args[2..]);
    for warning in &parsed.warnings {
        eprintln!("warning: {warning}");
    }

    match command {
        "compile" => {
            let Some(input) = parsed.positional.first() else {
                print_usage();
                return ExitCode::SUCCESS;
            };
            if let Some(output) = parsed.positional.get(1) {
                parsed.options.output = output.into();
            }
            compile_file(input, &parsed.options)
        }
        "check" | "parse" | "lex" => {
            let Some(path) = parsed.positional.first() else {
                eprintln!("Usage: zeus {command} <file>");
                return ExitCode::FAILURE;
            };
            match command {
                "check" => check_file(path, &parsed.options),
                "parse" => parse_file(path, &parsed.options),
                _ => lex_file(path, &parsed.options),
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-v" => {
            println!("Zeus Compiler {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("Zeus Compiler (RISC-V assembly backend)");
    println!();
    println!("Usage: zeus <command> [options]");
    println!();
    println!("Commands:");
    println!("  compile <input> [output]  Compile to assembly (default output: out.s)");
    println!("  check <file>              Check a program without generating code");
    println!("  parse <file>              Parse a single file and print its tree");
    println!("  lex <file>                Tokenize a single file and print its tokens");
    println!("  help                      Show this help message");
    println!("  version                   Show version information");
    println!();
    println!("Options:");
    println!("  --jobs=<n>                Parse imported files on n threads");
    println!("  --color=<mode>            Diagnostic colors: auto, always, never");
    println!("  --stack-size=<kb>         Program stack in KiB (overrides #stack_size)");
    println!();
    println!("Set ZEUS_LOG (e.g. ZEUS_LOG=debug) to trace the compiler.");
}
