use crate::analyzer;
use crate::ast::Program;
use crate::codegen;
use crate::parser::Parser;
use crate::vm::{RuntimeError, Vm};
use log::LevelFilter;
use std::env;
use std::fs;

const USAGE: &str = "Usage: oxasm [-c [-o FILE]] [--debug] <script.oxa>";

/// Parsed command-line options.
#[derive(Debug)]
pub struct Options {
    pub input: String,
    pub emit_c: bool,
    pub output: String,
    pub debug: bool,
}

pub fn run_main() -> Result<(), i32> {
    let args: Vec<String> = env::args().skip(1).collect();
    run_main_with_args(&args)
}

pub fn run_main_with_args(args: &[String]) -> Result<(), i32> {
    let options = parse_args(args)?;
    init_logging(options.debug);
    if options.emit_c {
        emit_c_file(&options.input, &options.output)
    } else {
        run_file(&options.input)
    }
}

pub fn parse_args(args: &[String]) -> Result<Options, i32> {
    let mut input = None;
    let mut emit_c = false;
    let mut output = String::from("output.c");
    let mut debug = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--emit-c" => emit_c = true,
            "-o" | "--output" => match iter.next() {
                Some(path) => output = path.clone(),
                None => return usage_error(),
            },
            "--debug" => debug = true,
            _ if arg.starts_with('-') => return usage_error(),
            _ => {
                if input.is_some() {
                    return usage_error();
                }
                input = Some(arg.clone());
            }
        }
    }

    match input {
        Some(input) => Ok(Options {
            input,
            emit_c,
            output,
            debug,
        }),
        None => usage_error(),
    }
}

fn usage_error<T>() -> Result<T, i32> {
    eprintln!("{}", USAGE);
    Err(64) // Standard exit code for command-line usage error
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    // A second initialization in the same process is a no-op.
    let _ = builder.try_init();
}

/// Interprets a script file.
pub fn run_file(path: &str) -> Result<(), i32> {
    let program = load_program(path)?;
    let mut vm = Vm::new();
    match vm.run(&program) {
        Ok(()) => Ok(()),
        Err(RuntimeError::Stack(err)) => {
            // Same surface as the compiled runtime: diagnostic on stdout,
            // exit status 1.
            println!("{}", err);
            Err(1)
        }
        Err(err) => {
            eprintln!("Runtime error: {}", err);
            Err(70) // Standard exit code for an internal software error
        }
    }
}

/// Compiles a script file to C.
pub fn emit_c_file(path: &str, output: &str) -> Result<(), i32> {
    let program = load_program(path)?;
    let c_code = codegen::generate(&program);
    if let Err(err) = fs::write(output, c_code) {
        eprintln!("Error writing '{}': {}", output, err);
        return Err(74); // Standard exit code for I/O error
    }
    println!("Successfully compiled to {}", output);
    Ok(())
}

fn load_program(path: &str) -> Result<Program, i32> {
    match fs::read_to_string(path) {
        Ok(source) => compile_source(&source),
        Err(err) => {
            eprintln!("Error reading file '{}': {}", path, err);
            Err(74)
        }
    }
}

/// Runs the front end (lex, parse, analyze) over a source string.
pub fn compile_source(source: &str) -> Result<Program, i32> {
    let program = match Parser::parse(source) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{}", err);
            return Err(65); // Standard exit code for data format error
        }
    };
    if let Err(errors) = analyzer::analyze(&program) {
        eprintln!("Semantic errors:");
        for error in &errors {
            eprintln!("  {}", error);
        }
        return Err(65);
    }
    Ok(program)
}
