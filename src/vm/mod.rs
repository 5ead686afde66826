//! Virtual machine for executing parsed programs.
//!
//! The VM owns the bounded stack, the condition flags, and a program
//! counter; the data segment is rebuilt from the declarations on every
//! run. All I/O goes through injected reader/writer handles so tests can
//! drive the machine with in-memory buffers.

pub mod flags;
pub mod memory;
pub mod stack;

use crate::ast::{Instruction, Operand, Program, Target, BYTE_MAX, BYTE_MIN};
use log::{debug, warn};
use std::fmt;
use std::io::{self, BufRead, Write};

pub use flags::Flags;
pub use memory::{DataSegment, DATA_SIZE};
pub use stack::{Stack, StackError, STACK_SIZE};

/// Errors surfaced while executing a program.
///
/// `Stack` variants are fatal by policy: the VM never recovers from them
/// and the CLI converts them into the diagnostic line and exit status the
/// compiled C runtime produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    Stack(StackError),
    Undefined(String),
    NotAnArray(String),
    NotAScalar(String),
    IndexOutOfBounds {
        name: String,
        index: usize,
        size: usize,
    },
    ByteRange {
        operation: &'static str,
        value: i64,
    },
    DivideByZero,
    BadInput(String),
    OutOfMemory,
    Io(String),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Stack(err) => write!(f, "{}", err),
            RuntimeError::Undefined(name) => write!(f, "Variable undefined {}", name),
            RuntimeError::NotAnArray(name) => write!(f, "{} is not an array", name),
            RuntimeError::NotAScalar(name) => write!(f, "{} is not a byte variable", name),
            RuntimeError::IndexOutOfBounds { name, index, size } => {
                write!(
                    f,
                    "Array index {} out of bounds for {} (size {})",
                    index, name, size
                )
            }
            RuntimeError::ByteRange { operation, value } => {
                write!(f, "Result of {} ({}) out of range for byte", operation, value)
            }
            RuntimeError::DivideByZero => write!(f, "Division by zero"),
            RuntimeError::BadInput(message) => write!(f, "Invalid input: {}", message),
            RuntimeError::OutOfMemory => write!(f, "Out of data memory"),
            RuntimeError::Io(message) => write!(f, "I/O error: {}", message),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<StackError> for RuntimeError {
    fn from(err: StackError) -> Self {
        RuntimeError::Stack(err)
    }
}

fn io_err(err: io::Error) -> RuntimeError {
    RuntimeError::Io(err.to_string())
}

pub struct Vm {
    stack: Stack,
    flags: Flags,
    pc: usize,
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl Vm {
    pub fn new() -> Self {
        Vm {
            stack: Stack::new(),
            flags: Flags::default(),
            pc: 0,
        }
    }

    /// Condition flags after the most recent instruction.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Runs a program against stdin/stdout.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with_io(program, &mut stdin.lock(), &mut stdout.lock())
    }

    /// Runs a program with explicit I/O handles.
    pub fn run_with_io<R, W>(
        &mut self,
        program: &Program,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<(), RuntimeError>
    where
        R: BufRead,
        W: Write,
    {
        self.stack = Stack::new();
        self.flags = Flags::default();
        self.pc = 0;
        let mut data = DataSegment::new(&program.declarations)?;

        while self.pc < program.instructions.len() {
            let instruction = &program.instructions[self.pc];
            debug!("pc {}: {:?}", self.pc, instruction);
            match instruction {
                Instruction::Mov { dest, src } => {
                    let value = self.operand_value(&data, src)?;
                    match dest {
                        Target::Variable(name) => data.store(name, value)?,
                        Target::Element(name, index) => data.store_element(name, *index, value)?,
                    }
                }
                Instruction::Add { dest, src } => {
                    let result = i64::from(data.load(dest)?)
                        + i64::from(self.operand_value(&data, src)?);
                    if result < i64::from(BYTE_MIN) || result > i64::from(BYTE_MAX) {
                        return Err(RuntimeError::ByteRange {
                            operation: "add",
                            value: result,
                        });
                    }
                    let result = result as i32;
                    data.store(dest, result)?;
                    self.flags.update(result);
                }
                Instruction::Sub { dest, src } => {
                    let result = data.load(dest)?.wrapping_sub(self.operand_value(&data, src)?);
                    data.store(dest, result)?;
                    self.flags.update(result);
                }
                Instruction::Mult { dest, src } => {
                    let result = data.load(dest)?.wrapping_mul(self.operand_value(&data, src)?);
                    data.store(dest, result)?;
                    self.flags.update(result);
                }
                Instruction::Div { dest, src } => {
                    let divisor = self.operand_value(&data, src)?;
                    if divisor == 0 {
                        return Err(RuntimeError::DivideByZero);
                    }
                    // Truncating division, matching the C backend.
                    let result = data.load(dest)?.wrapping_div(divisor);
                    data.store(dest, result)?;
                    self.flags.update(result);
                }
                Instruction::And { dest, src } => {
                    let result = data.load(dest)? & self.operand_value(&data, src)?;
                    data.store(dest, result)?;
                    self.flags.update(result);
                }
                Instruction::Or { dest, src } => {
                    let result = data.load(dest)? | self.operand_value(&data, src)?;
                    data.store(dest, result)?;
                    self.flags.update(result);
                }
                Instruction::Not { dest } => {
                    let result = !data.load(dest)?;
                    data.store(dest, result)?;
                    self.flags.update(result);
                }
                Instruction::Jmp(target) => {
                    self.pc = *target;
                    continue;
                }
                Instruction::Jz(target) => {
                    if self.flags.zero {
                        self.pc = *target;
                        continue;
                    }
                }
                Instruction::Js(target) => {
                    if self.flags.sign {
                        self.pc = *target;
                        continue;
                    }
                }
                Instruction::Jo(target) => {
                    if self.flags.overflow {
                        self.pc = *target;
                        continue;
                    }
                }
                Instruction::Input { dest } => {
                    write!(writer, "Input value for {}: ", dest).map_err(io_err)?;
                    writer.flush().map_err(io_err)?;
                    let mut line = String::new();
                    if reader.read_line(&mut line).map_err(io_err)? == 0 {
                        return Err(RuntimeError::BadInput(
                            "unexpected end of input".to_string(),
                        ));
                    }
                    let value: i32 = line.trim().parse().map_err(|_| {
                        RuntimeError::BadInput(format!("not a number: {:?}", line.trim()))
                    })?;
                    data.store(dest, value)?;
                }
                Instruction::Print { src } => {
                    let value = self.operand_value(&data, src)?;
                    writeln!(writer, "{}", value).map_err(io_err)?;
                }
                Instruction::Halt => return Ok(()),
                Instruction::Push { src } => {
                    let value = self.operand_value(&data, src)?;
                    if value < BYTE_MIN || value > BYTE_MAX {
                        return Err(RuntimeError::ByteRange {
                            operation: "push",
                            value: i64::from(value),
                        });
                    }
                    self.stack.push(value as i8)?;
                }
                Instruction::Pop { dest } => {
                    let value = self.stack.pop()?;
                    data.store(dest, i32::from(value))?;
                }
                Instruction::IsFull => {
                    let full = if self.stack.is_full() { 1 } else { 0 };
                    writeln!(writer, "{}", full).map_err(io_err)?;
                }
                Instruction::Call { function } => {
                    warn!(
                        "call {} ignored: function definitions are not supported",
                        function
                    );
                }
            }
            self.pc += 1;
        }
        Ok(())
    }

    fn operand_value(&self, data: &DataSegment, operand: &Operand) -> Result<i32, RuntimeError> {
        match operand {
            Operand::Literal(value) => Ok(*value),
            Operand::Variable(name) => data.load(name),
            Operand::Element(name, index) => data.load_element(name, *index),
        }
    }
}
