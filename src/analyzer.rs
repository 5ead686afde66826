//! Static checks over a parsed program.
//!
//! The analyzer walks the whole tree and collects every error it finds
//! rather than stopping at the first, so a user sees all problems in one
//! pass. The VM performs the same checks dynamically and does not assume
//! the analyzer ran.

use crate::ast::{Declaration, Instruction, Operand, Program, Target, VarType, BYTE_MAX, BYTE_MIN};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    DuplicateDeclaration(String),
    Undefined(String),
    NotAnArray(String),
    NotAScalar(String),
    LiteralOutOfRange(i32),
    IndexOutOfBounds {
        name: String,
        index: usize,
        size: usize,
    },
    JumpOutOfRange {
        target: usize,
        count: usize,
    },
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::DuplicateDeclaration(name) => {
                write!(f, "Variable {} already declared", name)
            }
            SemanticError::Undefined(name) => write!(f, "Variable undefined {}", name),
            SemanticError::NotAnArray(name) => write!(f, "{} is not an array", name),
            SemanticError::NotAScalar(name) => write!(f, "{} is not a byte variable", name),
            SemanticError::LiteralOutOfRange(value) => {
                write!(f, "Value {} out of byte range", value)
            }
            SemanticError::IndexOutOfBounds { name, index, size } => {
                write!(
                    f,
                    "Array index {} out of bounds for {} (size {})",
                    index, name, size
                )
            }
            SemanticError::JumpOutOfRange { target, count } => {
                write!(
                    f,
                    "Jump target {} out of range (program has {} instructions)",
                    target, count
                )
            }
        }
    }
}

impl std::error::Error for SemanticError {}

/// Checks a program, returning every semantic error found.
pub fn analyze(program: &Program) -> Result<(), Vec<SemanticError>> {
    let mut analyzer = Analyzer::default();
    analyzer.check_declarations(&program.declarations);
    for instruction in &program.instructions {
        analyzer.check_instruction(instruction, program.instructions.len());
    }
    if analyzer.errors.is_empty() {
        Ok(())
    } else {
        Err(analyzer.errors)
    }
}

#[derive(Default)]
struct Analyzer {
    variables: HashMap<String, VarType>,
    errors: Vec<SemanticError>,
}

impl Analyzer {
    fn check_declarations(&mut self, declarations: &[Declaration]) {
        for declaration in declarations {
            if self.variables.contains_key(&declaration.name) {
                self.errors
                    .push(SemanticError::DuplicateDeclaration(declaration.name.clone()));
            }
            self.variables
                .insert(declaration.name.clone(), declaration.ty.clone());
        }
    }

    fn check_instruction(&mut self, instruction: &Instruction, count: usize) {
        match instruction {
            Instruction::Mov { dest, src } => {
                self.check_target(dest);
                self.check_operand(src);
            }
            Instruction::Add { dest, src }
            | Instruction::Sub { dest, src }
            | Instruction::Mult { dest, src }
            | Instruction::Div { dest, src }
            | Instruction::And { dest, src }
            | Instruction::Or { dest, src } => {
                self.check_scalar(dest);
                self.check_operand(src);
            }
            Instruction::Not { dest }
            | Instruction::Input { dest }
            | Instruction::Pop { dest } => self.check_scalar(dest),
            Instruction::Jmp(target)
            | Instruction::Jz(target)
            | Instruction::Js(target)
            | Instruction::Jo(target) => {
                if *target >= count {
                    self.errors.push(SemanticError::JumpOutOfRange {
                        target: *target,
                        count,
                    });
                }
            }
            Instruction::Print { src } | Instruction::Push { src } => self.check_operand(src),
            Instruction::Halt | Instruction::IsFull | Instruction::Call { .. } => {}
        }
    }

    fn check_operand(&mut self, operand: &Operand) {
        match operand {
            Operand::Literal(value) => {
                if *value < BYTE_MIN || *value > BYTE_MAX {
                    self.errors.push(SemanticError::LiteralOutOfRange(*value));
                }
            }
            Operand::Variable(name) => self.check_scalar(name),
            Operand::Element(name, index) => self.check_element(name, *index),
        }
    }

    fn check_target(&mut self, target: &Target) {
        match target {
            Target::Variable(name) => self.check_scalar(name),
            Target::Element(name, index) => self.check_element(name, *index),
        }
    }

    fn check_scalar(&mut self, name: &str) {
        match self.variables.get(name) {
            None => self.errors.push(SemanticError::Undefined(name.to_string())),
            Some(VarType::Array(_)) => {
                self.errors.push(SemanticError::NotAScalar(name.to_string()))
            }
            Some(VarType::Byte) => {}
        }
    }

    fn check_element(&mut self, name: &str, index: usize) {
        match self.variables.get(name) {
            None => self.errors.push(SemanticError::Undefined(name.to_string())),
            Some(VarType::Byte) => {
                self.errors.push(SemanticError::NotAnArray(name.to_string()))
            }
            Some(VarType::Array(size)) => {
                if index >= *size {
                    self.errors.push(SemanticError::IndexOutOfBounds {
                        name: name.to_string(),
                        index,
                        size: *size,
                    });
                }
            }
        }
    }
}
