//! C backend: translates a parsed program into a standalone C file.
//!
//! The emitted runtime (flag globals, bounded stack, `update_flags`) is
//! the reference shape the VM mirrors, including the overflow window in
//! `update_flags`. The generator assumes the program passed semantic
//! analysis; jumps to labels that were never emitted will not compile.

use crate::ast::{Instruction, Operand, Program, Target, VarType};
use std::collections::BTreeSet;

const INDENT: &str = "    ";

/// Fixed runtime preamble: includes, flag globals, the stack, and
/// `update_flags`, up to the opening of `main`.
const PRELUDE: &str = r#"#include <stdio.h>
#include <stdlib.h>
#include <stdint.h>

// Flags
int8_t ZF = 0, SF = 0, OF = 0;

// Stack implementation
#define STACK_SIZE 500
int8_t stack[STACK_SIZE];
int stack_pointer = 0;

void push(int8_t value) {
    if (stack_pointer >= STACK_SIZE) {
        printf("Stack overflow\n");
        exit(1);
    }
    stack[stack_pointer++] = value;
}

int8_t pop(void) {
    if (stack_pointer <= 0) {
        printf("Stack underflow\n");
        exit(1);
    }
    return stack[--stack_pointer];
}

void update_flags(int value) {
    ZF = (value == 0);
    SF = (value < 0);
    OF = (value < -127 || value > 128);
}

int main(void) {"#;

/// Generates the complete C translation of a program.
pub fn generate(program: &Program) -> String {
    CCodeGenerator::new(program).generate()
}

struct CCodeGenerator<'a> {
    program: &'a Program,
    labels: BTreeSet<usize>,
    lines: Vec<String>,
}

impl<'a> CCodeGenerator<'a> {
    fn new(program: &'a Program) -> Self {
        // First pass: every jump target needs a label in front of the
        // instruction it lands on.
        let labels = program
            .instructions
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Jmp(target)
                | Instruction::Jz(target)
                | Instruction::Js(target)
                | Instruction::Jo(target) => Some(*target),
                _ => None,
            })
            .collect();
        CCodeGenerator {
            program,
            labels,
            lines: PRELUDE.lines().map(String::from).collect(),
        }
    }

    fn generate(mut self) -> String {
        let program = self.program;
        for declaration in &program.declarations {
            let line = match declaration.ty {
                VarType::Byte => format!("{}int8_t {} = 0;", INDENT, declaration.name),
                VarType::Array(size) => {
                    format!("{}int8_t {}[{}] = {{0}};", INDENT, declaration.name, size)
                }
            };
            self.lines.push(line);
        }
        self.lines.push(String::new());

        for (number, instruction) in program.instructions.iter().enumerate() {
            if self.labels.contains(&number) {
                self.lines.push(format!("label_{}:", number));
            }
            self.emit(instruction);
        }

        self.lines.push(String::new());
        self.lines.push(format!("{}return 0;", INDENT));
        self.lines.push("}".to_string());

        let mut output = self.lines.join("\n");
        output.push('\n');
        output
    }

    fn emit(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::Mov { dest, src } => {
                self.push_line(format!("{} = {};", c_target(dest), c_operand(src)));
            }
            Instruction::Add { dest, src } => self.emit_arithmetic(dest, "+", src),
            Instruction::Sub { dest, src } => self.emit_arithmetic(dest, "-", src),
            Instruction::Mult { dest, src } => self.emit_arithmetic(dest, "*", src),
            Instruction::Div { dest, src } => self.emit_arithmetic(dest, "/", src),
            Instruction::And { dest, src } => self.emit_arithmetic(dest, "&", src),
            Instruction::Or { dest, src } => self.emit_arithmetic(dest, "|", src),
            Instruction::Not { dest } => {
                self.push_line(format!("{} = ~{};", dest, dest));
                self.push_line(format!("update_flags({});", dest));
            }
            Instruction::Jmp(target) => self.push_line(format!("goto label_{};", target)),
            Instruction::Jz(target) => {
                self.push_line(format!("if (ZF) goto label_{};", target));
            }
            Instruction::Js(target) => {
                self.push_line(format!("if (SF) goto label_{};", target));
            }
            Instruction::Jo(target) => {
                self.push_line(format!("if (OF) goto label_{};", target));
            }
            Instruction::Input { dest } => {
                self.push_line(format!("printf(\"Input value for {}: \");", dest));
                self.push_line(format!("scanf(\"%hhd\", &{});", dest));
            }
            Instruction::Print { src } => {
                self.push_line(format!("printf(\"%d\\n\", {});", c_operand(src)));
            }
            Instruction::Halt => self.push_line("exit(0);".to_string()),
            Instruction::Push { src } => self.push_line(format!("push({});", c_operand(src))),
            Instruction::Pop { dest } => self.push_line(format!("{} = pop();", dest)),
            Instruction::IsFull => {
                self.push_line("printf(\"%d\\n\", stack_pointer >= STACK_SIZE);".to_string());
            }
            // No function bodies exist to call into; the instruction still
            // occupies a slot in the label numbering.
            Instruction::Call { .. } => {}
        }
    }

    fn emit_arithmetic(&mut self, dest: &str, op: &str, src: &Operand) {
        self.push_line(format!("{} {}= {};", dest, op, c_operand(src)));
        self.push_line(format!("update_flags({});", dest));
    }

    fn push_line(&mut self, line: String) {
        self.lines.push(format!("{}{}", INDENT, line));
    }
}

fn c_operand(operand: &Operand) -> String {
    match operand {
        Operand::Literal(value) => value.to_string(),
        Operand::Variable(name) => name.clone(),
        Operand::Element(name, index) => format!("{}[{}]", name, index),
    }
}

fn c_target(target: &Target) -> String {
    match target {
        Target::Variable(name) => name.clone(),
        Target::Element(name, index) => format!("{}[{}]", name, index),
    }
}
