//! Syntax tree produced by the parser and consumed by the analyzer,
//! the VM, and the C backend.

/// The smallest value a byte cell can hold.
pub const BYTE_MIN: i32 = -128;
/// The largest value a byte cell can hold.
pub const BYTE_MAX: i32 = 127;

/// Type of a declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarType {
    /// A single signed 8-bit cell.
    Byte,
    /// A fixed-size array of byte cells.
    Array(usize),
}

/// One entry of the `Var` declaration header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub ty: VarType,
}

/// A value source: a literal, a scalar variable, or an array element
/// with a literal index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(i32),
    Variable(String),
    Element(String, usize),
}

/// A store destination for `mov`: a scalar variable or an array element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Variable(String),
    Element(String, usize),
}

/// One executable statement. Jump targets index the instruction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Stores a value; does not touch the flags.
    Mov { dest: Target, src: Operand },
    /// Widened addition; the result must stay within the byte range.
    Add { dest: String, src: Operand },
    Sub { dest: String, src: Operand },
    Mult { dest: String, src: Operand },
    Div { dest: String, src: Operand },
    And { dest: String, src: Operand },
    Or { dest: String, src: Operand },
    /// Bitwise complement of a scalar variable.
    Not { dest: String },
    /// Unconditional jump.
    Jmp(usize),
    /// Jump when the zero flag is set.
    Jz(usize),
    /// Jump when the sign flag is set.
    Js(usize),
    /// Jump when the overflow flag is set.
    Jo(usize),
    /// Prompts for a decimal value and stores it.
    Input { dest: String },
    /// Prints a decimal value and a newline.
    Print { src: Operand },
    /// Stops execution with success.
    Halt,
    /// Pushes a byte-range value onto the bounded stack.
    Push { src: Operand },
    /// Pops the top of the bounded stack into a scalar variable.
    Pop { dest: String },
    /// Prints 1 when the stack is at capacity, 0 otherwise.
    IsFull,
    /// Accepted by the grammar but not executable; the language has no
    /// function definitions.
    Call { function: String },
}

/// A complete parsed program: the declaration header followed by the
/// instruction list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub instructions: Vec<Instruction>,
}
