//! oxasm: an interpreter and C-emitting compiler for a small
//! assembly-style teaching language.

pub mod analyzer;
pub mod ast;
pub mod cli;
pub mod codegen;
pub mod parser;
pub mod token;
pub mod vm;
