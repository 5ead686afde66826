//! Recursive descent parser over the logos token stream.
//!
//! The grammar is a declaration header (`Var x: byte, y: Array[10];`)
//! followed by a list of semicolon-terminated instructions.

use crate::ast::{Declaration, Instruction, Operand, Program, Target, VarType};
use crate::token::Token;
use log::debug;
use logos::{Lexer, Logos};
use std::fmt;

/// Errors produced while lexing or parsing a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The lexer hit input that matches no token.
    Lex { slice: String },
    /// A token appeared where a different construct was required.
    Unexpected { expected: String, found: String },
    /// The source ended mid-construct.
    Eof { expected: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex { slice } => write!(f, "Unrecognized input: {:?}", slice),
            ParseError::Unexpected { expected, found } => {
                write!(f, "Expected {}, found {}", expected, found)
            }
            ParseError::Eof { expected } => {
                write!(f, "Expected {}, found end of input", expected)
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub struct Parser<'a> {
    lexer: Lexer<'a, Token>,
    current: Option<Token>,
}

impl<'a> Parser<'a> {
    /// Parses a complete source file into a [`Program`].
    pub fn parse(source: &'a str) -> Result<Program, ParseError> {
        let mut parser = Parser {
            lexer: Token::lexer(source),
            current: None,
        };
        parser.advance()?;
        parser.program()
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = match self.lexer.next() {
            None => None,
            Some(Ok(token)) => Some(token),
            Some(Err(())) => {
                return Err(ParseError::Lex {
                    slice: self.lexer.slice().to_string(),
                })
            }
        };
        debug!("token: {:?}", self.current);
        Ok(())
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match &self.current {
            Some(token) => ParseError::Unexpected {
                expected: expected.to_string(),
                found: format!("{:?}", token),
            },
            None => ParseError::Eof {
                expected: expected.to_string(),
            },
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> Result<(), ParseError> {
        if self.current.as_ref() == Some(&token) {
            self.advance()
        } else {
            Err(self.unexpected(what))
        }
    }

    fn identifier(&mut self, what: &str) -> Result<String, ParseError> {
        match &self.current {
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                self.advance()?;
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn number(&mut self, what: &str) -> Result<i32, ParseError> {
        match &self.current {
            Some(Token::Number(value)) => {
                let value = *value;
                self.advance()?;
                Ok(value)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn non_negative(value: i32, what: &str) -> Result<usize, ParseError> {
        usize::try_from(value).map_err(|_| ParseError::Unexpected {
            expected: format!("a non-negative {}", what),
            found: value.to_string(),
        })
    }

    fn program(&mut self) -> Result<Program, ParseError> {
        debug!("parsing program");
        self.expect(Token::Var, "the `Var` declaration header")?;
        let mut declarations = vec![self.declaration()?];
        while self.current == Some(Token::Comma) {
            self.advance()?;
            declarations.push(self.declaration()?);
        }
        self.expect(Token::Semicolon, "`;` after the declarations")?;

        let mut instructions = Vec::new();
        while self.current.is_some() {
            instructions.push(self.instruction()?);
        }
        Ok(Program {
            declarations,
            instructions,
        })
    }

    fn declaration(&mut self) -> Result<Declaration, ParseError> {
        let name = self.identifier("a variable name")?;
        self.expect(Token::Colon, "`:` after the variable name")?;
        let ty = self.var_type()?;
        debug!("declared {} as {:?}", name, ty);
        Ok(Declaration { name, ty })
    }

    fn var_type(&mut self) -> Result<VarType, ParseError> {
        match self.current {
            Some(Token::Byte) => {
                self.advance()?;
                Ok(VarType::Byte)
            }
            Some(Token::Array) => {
                self.advance()?;
                self.expect(Token::LBracket, "`[` after `Array`")?;
                let value = self.number("an array size")?;
                let size = Self::non_negative(value, "array size")?;
                self.expect(Token::RBracket, "`]` after the array size")?;
                Ok(VarType::Array(size))
            }
            _ => Err(self.unexpected("a type (`byte` or `Array[N]`)")),
        }
    }

    fn instruction(&mut self) -> Result<Instruction, ParseError> {
        let instruction = self.command()?;
        self.expect(Token::Semicolon, "`;` after the instruction")?;
        Ok(instruction)
    }

    fn command(&mut self) -> Result<Instruction, ParseError> {
        let command = match &self.current {
            Some(token) => token.clone(),
            None => return Err(self.unexpected("an instruction")),
        };
        debug!("parsing command {:?}", command);
        match command {
            Token::Mov => {
                self.advance()?;
                let dest = self.target()?;
                self.expect(Token::Comma, "`,` between operands")?;
                let src = self.operand()?;
                Ok(Instruction::Mov { dest, src })
            }
            Token::Add => self.binary(|dest, src| Instruction::Add { dest, src }),
            Token::Sub => self.binary(|dest, src| Instruction::Sub { dest, src }),
            Token::Mult => self.binary(|dest, src| Instruction::Mult { dest, src }),
            Token::Div => self.binary(|dest, src| Instruction::Div { dest, src }),
            Token::And => self.binary(|dest, src| Instruction::And { dest, src }),
            Token::Or => self.binary(|dest, src| Instruction::Or { dest, src }),
            Token::Not => {
                self.advance()?;
                let dest = self.identifier("a destination variable")?;
                Ok(Instruction::Not { dest })
            }
            Token::Jmp => self.jump(Instruction::Jmp),
            Token::Jz => self.jump(Instruction::Jz),
            Token::Js => self.jump(Instruction::Js),
            Token::Jo => self.jump(Instruction::Jo),
            Token::Input => {
                self.advance()?;
                self.expect(Token::LParen, "`(` after `input`")?;
                let dest = self.identifier("a destination variable")?;
                self.expect(Token::RParen, "`)` after the operand")?;
                Ok(Instruction::Input { dest })
            }
            Token::Print => {
                self.advance()?;
                self.expect(Token::LParen, "`(` after `print`")?;
                let src = self.operand()?;
                self.expect(Token::RParen, "`)` after the operand")?;
                Ok(Instruction::Print { src })
            }
            Token::Halt => {
                self.advance()?;
                Ok(Instruction::Halt)
            }
            Token::Push => {
                self.advance()?;
                let src = self.operand()?;
                Ok(Instruction::Push { src })
            }
            Token::Pop => {
                self.advance()?;
                let dest = self.identifier("a destination variable")?;
                Ok(Instruction::Pop { dest })
            }
            Token::IsFull => {
                self.advance()?;
                Ok(Instruction::IsFull)
            }
            Token::Call => {
                self.advance()?;
                let function = self.identifier("a function name")?;
                Ok(Instruction::Call { function })
            }
            _ => Err(self.unexpected("an instruction")),
        }
    }

    fn binary<F>(&mut self, build: F) -> Result<Instruction, ParseError>
    where
        F: FnOnce(String, Operand) -> Instruction,
    {
        self.advance()?;
        let dest = self.identifier("a destination variable")?;
        self.expect(Token::Comma, "`,` between operands")?;
        let src = self.operand()?;
        Ok(build(dest, src))
    }

    fn jump<F>(&mut self, build: F) -> Result<Instruction, ParseError>
    where
        F: FnOnce(usize) -> Instruction,
    {
        self.advance()?;
        let value = self.number("a jump target")?;
        let target = Self::non_negative(value, "jump target")?;
        Ok(build(target))
    }

    fn operand(&mut self) -> Result<Operand, ParseError> {
        match &self.current {
            Some(Token::Number(value)) => {
                let value = *value;
                self.advance()?;
                Ok(Operand::Literal(value))
            }
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                self.advance()?;
                if self.current == Some(Token::LBracket) {
                    let index = self.element_index()?;
                    Ok(Operand::Element(name, index))
                } else {
                    Ok(Operand::Variable(name))
                }
            }
            _ => Err(self.unexpected("an operand")),
        }
    }

    fn target(&mut self) -> Result<Target, ParseError> {
        let name = self.identifier("a destination")?;
        if self.current == Some(Token::LBracket) {
            let index = self.element_index()?;
            Ok(Target::Element(name, index))
        } else {
            Ok(Target::Variable(name))
        }
    }

    fn element_index(&mut self) -> Result<usize, ParseError> {
        self.expect(Token::LBracket, "`[` before the array index")?;
        let value = self.number("an array index")?;
        let index = Self::non_negative(value, "array index")?;
        self.expect(Token::RBracket, "`]` after the array index")?;
        Ok(index)
    }
}
