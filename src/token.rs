use logos::Logos;

/// Defines the set of recognizable tokens in the oxasm language.
/// The `#[derive(Logos)]` macro from the `logos` crate generates the lexer implementation.
#[derive(Logos, Debug, Clone, PartialEq, Default)]
#[logos(skip r"([ \t\r\n\f]+|#[^\n]*)")] // Ignore whitespace and # line comments
pub enum Token {
    // Literals. An optional sign is part of the number itself; the grammar
    // has no operator expressions.
    #[regex(r"[+-]?[0-9]+", |lex| lex.slice().parse::<i32>().ok())]
    Number(i32),

    // Keywords. Logos processes variants in order, so keywords must come
    // before the general Identifier regex.
    #[token("Var")]
    Var,

    #[token("byte")]
    Byte,

    #[token("Array")]
    Array,

    #[token("mov")]
    Mov,

    #[token("add")]
    Add,

    #[token("sub")]
    Sub,

    #[token("mult")]
    Mult,

    #[token("div")]
    Div,

    #[token("and")]
    And,

    #[token("or")]
    Or,

    #[token("not")]
    Not,

    #[token("jmp")]
    Jmp,

    #[token("jz")]
    Jz,

    #[token("js")]
    Js,

    #[token("jo")]
    Jo,

    #[token("input")]
    Input,

    #[token("print")]
    Print,

    #[token("halt")]
    Halt,

    #[token("push")]
    Push,

    #[token("pop")]
    Pop,

    #[token("isFull")]
    IsFull,

    #[token("call")]
    Call,

    #[regex("[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Punctuation
    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[default]
    Unknown,
}
