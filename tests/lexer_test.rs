use logos::Logos;
use oxasm::token::Token;

#[test]
fn test_lexer() {
    let input = r#"
        Var x: byte, y: Array[10];
        mov x, 5;
        add x, y[0];
        print(x);
        halt;
    "#;

    let lexer = Token::lexer(input);
    let tokens: Vec<Token> = lexer.filter_map(Result::ok).collect();

    let expected_tokens = vec![
        Token::Var,
        Token::Identifier("x".to_string()),
        Token::Colon,
        Token::Byte,
        Token::Comma,
        Token::Identifier("y".to_string()),
        Token::Colon,
        Token::Array,
        Token::LBracket,
        Token::Number(10),
        Token::RBracket,
        Token::Semicolon,
        Token::Mov,
        Token::Identifier("x".to_string()),
        Token::Comma,
        Token::Number(5),
        Token::Semicolon,
        Token::Add,
        Token::Identifier("x".to_string()),
        Token::Comma,
        Token::Identifier("y".to_string()),
        Token::LBracket,
        Token::Number(0),
        Token::RBracket,
        Token::Semicolon,
        Token::Print,
        Token::LParen,
        Token::Identifier("x".to_string()),
        Token::RParen,
        Token::Semicolon,
        Token::Halt,
        Token::Semicolon,
    ];

    assert_eq!(tokens, expected_tokens);
}

#[test]
fn test_lexer_signed_numbers() {
    let tokens: Vec<Token> = Token::lexer("mov x, -5;").filter_map(Result::ok).collect();
    assert_eq!(
        tokens,
        vec![
            Token::Mov,
            Token::Identifier("x".to_string()),
            Token::Comma,
            Token::Number(-5),
            Token::Semicolon,
        ]
    );
}

#[test]
fn test_lexer_keywords_before_identifiers() {
    let tokens: Vec<Token> = Token::lexer("push pop isFull movx")
        .filter_map(Result::ok)
        .collect();
    assert_eq!(
        tokens,
        vec![
            Token::Push,
            Token::Pop,
            Token::IsFull,
            Token::Identifier("movx".to_string()),
        ]
    );
}

#[test]
fn test_lexer_skips_comments() {
    let tokens: Vec<Token> = Token::lexer("halt; # all done\nisFull;")
        .filter_map(Result::ok)
        .collect();
    assert_eq!(
        tokens,
        vec![Token::Halt, Token::Semicolon, Token::IsFull, Token::Semicolon]
    );
}

#[test]
fn test_lexer_rejects_unknown_input() {
    assert!(Token::lexer("mov x, @5;").any(|token| token.is_err()));
}
