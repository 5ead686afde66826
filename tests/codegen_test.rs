use oxasm::codegen;
use oxasm::parser::Parser;

// Complete translation of the demo program, pinned line for line. The
// runtime preamble (flag globals, bounded stack, update_flags with its
// asymmetric overflow window) is part of the contract.
#[test]
fn test_generate_demo_program() {
    let program = Parser::parse(
        r#"
        Var x: byte, y: Array[10];
        mov x, 5;
        add x, 3;
        print(x);
        mov y[0], 42;
        print(y[0]);
        halt;
        "#,
    )
    .unwrap();

    let expected = r#"#include <stdio.h>
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

int main(void) {
    int8_t x = 0;
    int8_t y[10] = {0};

    x = 5;
    x += 3;
    update_flags(x);
    printf("%d\n", x);
    y[0] = 42;
    printf("%d\n", y[0]);
    exit(0);

    return 0;
}
"#;

    assert_eq!(codegen::generate(&program), expected);
}

#[test]
fn test_generate_labels_for_jump_targets() {
    let program = Parser::parse(
        r#"
        Var n: byte;
        mov n, 3;
        print(n);
        sub n, 1;
        jz 5;
        jmp 1;
        halt;
        "#,
    )
    .unwrap();

    let c_code = codegen::generate(&program);

    assert!(c_code.contains("label_1:"));
    assert!(c_code.contains("label_5:"));
    assert!(c_code.contains("    if (ZF) goto label_5;"));
    assert!(c_code.contains("    goto label_1;"));
    // Only jump targets get labels.
    assert!(!c_code.contains("label_0:"));
}

#[test]
fn test_generate_stack_and_io_instructions() {
    let program = Parser::parse(
        r#"
        Var a: byte;
        input(a);
        push a;
        pop a;
        isFull;
        halt;
        "#,
    )
    .unwrap();

    let c_code = codegen::generate(&program);

    assert!(c_code.contains("    printf(\"Input value for a: \");"));
    assert!(c_code.contains("    scanf(\"%hhd\", &a);"));
    assert!(c_code.contains("    push(a);"));
    assert!(c_code.contains("    a = pop();"));
    assert!(c_code.contains("    printf(\"%d\\n\", stack_pointer >= STACK_SIZE);"));
}

#[test]
fn test_generate_conditional_jumps() {
    let program = Parser::parse("Var a: byte;\njs 0;\njo 0;\nhalt;").unwrap();
    let c_code = codegen::generate(&program);
    assert!(c_code.contains("label_0:"));
    assert!(c_code.contains("    if (SF) goto label_0;"));
    assert!(c_code.contains("    if (OF) goto label_0;"));
}

#[test]
fn test_generate_call_emits_nothing_but_keeps_numbering() {
    let program = Parser::parse(
        r#"
        Var a: byte;
        call helper;
        jmp 2;
        halt;
        "#,
    )
    .unwrap();
    let c_code = codegen::generate(&program);
    assert!(!c_code.contains("helper"));
    // halt is instruction 2 even though call emitted no statement.
    assert!(c_code.contains("label_2:\n    exit(0);"));
}
