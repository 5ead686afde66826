use oxasm::cli::{emit_c_file, parse_args, run_file, run_main_with_args};
use std::env;
use std::fs;
use std::path::PathBuf;

const DEMO: &str = "Var x: byte, y: Array[10];\nmov x, 5;\nadd x, 3;\nprint(x);\nmov y[0], 42;\nprint(y[0]);\nhalt;\n";

fn temp_path(suffix: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("oxasm_test_{}_{}", std::process::id(), suffix));
    path
}

#[test]
fn parse_args_reports_usage_error_for_no_input() {
    let args: Vec<String> = vec![];
    assert_eq!(parse_args(&args).unwrap_err(), 64);
}

#[test]
fn parse_args_reports_usage_error_for_extra_input() {
    let args = vec![String::from("one.oxa"), String::from("two.oxa")];
    assert_eq!(parse_args(&args).unwrap_err(), 64);
}

#[test]
fn parse_args_reports_usage_error_for_unknown_flag() {
    let args = vec![String::from("--frobnicate"), String::from("a.oxa")];
    assert_eq!(parse_args(&args).unwrap_err(), 64);
}

#[test]
fn parse_args_reports_usage_error_for_dangling_output_flag() {
    let args = vec![String::from("a.oxa"), String::from("-o")];
    assert_eq!(parse_args(&args).unwrap_err(), 64);
}

#[test]
fn parse_args_accepts_all_options() {
    let args = vec![
        String::from("-c"),
        String::from("-o"),
        String::from("demo.c"),
        String::from("--debug"),
        String::from("demo.oxa"),
    ];
    let options = parse_args(&args).unwrap();
    assert!(options.emit_c);
    assert!(options.debug);
    assert_eq!(options.output, "demo.c");
    assert_eq!(options.input, "demo.oxa");
}

#[test]
fn parse_args_defaults_output_file() {
    let args = vec![String::from("-c"), String::from("demo.oxa")];
    let options = parse_args(&args).unwrap();
    assert_eq!(options.output, "output.c");
    assert!(!options.debug);
}

#[test]
fn run_file_executes_valid_script() {
    let path = temp_path("ok.oxa");
    fs::write(&path, DEMO).unwrap();

    assert!(run_file(path.to_str().unwrap()).is_ok());

    let _ = fs::remove_file(&path);
}

#[test]
fn run_file_reports_missing_file() {
    let path = temp_path("missing.oxa");
    assert_eq!(run_file(path.to_str().unwrap()).unwrap_err(), 74);
}

#[test]
fn run_file_reports_parse_errors() {
    let path = temp_path("bad_syntax.oxa");
    fs::write(&path, "mov x, 5;\n").unwrap();

    assert_eq!(run_file(path.to_str().unwrap()).unwrap_err(), 65);

    let _ = fs::remove_file(&path);
}

#[test]
fn run_file_reports_semantic_errors() {
    let path = temp_path("bad_semantics.oxa");
    fs::write(&path, "Var x: byte;\nmov z, 200;\nhalt;\n").unwrap();

    assert_eq!(run_file(path.to_str().unwrap()).unwrap_err(), 65);

    let _ = fs::remove_file(&path);
}

#[test]
fn run_file_reports_fatal_stack_condition() {
    let path = temp_path("underflow.oxa");
    fs::write(&path, "Var a: byte;\npop a;\n").unwrap();

    assert_eq!(run_file(path.to_str().unwrap()).unwrap_err(), 1);

    let _ = fs::remove_file(&path);
}

#[test]
fn emit_c_file_writes_translation() {
    let input = temp_path("emit.oxa");
    let output = temp_path("emit.c");
    fs::write(&input, DEMO).unwrap();

    assert!(emit_c_file(input.to_str().unwrap(), output.to_str().unwrap()).is_ok());

    let c_code = fs::read_to_string(&output).unwrap();
    assert!(c_code.contains("#define STACK_SIZE 500"));
    assert!(c_code.contains("int main(void) {"));

    let _ = fs::remove_file(&input);
    let _ = fs::remove_file(&output);
}

#[test]
fn run_main_with_args_compiles_with_flags() {
    let input = temp_path("main_emit.oxa");
    let output = temp_path("main_emit.c");
    fs::write(&input, DEMO).unwrap();

    let args = vec![
        String::from("-c"),
        String::from("-o"),
        output.to_str().unwrap().to_string(),
        input.to_str().unwrap().to_string(),
    ];
    assert!(run_main_with_args(&args).is_ok());
    assert!(output.exists());

    let _ = fs::remove_file(&input);
    let _ = fs::remove_file(&output);
}
