use std::process::Command;

#[test]
fn test_run_demo_program() {
    let output = Command::new("target/debug/oxasm")
        .arg("demos/demo.oxa")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "8\n42\n");
}

#[test]
fn test_run_countdown_program() {
    let output = Command::new("target/debug/oxasm")
        .arg("demos/countdown.oxa")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "3\n2\n1\n");
}

#[test]
fn test_run_stack_program() {
    let output = Command::new("target/debug/oxasm")
        .arg("demos/stack.oxa")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "9\n7\n0\n");
}

#[test]
fn test_stack_overflow_is_fatal() {
    let output = Command::new("target/debug/oxasm")
        .arg("demos/overflow.oxa")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Stack overflow\n");
}

#[test]
fn test_stack_underflow_is_fatal() {
    let output = Command::new("target/debug/oxasm")
        .arg("demos/underflow.oxa")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Stack underflow\n");
}

#[test]
fn test_usage_error_exit_code() {
    let output = Command::new("target/debug/oxasm")
        .args(["one.oxa", "two.oxa"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: oxasm"));
}
