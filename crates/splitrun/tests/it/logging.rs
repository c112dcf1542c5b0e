use insta_cmd::assert_cmd_snapshot;

use crate::common::TestContext;

const SELECTED_CLASSES: &str =
    r#"3 tests will be run on this node from the following classes: ["app.tests.A", "app.tests.C"]"#;

#[test]
fn test_log_directives_enable_info_without_verbose() {
    let context = TestContext::with_abc_suite();

    let output = context
        .node_command("2", "0")
        .arg("--dry-run")
        .env("SPLITRUN_LOG", "splitrun_runner=info")
        .output()
        .expect("run splitrun");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(&format!("INFO {SELECTED_CLASSES}")),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_log_directives_take_precedence_over_verbose() {
    let context = TestContext::with_abc_suite();

    let output = context
        .node_command("2", "0")
        .args(["--dry-run", "-v"])
        .env("SPLITRUN_LOG", "warn")
        .output()
        .expect("run splitrun");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains(SELECTED_CLASSES), "unexpected stderr: {stderr}");
}

#[test]
fn test_invalid_log_directives() {
    let context = TestContext::with_abc_suite();

    let output = context
        .node_command("2", "0")
        .arg("--dry-run")
        .env("SPLITRUN_LOG", "splitrun=loud")
        .output()
        .expect("run splitrun");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Cause: Invalid `SPLITRUN_LOG` value `splitrun=loud`"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_extra_verbose_adds_timestamp_and_target() {
    let context = TestContext::with_abc_suite();

    let mut settings = insta::Settings::clone_current();
    settings.add_filter(r"\d{2}:\d{2}:\d{2}\.\d{3}", "[TIME]");
    let _scope = settings.bind_to_scope();

    let output = context
        .node_command("2", "1")
        .args(["--dry-run", "-vv"])
        .output()
        .expect("run splitrun");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr
        .lines()
        .find(|line| line.contains("tests will be run on this node"))
        .expect("selected classes are logged");

    insta::assert_snapshot!(line, @r#"[TIME] INFO splitrun_runner::partition: 1 tests will be run on this node from the following classes: ["app.tests.B"]"#);
}

#[test]
fn test_quiet_keeps_warnings_hidden() {
    let context = TestContext::with_abc_suite();

    assert_cmd_snapshot!(context.node_command("2", "1").args(["--dry-run", "-q"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    <test> app.tests.B.test_one

    1 tests selected on node 1 of 2

    ----- stderr -----
    ");
}
