use insta_cmd::assert_cmd_snapshot;

use crate::common::TestContext;

#[test]
fn test_configuration_file_takes_precedence_over_environment() {
    let context = TestContext::with_abc_suite();
    context.write_file(
        "splitrun.toml",
        r"
[partition]
ci-node-total = 2
ci-node-index = 1
",
    );

    assert_cmd_snapshot!(context.node_command("4", "0").arg("--dry-run"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    <test> app.tests.B.test_one

    1 tests selected on node 1 of 2

    ----- stderr -----
    ");
}

#[test]
fn test_configuration_values_may_be_strings() {
    let context = TestContext::with_abc_suite();
    context.write_file(
        "splitrun.toml",
        r#"
[partition]
ci-node-total = "2"
"#,
    );

    assert_cmd_snapshot!(context.node_command("9", "0").arg("--dry-run"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    <test> app.tests.A.test_one
    <test> app.tests.A.test_two
    <test> app.tests.C.test_one

    3 tests selected on node 0 of 2

    ----- stderr -----
    ");
}

#[test]
fn test_pyproject_configuration() {
    let context = TestContext::with_abc_suite();
    context.write_file(
        "pyproject.toml",
        r#"
[project]
name = "app"

[tool.splitrun.partition]
ci-node-total = 3
ci-node-index = 2
"#,
    );

    assert_cmd_snapshot!(context.command().args(["--suite", "tests.txt", "--dry-run"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    <test> app.tests.C.test_one

    1 tests selected on node 2 of 3

    ----- stderr -----
    ");
}

#[test]
fn test_explicit_config_file() {
    let context = TestContext::with_abc_suite();
    context.write_file("splitrun.toml", "[partition]\nci-node-total = 1\n");
    context.write_file("ci/splitrun.toml", "[partition]\nci-node-total = 2\nci-node-index = 1\n");

    assert_cmd_snapshot!(
        context
            .command()
            .args(["--suite", "tests.txt", "--dry-run", "--config-file", "ci/splitrun.toml"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    <test> app.tests.B.test_one

    1 tests selected on node 1 of 2

    ----- stderr -----
    "
    );
}

#[test]
fn test_config_file_from_environment() {
    let context = TestContext::with_abc_suite();
    context.write_file("ci/splitrun.toml", "[partition]\nci-node-total = 2\nci-node-index = 1\n");

    let output = context
        .command()
        .args(["--suite", "tests.txt", "--dry-run"])
        .env("SPLITRUN_CONFIG_FILE", context.root().join("ci/splitrun.toml"))
        .output()
        .expect("run splitrun");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "<test> app.tests.B.test_one\n\n1 tests selected on node 1 of 2\n"
    );
}

#[cfg(unix)]
#[test]
fn test_missing_config_file() {
    let context = TestContext::with_abc_suite();

    assert_cmd_snapshot!(
        context
            .command()
            .args(["--suite", "tests.txt", "--config-file", "missing.toml"]),
        @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    splitrun failed
      Cause: Failed to read `<temp_dir>/missing.toml`
      Cause: No such file or directory (os error 2)
    "
    );
}

#[test]
fn test_unknown_configuration_key() {
    let context = TestContext::with_abc_suite();
    context.write_file("splitrun.toml", "[partition]\nnodes = 2\n");

    let output = context
        .command()
        .args(["--suite", "tests.txt", "--dry-run"])
        .output()
        .expect("run splitrun");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Cause: Failed to parse `") && stderr.contains("splitrun.toml`"),
        "unexpected stderr: {stderr}"
    );
    assert!(stderr.contains("nodes"), "unexpected stderr: {stderr}");
}

#[test]
fn test_invalid_node_total_in_environment() {
    let context = TestContext::with_abc_suite();

    assert_cmd_snapshot!(context.node_command("abc", "0").arg("--dry-run"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    splitrun failed
      Cause: Invalid `CI_NODE_TOTAL` value `abc` in the environment: expected an integer
      Cause: invalid digit found in string
    ");
}

#[test]
fn test_negative_node_index_in_configuration() {
    let context = TestContext::with_abc_suite();
    context.write_file("splitrun.toml", "[partition]\nci-node-index = -1\n");

    assert_cmd_snapshot!(context.node_command("2", "0").arg("--dry-run"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    0 tests selected on node -1 of 2

    ----- stderr -----
    ");
}

#[test]
fn test_negative_node_total() {
    let context = TestContext::with_abc_suite();

    assert_cmd_snapshot!(context.node_command("-2", "0").arg("--dry-run"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    splitrun failed
      Cause: Cannot split tests across -2 nodes: `CI_NODE_TOTAL` must be at least 1
    ");
}

#[test]
fn test_zero_node_total() {
    let context = TestContext::with_abc_suite();

    assert_cmd_snapshot!(context.node_command("0", "0").arg("--dry-run"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    splitrun failed
      Cause: Cannot split tests across zero nodes: `CI_NODE_TOTAL` must be at least 1 (division by zero)
    ");
}
