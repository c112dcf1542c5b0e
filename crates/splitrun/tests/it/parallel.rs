use insta_cmd::assert_cmd_snapshot;

use crate::common::TestContext;

#[test]
fn test_parallel_workers_are_rejected() {
    let context = TestContext::with_abc_suite();

    assert_cmd_snapshot!(context.node_command("2", "0").args(["--parallel", "2", "--", "echo"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    WARN `--parallel` is not supported when splitting tests across CI nodes. Increase the number of nodes instead.
    splitrun failed
      Cause: Unsupported parameter passed `--parallel 2` (2 workers): increase `CI_NODE_TOTAL` to run more nodes instead of in-process workers
    ");
}

#[test]
fn test_parallel_is_rejected_before_the_suite_is_read() {
    let context = TestContext::new();

    assert_cmd_snapshot!(context.command().args(["--suite", "missing.txt", "--parallel", "4"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    WARN `--parallel` is not supported when splitting tests across CI nodes. Increase the number of nodes instead.
    splitrun failed
      Cause: Unsupported parameter passed `--parallel 4` (4 workers): increase `CI_NODE_TOTAL` to run more nodes instead of in-process workers
    ");
}

#[test]
fn test_parallel_is_rejected_in_dry_run() {
    let context = TestContext::with_abc_suite();

    let output = context
        .node_command("2", "0")
        .args(["--dry-run", "--parallel", "3"])
        .output()
        .expect("run splitrun");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_parallel_auto_uses_available_cpus() {
    let context = TestContext::with_abc_suite();

    assert_cmd_snapshot!(
        context
            .node_command("2", "0")
            .args(["--dry-run", "--parallel"])
            .env("SPLITRUN_MAX_PARALLELISM", "6"),
        @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    WARN `--parallel` is not supported when splitting tests across CI nodes. Increase the number of nodes instead.
    splitrun failed
      Cause: Unsupported parameter passed `--parallel auto` (6 workers): increase `CI_NODE_TOTAL` to run more nodes instead of in-process workers
    "
    );
}

#[test]
fn test_single_parallel_worker_is_allowed() {
    let context = TestContext::with_abc_suite();

    assert_cmd_snapshot!(context.node_command("2", "1").args(["--dry-run", "--parallel", "1"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    <test> app.tests.B.test_one

    1 tests selected on node 1 of 2

    ----- stderr -----
    ");
}

#[test]
fn test_parallel_auto_on_a_single_cpu_is_allowed() {
    let context = TestContext::with_abc_suite();

    let output = context
        .node_command("2", "1")
        .args(["--dry-run", "--parallel", "auto"])
        .env("SPLITRUN_MAX_PARALLELISM", "1")
        .output()
        .expect("run splitrun");

    assert!(output.status.success());
}
