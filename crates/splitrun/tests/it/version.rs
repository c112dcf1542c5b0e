use crate::common::TestContext;

#[test]
fn test_version() {
    let context = TestContext::new();

    let output = context
        .splitrun()
        .arg("version")
        .output()
        .expect("run splitrun");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("splitrun {}\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_missing_subcommand() {
    let context = TestContext::new();

    let output = context.splitrun().output().expect("run splitrun");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_suite_is_required() {
    let context = TestContext::new();

    let output = context.command().output().expect("run splitrun");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--suite <PATH>"), "unexpected stderr: {stderr}");
}
