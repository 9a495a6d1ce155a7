use super::*;

#[test]
fn help_runs_without_error() {
    let ctx = TestContext::new();
    let result = ctx.run_sitegrade(&["--help"]);

    assert_success(&result);
    assert_output_contains(&result, "watch");
    assert_output_contains(&result, "render");
}

#[test]
fn version_runs_without_error() {
    let ctx = TestContext::new();
    let result = ctx.run_sitegrade(&["--version"]);

    assert_success(&result);
    assert_output_contains(&result, "sitegrade");
}

#[test]
fn init_runs_without_error() {
    let ctx = TestContext::new();
    let result = ctx.run_sitegrade(&["init", "--yes"]);

    assert_success(&result);
    ctx.assert_file_exists("sitegrade.toml");
}

#[test]
fn render_help_lists_overrides() {
    let ctx = TestContext::new();
    let result = ctx.run_sitegrade(&["render", "--help"]);

    assert_success(&result);
    assert_output_contains(&result, "--format");
    assert_output_contains(&result, "--output-dir");
    assert_output_contains(&result, "--template");
}
