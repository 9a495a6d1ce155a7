use super::*;

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let ctx = TestContext::new();
    ctx.write_file("sitegrade.toml", "# my hand-tuned config\n");

    let result = ctx.run_sitegrade(&["init", "--yes"]);

    assert!(!result.success(), "init should refuse to clobber config");
    assert_stderr_contains(&result, "already exists");
    ctx.assert_file_contains("sitegrade.toml", "# my hand-tuned config");
}

#[test]
fn render_fails_on_missing_input() {
    let ctx = TestContext::new();
    let result = ctx.run_sitegrade(&["render", "no-such-scan.json"]);

    assert!(!result.success(), "render should fail on a missing file");
}

#[test]
fn render_rejects_record_missing_required_fields() {
    let ctx = TestContext::new();
    ctx.write_file(
        "partial.json",
        r#"{ "url": "https://example.com/", "generatedAt": "2025-08-13T10:00:00Z" }"#,
    );

    let result = ctx.run_sitegrade(&["render", "partial.json"]);

    assert!(!result.success());
    assert_stderr_contains(&result, "missing required field");
}

#[test]
fn render_rejects_out_of_range_score() {
    let ctx = TestContext::new();
    ctx.write_file(
        "overscored.json",
        r#"{
            "url": "https://example.com/",
            "generatedAt": "2025-08-13T10:00:00Z",
            "overallScore": 101,
            "overallRating": "Impossible"
        }"#,
    );

    let result = ctx.run_sitegrade(&["render", "overscored.json"]);

    assert!(!result.success());
    assert_stderr_contains(&result, "between 0 and 100");
}

#[test]
fn render_rejects_malformed_json() {
    let ctx = TestContext::new();
    ctx.write_file("garbage.json", "{ this is not json");

    let result = ctx.run_sitegrade(&["render", "garbage.json"]);

    assert!(!result.success());
    assert_stderr_contains(&result, "not valid JSON");
}

#[test]
fn render_fails_on_missing_template_override() {
    let ctx = TestContext::new();
    ctx.write_file(
        "scan.json",
        r#"{
            "url": "https://example.com/",
            "generatedAt": "2025-08-13T10:00:00Z",
            "overallScore": 90,
            "overallRating": "Excellent"
        }"#,
    );

    let result = ctx.run_sitegrade(&["render", "scan.json", "--template", "nope.hbs"]);

    assert!(!result.success());
    assert_stderr_contains(&result, "template");
}

#[test]
fn config_file_overrides_are_honored() {
    let ctx = TestContext::new();
    ctx.write_file(
        "sitegrade.toml",
        "[paths]\nwatch_dir = \"incoming\"\noutput_dir = \"rendered\"\n\n[capture]\nformat = \"pdf\"\nbrand_suffix = \"acme\"\n",
    );

    let config = ctx.load_config();

    assert_eq!(config.paths.watch_dir, std::path::PathBuf::from("incoming"));
    assert_eq!(config.capture.brand_suffix, "acme");
}
