use super::*;
use serde_json::json;
use std::path::PathBuf;

use sitegrade::config::CaptureFormat;
use sitegrade::render::ReportTemplate;
use sitegrade::{naming, report};

#[test]
fn init_creates_valid_project_structure() {
    let ctx = TestContext::new();
    let result = ctx.run_sitegrade(&["init", "--yes"]);

    assert_success(&result);

    // Verify all expected files exist
    ctx.assert_file_exists("sitegrade.toml");
    ctx.assert_file_exists("reports-raw");
    ctx.assert_file_exists("reports-final");
    ctx.assert_file_exists("demo-scan.json");

    // Verify sitegrade.toml using struct deserialization
    let config = ctx.load_config();
    assert_eq!(config.paths.watch_dir, PathBuf::from("reports-raw"));
    assert_eq!(config.paths.output_dir, PathBuf::from("reports-final"));
    assert_eq!(config.capture.format, CaptureFormat::Png);
    assert_eq!(config.capture.brand_suffix, "sitegrade");
}

#[test]
fn scaffolded_sample_passes_validation_and_renders() {
    let ctx = TestContext::new();
    assert_success(&ctx.run_sitegrade(&["init", "--yes"]));

    let raw: serde_json::Value = serde_json::from_str(&ctx.read_file("demo-scan.json"))
        .expect("sample scan should be valid JSON");
    let model = report::build(&raw).expect("sample scan should pass validation");

    assert_eq!(model.domain(), "demo-website.com");
    assert_eq!(model.as_doc()["overallGrade"], "B-");

    let markup = ReportTemplate::embedded()
        .unwrap()
        .render(&model)
        .expect("embedded template should render the sample");

    assert!(markup.contains(r#"id="opportunities-list""#));
    assert!(markup.contains(r#"id="warnings-list""#));
    assert!(markup.contains("demo-website.com"));
}

// The end-to-end scenario short of the browser capture: a valid record maps
// to exactly the expected artifact name.
#[test]
fn scan_record_maps_to_expected_artifact_name() {
    let record = json!({
        "url": "https://test-site.com/",
        "generatedAt": "2025-08-13T10:00:00Z",
        "overallScore": 78,
        "overallRating": "Good",
        "modules": {
            "ui": { "summary": { "score": 85, "rating": "Good" } }
        }
    });

    let model = report::build(&record).unwrap();
    let name = naming::artifact_name(
        model.domain(),
        model.generated_at(),
        "sitegrade",
        CaptureFormat::Png.extension(),
    );

    assert_eq!(name, "test-site-com_2025-08-13_sitegrade.png");
}
