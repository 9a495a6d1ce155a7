//! Drives a headless Chromium session from staged markup to captured
//! artifact bytes. Every job gets its own isolated session.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use url::Url;

use crate::config::CaptureFormat;

use super::RenderError;
use super::readiness::{self, PageProbe, ReadinessSignal};

// A4 geometry in inches, uniform margins, CSS page size preferred.
const PAPER_WIDTH_IN: f64 = 8.27;
const PAPER_HEIGHT_IN: f64 = 11.7;
const PAGE_MARGIN_IN: f64 = 0.5;

pub struct EngineSession {
    tab: Arc<Tab>,

    // Keep the browser process and the staged markup alive for the whole
    // session; both are torn down on drop.
    _browser: Browser,
    _staged: NamedTempFile,
}

impl EngineSession {
    /// Stages markup on disk, launches a fresh headless session and loads
    /// the page, waiting for navigation to settle.
    pub fn launch(markup: &str) -> Result<Self, RenderError> {
        let mut staged = tempfile::Builder::new()
            .prefix("sitegrade-report-")
            .suffix(".html")
            .tempfile()
            .map_err(RenderError::Stage)?;
        staged.write_all(markup.as_bytes()).map_err(RenderError::Stage)?;
        staged.flush().map_err(RenderError::Stage)?;

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| RenderError::Launch(e.to_string()))?;
        let browser = Browser::new(options).map_err(|e| RenderError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let address = Url::from_file_path(staged.path())
            .map_err(|_| RenderError::Navigation("staged markup path is not absolute".into()))?;

        tab.navigate_to(address.as_str())
            .map_err(|e| RenderError::Navigation(e.to_string()))?;
        tab.wait_until_navigated()
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        Ok(Self {
            tab,
            _browser: browser,
            _staged: staged,
        })
    }

    pub fn capture(&self, format: CaptureFormat) -> Result<Vec<u8>, RenderError> {
        match format {
            CaptureFormat::Png => self.capture_png(),
            CaptureFormat::Pdf => self.capture_pdf(),
        }
    }

    /// Full-extent raster: the clip covers the whole document body, not
    /// just the viewport.
    fn capture_png(&self) -> Result<Vec<u8>, RenderError> {
        let body = self
            .tab
            .wait_for_element("body")
            .map_err(|e| RenderError::Capture(e.to_string()))?;
        let clip = body
            .get_box_model()
            .map_err(|e| RenderError::Capture(e.to_string()))?
            .margin_viewport();

        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, Some(clip), true)
            .map_err(|e| RenderError::Capture(e.to_string()))
    }

    fn capture_pdf(&self) -> Result<Vec<u8>, RenderError> {
        let options = PrintToPdfOptions {
            print_background: Some(true),
            prefer_css_page_size: Some(true),
            paper_width: Some(PAPER_WIDTH_IN),
            paper_height: Some(PAPER_HEIGHT_IN),
            margin_top: Some(PAGE_MARGIN_IN),
            margin_bottom: Some(PAGE_MARGIN_IN),
            margin_left: Some(PAGE_MARGIN_IN),
            margin_right: Some(PAGE_MARGIN_IN),
            ..Default::default()
        };

        self.tab
            .print_to_pdf(Some(options))
            .map_err(|e| RenderError::Capture(e.to_string()))
    }
}

impl PageProbe for EngineSession {
    fn element_appears(&self, selector: &str, timeout: Duration) -> bool {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .is_ok()
    }

    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Renders markup into artifact bytes: fresh session, readiness protocol,
/// capture, teardown. Blocking; call from a blocking context.
pub fn render_artifact(markup: &str, format: CaptureFormat) -> Result<Vec<u8>, RenderError> {
    let session = EngineSession::launch(markup)?;

    match readiness::await_content(&session) {
        ReadinessSignal::Primary => debug!("opportunities content detected"),
        ReadinessSignal::Secondary => {
            warn!("opportunities missing, proceeding on warnings content")
        }
        ReadinessSignal::FallbackDelay => {
            warn!("no dynamic content detected, captured after fixed delay")
        }
    }

    session.capture(format)
}
