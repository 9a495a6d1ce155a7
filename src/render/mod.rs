//! Markup rendering and artifact capture.

pub mod engine;
pub mod readiness;
pub mod template;

use miette::Diagnostic;
use thiserror::Error;

pub use engine::render_artifact;
pub use template::ReportTemplate;

#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("invalid report template")]
    TemplateSource(#[from] Box<handlebars::TemplateError>),

    #[error("failed to render report template")]
    Template(#[from] handlebars::RenderError),

    #[error("failed to read template file")]
    TemplateFile(#[source] std::io::Error),

    #[error("failed to stage report markup")]
    Stage(#[source] std::io::Error),

    #[error("failed to launch render engine: {0}")]
    Launch(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("capture failed: {0}")]
    Capture(String),
}
