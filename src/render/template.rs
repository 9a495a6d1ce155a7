//! The handlebars rendering target consuming the report model.

use std::path::Path;

use handlebars::{
    Context, Handlebars, Helper, Output, RenderContext, RenderErrorReason, handlebars_helper,
};

use crate::report::ReportModel;

use super::RenderError;

pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/report.hbs");

const TEMPLATE_NAME: &str = "report";

pub struct ReportTemplate {
    registry: Handlebars<'static>,
}

impl ReportTemplate {
    /// The branded template compiled into the binary.
    pub fn embedded() -> Result<Self, RenderError> {
        Self::from_source(DEFAULT_TEMPLATE)
    }

    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let source = std::fs::read_to_string(path).map_err(RenderError::TemplateFile)?;
        Self::from_source(&source)
    }

    fn from_source(source: &str) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();

        registry
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(Box::new)?;
        register_report_helpers(&mut registry);

        Ok(Self { registry })
    }

    pub fn render(&self, model: &ReportModel) -> Result<String, RenderError> {
        Ok(self.registry.render(TEMPLATE_NAME, model.as_doc())?)
    }
}

fn make_helper<F>(name: &'static str, f: F) -> impl handlebars::HelperDef + Send + Sync + 'static
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    move |h: &Helper, _: &Handlebars, _: &Context, _: &mut RenderContext, out: &mut dyn Output| {
        let param = h
            .param(0)
            .ok_or_else(|| RenderErrorReason::ParamNotFoundForIndex(name, 0))?;
        let input = param
            .value()
            .as_str()
            .ok_or_else(|| RenderErrorReason::InvalidParamType("Expected a string"))?;
        out.write(&f(input))?;
        Ok(())
    }
}

fn rating_slug(prefix: &str, rating: &str) -> String {
    format!("{prefix}-{}", rating.to_lowercase().replace(' ', "-"))
}

fn register_report_helpers(registry: &mut Handlebars<'_>) {
    let helpers: &[(&str, fn(&str) -> String)] = &[
        ("ratingClass", |s| rating_slug("rating", s)),
        ("borderClass", |s| rating_slug("border", s)),
    ];

    for (name, func) in helpers {
        registry.register_helper(name, Box::new(make_helper(name, func)));
    }

    // Serializes a model subtree into an embedded JSON island the page
    // script reads to populate the dynamic regions.
    handlebars_helper!(json: |value: Json| value.to_string());
    registry.register_helper("json", Box::new(json));
}
