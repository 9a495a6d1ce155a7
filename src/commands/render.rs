//! One-shot mode: renders a single scan file, bypassing the watch loop.

use std::path::PathBuf;

use clap::Args as ClapArgs;
use miette::IntoDiagnostic as _;

use crate::config::{CaptureFormat, Config};
use crate::pipeline::Pipeline;

#[derive(ClapArgs)]
pub struct Args {
    /// Scan file to render
    pub file: PathBuf,

    /// Override the configured capture format
    #[arg(long, value_enum)]
    pub format: Option<CaptureFormat>,

    /// Override the configured output directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Override the configured report template
    #[arg(long)]
    pub template: Option<PathBuf>,
}

pub fn run(args: Args, config: &Config) -> miette::Result<()> {
    let mut config = config.clone();

    if let Some(format) = args.format {
        config.capture.format = format;
    }
    if let Some(output_dir) = args.output_dir {
        config.paths.output_dir = output_dir;
    }
    if let Some(template) = args.template {
        config.paths.template = Some(template);
    }

    let pipeline = Pipeline::new(&config)?;

    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
    let artifact = runtime.block_on(pipeline.render_once(&args.file))?;

    println!("report generated: {}", artifact.display());

    Ok(())
}
