//! Watch mode: renders every scan file that appears in the watch directory.

use std::path::PathBuf;

use clap::Args as ClapArgs;
use miette::IntoDiagnostic as _;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::{CaptureFormat, Config};
use crate::pipeline::Pipeline;

#[derive(ClapArgs)]
pub struct Args {
    /// Override the configured watch directory
    #[arg(long)]
    pub watch_dir: Option<PathBuf>,

    /// Override the configured output directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Override the configured report template
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Override the configured capture format
    #[arg(long, value_enum)]
    pub format: Option<CaptureFormat>,
}

pub fn run(args: Args, config: &Config) -> miette::Result<()> {
    let mut config = config.clone();

    if let Some(watch_dir) = args.watch_dir {
        config.paths.watch_dir = watch_dir;
    }
    if let Some(output_dir) = args.output_dir {
        config.paths.output_dir = output_dir;
    }
    if let Some(template) = args.template {
        config.paths.template = Some(template);
    }
    if let Some(format) = args.format {
        config.capture.format = format;
    }

    let pipeline = Pipeline::new(&config)?;

    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
    runtime.block_on(async {
        let cancel = CancellationToken::new();

        let interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping watch loop");
                interrupt.cancel();
            }
        });

        pipeline.run(cancel).await
    })
}
