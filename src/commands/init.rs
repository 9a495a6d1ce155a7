//! Scaffolds a sitegrade project in the current directory.

use std::path::Path;

use clap::Args as ClapArgs;
use inquire::{Confirm, Text};
use miette::IntoDiagnostic as _;

use crate::config::{CONFIG_FILE, CaptureFormat, Config};

// Sample scan included at compile time so `render demo-scan.json` works
// right after init.
const SAMPLE_SCAN: &str = include_str!("../../templates/samples/demo-scan.json");
const SAMPLE_SCAN_FILE: &str = "demo-scan.json";

#[derive(ClapArgs)]
pub struct Args {
    /// Accept all defaults without prompting
    #[arg(long)]
    pub yes: bool,
}

pub fn run(args: Args) -> miette::Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        miette::bail!("{CONFIG_FILE} already exists in this directory");
    }

    let mut config = Config::default();

    if !args.yes {
        let watch_dir = Text::new("Directory to watch for scan files?")
            .with_default("reports-raw")
            .prompt()
            .into_diagnostic()?;
        let output_dir = Text::new("Directory for rendered reports?")
            .with_default("reports-final")
            .prompt()
            .into_diagnostic()?;
        let pdf = Confirm::new("Capture paginated PDF instead of full-page PNG?")
            .with_default(false)
            .prompt()
            .into_diagnostic()?;

        config.paths.watch_dir = watch_dir.into();
        config.paths.output_dir = output_dir.into();
        if pdf {
            config.capture.format = CaptureFormat::Pdf;
        }
    }

    config.save(Path::new(CONFIG_FILE))?;

    std::fs::create_dir_all(&config.paths.watch_dir).into_diagnostic()?;
    std::fs::create_dir_all(&config.paths.output_dir).into_diagnostic()?;
    std::fs::write(SAMPLE_SCAN_FILE, SAMPLE_SCAN).into_diagnostic()?;

    println!("initialized sitegrade project");
    println!(
        "drop scan files into `{}`, or try `sitegrade render {SAMPLE_SCAN_FILE}`",
        config.paths.watch_dir.display()
    );

    Ok(())
}
