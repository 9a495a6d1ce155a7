//! Configuration for the report pipeline, loaded from `sitegrade.toml`.

use miette::{Context as _, IntoDiagnostic as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "sitegrade.toml";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub capture: CaptureConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PathsConfig {
    /// Directory observed for incoming scan files.
    pub watch_dir: PathBuf,

    /// Directory receiving rendered artifacts.
    pub output_dir: PathBuf,

    /// Report template override; the embedded template is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            watch_dir: "reports-raw".into(),
            output_dir: "reports-final".into(),
            template: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CaptureConfig {
    pub format: CaptureFormat,

    /// Trailing component of every artifact filename.
    pub brand_suffix: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            format: CaptureFormat::Png,
            brand_suffix: "sitegrade".into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    #[default]
    Png,
    Pdf,
}

impl CaptureFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            CaptureFormat::Png => "png",
            CaptureFormat::Pdf => "pdf",
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&contents).into_diagnostic()?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> miette::Result<()> {
        let contents = toml::to_string_pretty(self).into_diagnostic()?;
        std::fs::write(path, contents)
            .into_diagnostic()
            .with_context(|| format!("saving {}", path.display()))?;

        Ok(())
    }

    /// Loads `sitegrade.toml` from the current directory, falling back to
    /// built-in defaults when the file does not exist.
    pub fn load_or_default() -> miette::Result<Self> {
        let current_dir = std::env::current_dir().into_diagnostic()?;
        let config_path = current_dir.join(CONFIG_FILE);

        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }
}
