//! One render job per discovered scan file.

use std::path::PathBuf;
use std::time::Duration;

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::CaptureFormat;
use crate::naming;
use crate::render::{self, RenderError, ReportTemplate};
use crate::report::{self, BuildError};

/// Stabilization wait between discovering a file and first reading it, so a
/// writer has a chance to finish. Best-effort only; a slow writer can still
/// lose the race.
pub const DEBOUNCE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Error, Diagnostic)]
pub enum JobError {
    #[error("failed to read scan file")]
    Read(#[from] std::io::Error),

    #[error("failed to write artifact")]
    Write(#[source] std::io::Error),

    #[error("scan file is not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    #[error("render task aborted")]
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Discovered,
    Debouncing,
    Building,
    Rendering,
    Done,
    Failed,
}

/// Everything a job needs besides its input path. Shared by all jobs of a
/// pipeline instance.
pub struct JobContext {
    pub template: ReportTemplate,
    pub output_dir: PathBuf,
    pub format: CaptureFormat,
    pub brand_suffix: String,
}

/// Ephemeral per-file job walking
/// `discovered → debouncing → building → rendering → done | failed`.
pub struct RenderJob {
    path: PathBuf,
    state: JobState,
}

impl RenderJob {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: JobState::Discovered,
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    fn advance(&mut self, state: JobState) {
        debug!(path = %self.path.display(), ?state, "job state");
        self.state = state;
    }

    pub fn mark_failed(&mut self) {
        self.advance(JobState::Failed);
    }

    /// Waits out the stabilization interval before the first read. Only
    /// watch-mode discovery debounces; one-shot invocations read
    /// immediately.
    pub async fn debounce(&mut self) {
        self.advance(JobState::Debouncing);
        tokio::time::sleep(DEBOUNCE_DELAY).await;
    }

    /// Builds the model and renders the artifact, strictly in that order.
    /// Returns the artifact path on success.
    pub async fn run(&mut self, ctx: &JobContext) -> Result<PathBuf, JobError> {
        self.advance(JobState::Building);

        let raw = tokio::fs::read_to_string(&self.path).await?;
        let record: Value = serde_json::from_str(&raw)?;
        let model = report::build(&record)?;
        let markup = ctx.template.render(&model)?;

        let filename = naming::artifact_name(
            model.domain(),
            model.generated_at(),
            &ctx.brand_suffix,
            ctx.format.extension(),
        );
        let destination = ctx.output_dir.join(filename);

        self.advance(JobState::Rendering);

        let format = ctx.format;
        let bytes = tokio::task::spawn_blocking(move || render::render_artifact(&markup, format))
            .await
            .map_err(|_| JobError::Aborted)??;

        tokio::fs::write(&destination, bytes)
            .await
            .map_err(JobError::Write)?;

        self.advance(JobState::Done);
        Ok(destination)
    }
}
