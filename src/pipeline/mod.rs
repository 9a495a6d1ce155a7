//! Ingestion pipeline: observes the watch directory, deduplicates
//! discoveries, and drives each scan file through build and render.

pub mod job;
pub mod watcher;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use miette::IntoDiagnostic as _;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::render::ReportTemplate;

pub use job::{DEBOUNCE_DELAY, JobContext, JobError, JobState, RenderJob};

#[derive(Clone)]
pub struct Pipeline {
    watch_dir: PathBuf,
    ctx: Arc<JobContext>,

    // Paths claimed by a job or already done. Claiming is a check-then-insert
    // under this lock, so a path is only ever owned by one job at a time.
    seen: Arc<Mutex<HashSet<PathBuf>>>,
}

impl Pipeline {
    pub fn new(config: &Config) -> miette::Result<Self> {
        let template = match &config.paths.template {
            Some(path) => ReportTemplate::from_file(path)?,
            None => ReportTemplate::embedded()?,
        };

        std::fs::create_dir_all(&config.paths.output_dir).into_diagnostic()?;

        Ok(Self {
            watch_dir: config.paths.watch_dir.clone(),
            ctx: Arc::new(JobContext {
                template,
                output_dir: config.paths.output_dir.clone(),
                format: config.capture.format,
                brand_suffix: config.capture.brand_suffix.clone(),
            }),
            seen: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    /// Claims a path for processing. Returns false when the path is already
    /// in flight or done, in which case no new job may start.
    pub fn claim(&self, path: &Path) -> bool {
        let mut seen = self.seen.lock().expect("seen-set lock poisoned");

        if seen.contains(path) {
            return false;
        }

        seen.insert(path.to_path_buf());
        true
    }

    /// Releases a failed path so a future filesystem event may claim it
    /// again. Successful paths are never released.
    pub fn release(&self, path: &Path) {
        let mut seen = self.seen.lock().expect("seen-set lock poisoned");
        seen.remove(path);
    }

    /// Runs one claimed job to completion, resolving its outcome at the job
    /// boundary: failures are logged and dropped, never propagated into the
    /// watch loop.
    pub async fn process(&self, path: PathBuf) {
        let mut job = RenderJob::new(path.clone());
        job.debounce().await;

        match job.run(&self.ctx).await {
            Ok(artifact) => {
                info!(
                    path = %path.display(),
                    artifact = %artifact.display(),
                    "report generated"
                );
            }
            Err(error) => {
                job.mark_failed();
                warn!(path = %path.display(), %error, "report job failed");
                self.release(&path);
            }
        }
    }

    /// One-shot mode: renders a single scan file immediately, bypassing the
    /// watch loop, debounce, and the seen-set.
    pub async fn render_once(&self, path: &Path) -> miette::Result<PathBuf> {
        let mut job = RenderJob::new(path.to_path_buf());
        let artifact = job.run(&self.ctx).await?;

        Ok(artifact)
    }

    /// Watch loop: dispatches a concurrent job for every qualifying event
    /// until cancelled, then lets in-flight jobs finish naturally.
    pub async fn run(&self, cancel: CancellationToken) -> miette::Result<()> {
        std::fs::create_dir_all(&self.watch_dir).into_diagnostic()?;

        let (_watcher, mut events) = watcher::subscribe(&self.watch_dir)?;
        info!(dir = %self.watch_dir.display(), "watching for scan files");

        let mut jobs = JoinSet::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                maybe_event = events.recv() => {
                    let Some(event) = maybe_event else { break };

                    for path in watcher::qualifying_paths(&event) {
                        if !self.claim(&path) {
                            continue;
                        }

                        let pipeline = self.clone();
                        jobs.spawn(async move { pipeline.process(path).await });
                    }
                }
                Some(_) = jobs.join_next(), if !jobs.is_empty() => {}
            }
        }

        while jobs.join_next().await.is_some() {}
        info!("watch loop stopped");

        Ok(())
    }
}
