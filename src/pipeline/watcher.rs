//! Bridges filesystem events into the async watch loop.

use std::path::{Path, PathBuf};

use miette::IntoDiagnostic as _;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use tokio::sync::mpsc;
use tracing::warn;

/// Starts observing `dir` for filesystem events. The returned watcher must
/// stay alive for as long as events are wanted.
pub fn subscribe(
    dir: &Path,
) -> miette::Result<(RecommendedWatcher, mpsc::UnboundedReceiver<Event>)> {
    let (tx, rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        match result {
            Ok(event) => {
                let _ = tx.send(event);
            }
            Err(error) => warn!(%error, "filesystem watcher error"),
        }
    })
    .into_diagnostic()?;

    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .into_diagnostic()?;

    Ok((watcher, rx))
}

/// Paths worth dispatching out of a watch event: creation or modification
/// of files carrying the scan data extension. Directory events carry no
/// matching extension and fall out here.
pub fn qualifying_paths(event: &Event) -> Vec<PathBuf> {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return Vec::new();
    }

    event
        .paths
        .iter()
        .filter(|path| has_scan_extension(path))
        .cloned()
        .collect()
}

fn has_scan_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
