//! Small shared helpers for the portal core.

use std::future::Future;

/// Spawns a fire-and-forget task on the current runtime.
///
/// Local state is the source of truth for every caller of this helper, so a
/// sync that never runs (no runtime, e.g. in purely synchronous callers) is
/// only worth a warning.
pub(crate) fn spawn_detached<F>(task: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(task);
        }
        Err(_) => tracing::warn!("no async runtime available, skipping background sync"),
    }
}
