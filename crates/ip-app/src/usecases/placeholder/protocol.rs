use std::sync::{Arc, Mutex, MutexGuard};

use ip_core::fetch::FetchOutcome;
use ip_core::ids::PasteId;
use ip_core::paste::ImageSource;
use ip_core::placeholder::{embed_image, Marker, FAILURE_TEXT};
use ip_core::ports::{EditorBufferPort, EditorError, FetchStorePort};
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, info_span, Instrument};

use crate::settings_cell::SettingsCell;

/// Error type for a capture that could not even start.
/// 占位符插入失败的错误类型。
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to insert placeholder: {0}")]
    InsertPlaceholder(#[from] EditorError),
}

/// Result of one locate-and-replace pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerReplacement {
    /// The marker was found on `line` and replaced.
    Replaced { line: usize },
    /// No line contains the marker any more; the buffer was left untouched.
    NotFound,
}

/// Serialises every buffer mutation issued by the protocol.
///
/// A replacement reads the whole buffer, scans it and writes back; holding the
/// gate across those steps keeps two resolutions from interleaving between the
/// read and the write.
#[derive(Debug, Clone, Default)]
struct MutationGate(Arc<Mutex<()>>);

impl MutationGate {
    fn enter(&self) -> MutexGuard<'_, ()> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Asynchronous placeholder-substitution protocol.
///
/// ## Behavior / 行为
/// 1. `begin_capture` generates a [`PasteId`] and synchronously inserts its
///    [`Marker`] plus a newline at the caret.
/// 2. A detached task asks the [`FetchStorePort`] to save the image into the
///    configured target directory.
/// 3. When the fetch settles, the *current* buffer is scanned for the marker and
///    only that substring is replaced: with `![](reference)` on success, with
///    [`FAILURE_TEXT`] on failure. A marker that has disappeared is left alone.
///
/// Positions captured at insertion time are never reused: the user may have
/// edited above the marker while the fetch was in flight.
///
/// Captures are fire-and-forget for callers. Every spawned task is tracked so that
/// [`PlaceholderProtocol::drain_pending`] can await all of them.
pub struct PlaceholderProtocol {
    fetch_store: Arc<dyn FetchStorePort>,
    settings: SettingsCell,
    runtime: Handle,
    tasks: TaskTracker,
    gate: MutationGate,
}

impl PlaceholderProtocol {
    /// Create a protocol that spawns its fetch tasks on `runtime`.
    pub fn new(fetch_store: Arc<dyn FetchStorePort>, settings: SettingsCell, runtime: Handle) -> Self {
        Self {
            fetch_store,
            settings,
            runtime,
            tasks: TaskTracker::new(),
            gate: MutationGate::default(),
        }
    }

    /// Insert a placeholder for `source` and launch its fetch.
    ///
    /// # Returns / 返回值
    /// - `Ok(PasteId)` once the marker is in the buffer and the fetch is launched
    /// - `Err(CaptureError)` if the editor rejected the insertion; nothing is spawned
    pub fn begin_capture(
        &self,
        buffer: Arc<dyn EditorBufferPort>,
        source: ImageSource,
    ) -> Result<PasteId, CaptureError> {
        let paste_id = PasteId::generate();
        let span = info_span!(
            "usecase.placeholder.begin_capture",
            paste_id = %paste_id,
            source = %source.describe(),
        );
        let _enter = span.enter();

        let marker = Marker::for_id(&paste_id);
        {
            let _gate = self.gate.enter();
            buffer.insert_at_cursor(&marker.as_line())?;
        }
        debug!("Placeholder inserted");

        let target_dir = self.settings.target_directory();
        let fetch_store = Arc::clone(&self.fetch_store);
        let gate = self.gate.clone();
        let task_id = paste_id.clone();
        let resolve_span = info_span!("usecase.placeholder.resolve", paste_id = %paste_id);

        self.tasks.spawn_on(
            async move {
                let outcome =
                    FetchOutcome::from(fetch_store.fetch_and_store(&source, &target_dir).await);
                settle(buffer.as_ref(), &gate, &task_id, outcome);
            }
            .instrument(resolve_span),
            &self.runtime,
        );

        Ok(paste_id)
    }

    /// Replace the marker of `paste_id` with `replacement` in the live buffer.
    ///
    /// Scans from the first line; the first line containing the marker has its
    /// first occurrence replaced and the scan stops. Calling this again after a
    /// successful replacement is a no-op.
    pub fn replace_marker(
        &self,
        buffer: &dyn EditorBufferPort,
        paste_id: &PasteId,
        replacement: &str,
    ) -> Result<MarkerReplacement, EditorError> {
        let _gate = self.gate.enter();
        replace_first_marker(buffer, &Marker::for_id(paste_id), replacement)
    }

    /// Wait until every capture launched so far has settled.
    ///
    /// Captures begun while draining are awaited as well. Not intended to be
    /// called from two places at once.
    pub async fn drain_pending(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    /// Number of captures whose fetch has not settled yet.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }
}

fn settle(buffer: &dyn EditorBufferPort, gate: &MutationGate, paste_id: &PasteId, outcome: FetchOutcome) {
    let replacement = match outcome {
        FetchOutcome::Saved { reference } => {
            info!(reference = %reference, "Image saved");
            embed_image(&reference)
        }
        FetchOutcome::Failed { reason } => {
            error!(reason = %reason, "Image fetch failed");
            FAILURE_TEXT.to_string()
        }
    };

    let result = {
        let _gate = gate.enter();
        replace_first_marker(buffer, &Marker::for_id(paste_id), &replacement)
    };

    match result {
        Ok(MarkerReplacement::Replaced { line }) => debug!(line, "Placeholder replaced"),
        Ok(MarkerReplacement::NotFound) => {
            debug!("Placeholder no longer present; leaving buffer untouched")
        }
        Err(err) => error!(error = %err, "Failed to replace placeholder"),
    }
}

/// Read the full buffer, find the first line holding `marker` and swap only that substring.
fn replace_first_marker(
    buffer: &dyn EditorBufferPort,
    marker: &Marker,
    replacement: &str,
) -> Result<MarkerReplacement, EditorError> {
    let text = buffer.full_text()?;
    match marker.locate_in(&text) {
        Some(range) => {
            buffer.replace_range(replacement, range.from, range.to)?;
            Ok(MarkerReplacement::Replaced {
                line: range.from.line,
            })
        }
        None => Ok(MarkerReplacement::NotFound),
    }
}
