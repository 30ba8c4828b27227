//! Install and restore paste interceptors on editor instances
//! 编辑器粘贴处理器的安装与恢复

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use ip_core::ids::EditorId;
use ip_core::ports::{EditorInstancePort, PasteHandler};
use tracing::{debug, info, info_span};

use crate::settings_cell::SettingsCell;
use crate::usecases::paste_interceptor::PasteInterceptor;
use crate::usecases::placeholder::PlaceholderProtocol;

/// Original paste handler of one instrumented editor.
struct Binding {
    editor: Arc<dyn EditorInstancePort>,
    original: Arc<dyn PasteHandler>,
}

/// Keyed store of the handlers editors had before instrumentation.
///
/// A binding is created the first time an editor is instrumented and never
/// overwritten afterwards, so re-instrumenting cannot lose the true original.
#[derive(Default)]
pub struct HandlerBindings {
    entries: Mutex<HashMap<EditorId, Binding>>,
}

impl HandlerBindings {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EditorId, Binding>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the editor's current handler unless a binding already exists.
    ///
    /// Returns the recorded original, and whether this call created it.
    fn record_if_absent(&self, editor: &Arc<dyn EditorInstancePort>) -> (Arc<dyn PasteHandler>, bool) {
        let mut entries = self.lock();
        if let Some(binding) = entries.get(&editor.id()) {
            return (Arc::clone(&binding.original), false);
        }

        let original = editor.paste_handler();
        entries.insert(
            editor.id(),
            Binding {
                editor: Arc::clone(editor),
                original: Arc::clone(&original),
            },
        );
        (original, true)
    }

    pub fn original(&self, id: &EditorId) -> Option<Arc<dyn PasteHandler>> {
        self.lock().get(id).map(|binding| Arc::clone(&binding.original))
    }

    pub fn contains(&self, id: &EditorId) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn take_all(&self) -> Vec<Binding> {
        self.lock().drain().map(|(_, binding)| binding).collect()
    }
}

/// Tracks which editors carry a [`PasteInterceptor`] and undoes it on teardown.
///
/// ## Behavior / 行为
/// - `install` records the editor's native handler on first sight, then routes
///   its paste events to an interceptor that forwards to that recorded original
/// - installing again re-routes to a fresh interceptor but keeps the first
///   recorded original
/// - `restore_all` puts every recorded original back and forgets all bindings
pub struct HandlerLifecycleManager {
    bindings: HandlerBindings,
    protocol: Arc<PlaceholderProtocol>,
    settings: SettingsCell,
}

impl HandlerLifecycleManager {
    pub fn new(protocol: Arc<PlaceholderProtocol>, settings: SettingsCell) -> Self {
        Self {
            bindings: HandlerBindings::new(),
            protocol,
            settings,
        }
    }

    pub fn install(&self, editor: Arc<dyn EditorInstancePort>) {
        let editor_id = editor.id();
        let span = info_span!("usecase.handler_lifecycle.install", editor_id = %editor_id);
        let _enter = span.enter();

        let (original, recorded) = self.bindings.record_if_absent(&editor);
        if recorded {
            debug!("Recorded original paste handler");
        } else {
            debug!("Editor already instrumented; keeping recorded original");
        }

        let interceptor = PasteInterceptor::new(
            editor_id,
            editor.buffer(),
            original,
            self.settings.clone(),
            Arc::clone(&self.protocol),
        );
        editor.set_paste_handler(Arc::new(interceptor));
        info!("Paste interceptor installed");
    }

    /// Reinstall every recorded original handler.
    ///
    /// # Returns / 返回值
    /// - number of editors restored
    pub fn restore_all(&self) -> usize {
        let span = info_span!("usecase.handler_lifecycle.restore_all");
        let _enter = span.enter();

        let bindings = self.bindings.take_all();
        let restored = bindings.len();
        for binding in bindings {
            debug!(editor_id = %binding.editor.id(), "Restoring original paste handler");
            binding.editor.set_paste_handler(binding.original);
        }

        info!(restored, "Original paste handlers restored");
        restored
    }

    pub fn is_instrumented(&self, editor_id: &EditorId) -> bool {
        self.bindings.contains(editor_id)
    }

    pub fn bindings(&self) -> &HandlerBindings {
        &self.bindings
    }

    pub fn protocol(&self) -> &Arc<PlaceholderProtocol> {
        &self.protocol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ip_core::paste::{ImageSource, PasteDisposition, PasteEvent};
    use ip_core::ports::{FetchError, FetchStorePort};
    use ip_platform::editor::{InMemoryEditor, NativePasteHandler};
    use std::path::Path;
    use tokio::runtime::Handle;

    struct UnreachableStore;

    #[async_trait]
    impl FetchStorePort for UnreachableStore {
        async fn fetch_and_store(
            &self,
            _source: &ImageSource,
            _target_dir: &Path,
        ) -> Result<String, FetchError> {
            Err(FetchError::Network("offline".into()))
        }
    }

    fn manager() -> HandlerLifecycleManager {
        let settings = SettingsCell::default();
        let protocol = Arc::new(PlaceholderProtocol::new(
            Arc::new(UnreachableStore),
            settings.clone(),
            Handle::current(),
        ));
        HandlerLifecycleManager::new(protocol, settings)
    }

    fn same_handler(a: &Arc<dyn PasteHandler>, b: &Arc<dyn PasteHandler>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
    }

    #[tokio::test]
    async fn install_replaces_handler_and_records_original() {
        let manager = manager();
        let editor = Arc::new(InMemoryEditor::new("e1", ""));
        let native = editor.paste_handler();

        manager.install(editor.clone());

        assert!(manager.is_instrumented(&EditorId::from("e1")));
        assert!(!same_handler(&editor.paste_handler(), &native));
        let recorded = manager.bindings().original(&EditorId::from("e1")).unwrap();
        assert!(same_handler(&recorded, &native));
    }

    #[tokio::test]
    async fn reinstall_keeps_first_original() {
        let manager = manager();
        let editor = Arc::new(InMemoryEditor::new("e1", ""));
        let native = editor.paste_handler();

        manager.install(editor.clone());
        manager.install(editor.clone());

        assert_eq!(manager.bindings().len(), 1);
        let recorded = manager.bindings().original(&EditorId::from("e1")).unwrap();
        assert!(same_handler(&recorded, &native));

        assert_eq!(manager.restore_all(), 1);
        assert!(same_handler(&editor.paste_handler(), &native));
    }

    #[tokio::test]
    async fn restore_all_resets_every_editor() {
        let manager = manager();
        let first = Arc::new(InMemoryEditor::new("e1", ""));
        let second = Arc::new(InMemoryEditor::new("e2", ""));
        let natives = (first.paste_handler(), second.paste_handler());

        manager.install(first.clone());
        manager.install(second.clone());
        let restored = manager.restore_all();

        assert_eq!(restored, 2);
        assert!(manager.bindings().is_empty());
        assert!(same_handler(&first.paste_handler(), &natives.0));
        assert!(same_handler(&second.paste_handler(), &natives.1));
        assert_eq!(manager.restore_all(), 0);
    }

    #[tokio::test]
    async fn forwarded_events_reach_the_native_handler() {
        let manager = manager();
        let native = Arc::new(NativePasteHandler::new());
        let editor = Arc::new(InMemoryEditor::with_handler("e1", "", native.clone()));

        manager.install(editor.clone());
        let disposition = editor.dispatch(&PasteEvent::paste().with_text("words"));

        assert_eq!(disposition, PasteDisposition::Default);
        assert_eq!(native.received(), 1);
    }
}
