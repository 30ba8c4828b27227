//! Paste/drop interceptor installed in place of an editor's native paste handler
//! 替换编辑器原生粘贴处理器的拦截器

use std::sync::Arc;

use ip_core::ids::EditorId;
use ip_core::paste::{decide, PasteDecision, PasteDisposition, PasteEvent};
use ip_core::ports::{EditorBufferPort, PasteHandler};
use tracing::{debug, error, info, info_span};

use crate::settings_cell::SettingsCell;
use crate::usecases::placeholder::PlaceholderProtocol;

/// Paste handler that saves pasted images instead of letting the host insert them.
///
/// ## Behavior / 行为
/// - "save on paste" disabled → forward to the original handler
/// - no image in the payload → forward to the original handler
/// - otherwise → consume the event and start one capture per image source, in
///   payload order, without waiting for any of them
///
/// A capture whose placeholder cannot be inserted is logged and skipped; the
/// remaining sources are still captured and the event stays consumed.
pub struct PasteInterceptor {
    editor_id: EditorId,
    buffer: Arc<dyn EditorBufferPort>,
    original: Arc<dyn PasteHandler>,
    settings: SettingsCell,
    protocol: Arc<PlaceholderProtocol>,
}

impl PasteInterceptor {
    pub fn new(
        editor_id: EditorId,
        buffer: Arc<dyn EditorBufferPort>,
        original: Arc<dyn PasteHandler>,
        settings: SettingsCell,
        protocol: Arc<PlaceholderProtocol>,
    ) -> Self {
        Self {
            editor_id,
            buffer,
            original,
            settings,
            protocol,
        }
    }
}

impl PasteHandler for PasteInterceptor {
    fn on_paste(&self, event: &PasteEvent) -> PasteDisposition {
        let span = info_span!(
            "usecase.paste_interceptor.on_paste",
            editor_id = %self.editor_id,
            kind = ?event.kind,
        );
        let _enter = span.enter();

        let sources = match decide(&self.settings.get(), event) {
            PasteDecision::PassThrough(reason) => {
                debug!(?reason, "Forwarding event to original paste handler");
                return self.original.on_paste(event);
            }
            PasteDecision::Handle(sources) => sources,
        };

        info!(images = sources.len(), "Capturing pasted images");
        for source in sources {
            if let Err(err) = self
                .protocol
                .begin_capture(Arc::clone(&self.buffer), source)
            {
                error!(error = %err, "Image capture aborted");
            }
        }

        PasteDisposition::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ip_core::paste::{ClipboardFile, ImageSource, MimeType};
    use ip_core::ports::{FetchError, FetchStorePort};
    use ip_core::PasteSettings;
    use ip_platform::editor::TextBuffer;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::runtime::Handle;

    struct CountingHandler {
        calls: AtomicUsize,
    }

    impl PasteHandler for CountingHandler {
        fn on_paste(&self, _event: &PasteEvent) -> PasteDisposition {
            self.calls.fetch_add(1, Ordering::SeqCst);
            PasteDisposition::Default
        }
    }

    struct NamingStore;

    #[async_trait]
    impl FetchStorePort for NamingStore {
        async fn fetch_and_store(
            &self,
            source: &ImageSource,
            _target_dir: &Path,
        ) -> Result<String, FetchError> {
            match source {
                ImageSource::Bytes { file_name, .. } => Ok(file_name.clone().unwrap_or_default()),
                ImageSource::Url(url) => Ok(url.clone()),
            }
        }
    }

    fn interceptor(
        buffer: Arc<TextBuffer>,
        settings: SettingsCell,
    ) -> (PasteInterceptor, Arc<CountingHandler>, Arc<PlaceholderProtocol>) {
        let original = Arc::new(CountingHandler {
            calls: AtomicUsize::new(0),
        });
        let protocol = Arc::new(PlaceholderProtocol::new(
            Arc::new(NamingStore),
            settings.clone(),
            Handle::current(),
        ));
        let interceptor = PasteInterceptor::new(
            EditorId::from("editor-1"),
            buffer,
            original.clone(),
            settings,
            protocol.clone(),
        );
        (interceptor, original, protocol)
    }

    fn image(name: &str) -> ClipboardFile {
        ClipboardFile::new(name, MimeType::image_png(), vec![1u8, 2, 3])
    }

    #[tokio::test]
    async fn disabled_setting_forwards_event() {
        let buffer = Arc::new(TextBuffer::new("keep"));
        let settings = SettingsCell::new(PasteSettings {
            target_directory: None,
            save_on_paste: false,
        });
        let (interceptor, original, _) = interceptor(buffer.clone(), settings);

        let disposition = interceptor.on_paste(&PasteEvent::paste().with_file(image("a.png")));

        assert_eq!(disposition, PasteDisposition::Default);
        assert_eq!(original.calls.load(Ordering::SeqCst), 1);
        assert_eq!(buffer.text(), "keep");
    }

    #[tokio::test]
    async fn event_without_images_is_forwarded() {
        let buffer = Arc::new(TextBuffer::new(""));
        let (interceptor, original, _) = interceptor(buffer.clone(), SettingsCell::default());

        let disposition = interceptor.on_paste(&PasteEvent::paste().with_text("plain words"));

        assert_eq!(disposition, PasteDisposition::Default);
        assert_eq!(original.calls.load(Ordering::SeqCst), 1);
        assert_eq!(buffer.text(), "");
    }

    #[tokio::test]
    async fn every_image_gets_its_own_placeholder_line() {
        let buffer = Arc::new(TextBuffer::new(""));
        let (interceptor, original, protocol) = interceptor(buffer.clone(), SettingsCell::default());

        let disposition = interceptor.on_paste(
            &PasteEvent::paste()
                .with_file(image("first.png"))
                .with_file(image("second.png")),
        );

        assert_eq!(disposition, PasteDisposition::Consumed);
        assert_eq!(original.calls.load(Ordering::SeqCst), 0);
        let lines: Vec<String> = buffer.text().lines().map(str::to_string).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with("![Downloading file...")));

        protocol.drain_pending().await;

        assert_eq!(buffer.text(), "![](first.png)\n![](second.png)\n");
    }

    #[tokio::test]
    async fn pasted_markup_urls_are_captured() {
        let buffer = Arc::new(TextBuffer::new(""));
        let (interceptor, _, protocol) = interceptor(buffer.clone(), SettingsCell::default());

        interceptor.on_paste(
            &PasteEvent::paste().with_text("![a](https://x.test/a.png) ![b](https://x.test/b.png)"),
        );
        protocol.drain_pending().await;

        assert_eq!(
            buffer.text(),
            "![](https://x.test/a.png)\n![](https://x.test/b.png)\n"
        );
    }
}
