use super::event::PasteEvent;
use super::source::{extract_image_sources, ImageSource};
use crate::settings::model::PasteSettings;

/// Why an event goes to the original handler untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThroughReason {
    /// "Save on paste" is switched off.
    SaveOnPasteDisabled,
    /// The payload carries nothing that looks like an image.
    NoImageFound,
}

/// Decision taken for one paste or drop event.
///
/// 注意：
/// - 不包含 IO / async
/// - 只描述"做什么"，不负责执行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteDecision {
    /// Forward to the original handler and do nothing else.
    PassThrough(PassThroughReason),
    /// Suppress the native behavior and capture every listed source.
    Handle(Vec<ImageSource>),
}

/// Apply the interception policy; the first matching rule wins.
pub fn decide(settings: &PasteSettings, event: &PasteEvent) -> PasteDecision {
    if !settings.save_on_paste {
        return PasteDecision::PassThrough(PassThroughReason::SaveOnPasteDisabled);
    }

    let sources = extract_image_sources(event);
    if sources.is_empty() {
        return PasteDecision::PassThrough(PassThroughReason::NoImageFound);
    }

    PasteDecision::Handle(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paste::{ClipboardFile, MimeType};

    fn image_event() -> PasteEvent {
        PasteEvent::paste().with_file(ClipboardFile::new(
            "shot.png",
            MimeType::image_png(),
            vec![0x89u8, b'P', b'N', b'G'],
        ))
    }

    #[test]
    fn disabled_setting_wins_over_images() {
        let settings = PasteSettings {
            save_on_paste: false,
            ..PasteSettings::default()
        };
        assert_eq!(
            decide(&settings, &image_event()),
            PasteDecision::PassThrough(PassThroughReason::SaveOnPasteDisabled)
        );
    }

    #[test]
    fn no_image_passes_through() {
        let event = PasteEvent::paste().with_text("hello");
        assert_eq!(
            decide(&PasteSettings::default(), &event),
            PasteDecision::PassThrough(PassThroughReason::NoImageFound)
        );
    }

    #[test]
    fn images_are_handled() {
        match decide(&PasteSettings::default(), &image_event()) {
            PasteDecision::Handle(sources) => assert_eq!(sources.len(), 1),
            other => panic!("expected Handle, got {other:?}"),
        }
    }
}
