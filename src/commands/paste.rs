//! `imgpaste paste`: drive one synthetic paste through an instrumented editor.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use ip_core::ids::EditorId;
use ip_core::paste::{ClipboardFile, MimeType, PasteDisposition, PasteEvent, PasteKind};
use ip_core::placeholder::{embed_image, Position, FAILURE_TEXT};
use ip_platform::editor::{InMemoryEditor, TextBuffer};
use tracing::{info, info_span, Instrument};

use crate::bootstrap::AppDeps;
use crate::cli::PasteArgs;

const EMBED_PREFIX: &str = "![](";

/// What a paste did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteReport {
    /// `false` when the event fell through to the editor's native handling.
    pub consumed: bool,
    pub saved: usize,
    pub failed: usize,
}

/// Load `args.file`, paste the requested images into it and write it back.
///
/// The file is rewritten only when the paste was consumed.
pub async fn run(deps: &AppDeps, args: &PasteArgs) -> Result<PasteReport> {
    if args.images.is_empty() && args.urls.is_empty() {
        bail!("nothing to paste: pass --image or --url");
    }

    let span = info_span!("command.paste", file = %args.file.display());
    async {
        let original = read_document(&args.file).await?;
        let editor = Arc::new(InMemoryEditor::new(
            EditorId::from(args.file.display().to_string()),
            original.clone(),
        ));
        if let Some(line) = args.line {
            place_caret(editor.text_buffer(), line)?;
        }
        let event = build_event(args).await?;

        deps.lifecycle.install(editor.clone());
        let disposition = editor.dispatch(&event);
        deps.protocol.drain_pending().await;
        deps.lifecycle.restore_all();

        let consumed = disposition == PasteDisposition::Consumed;
        let updated = editor.text();
        if consumed {
            tokio::fs::write(&args.file, &updated)
                .await
                .with_context(|| format!("Failed to write {}", args.file.display()))?;
        }

        let report = PasteReport {
            consumed,
            saved: added(&original, &updated, EMBED_PREFIX),
            failed: added(&original, &updated, FAILURE_TEXT),
        };
        info!(?report, "Paste finished");
        Ok(report)
    }
    .instrument(span)
    .await
}

async fn read_document(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Put the caret at the start of 1-based `line`.
fn place_caret(buffer: &TextBuffer, line: usize) -> Result<()> {
    let lines = buffer.line_count();
    if line == 0 || line > lines {
        bail!("line {line} is outside the document (1..={lines})");
    }
    buffer.set_cursor(Position::new(line - 1, 0))?;
    Ok(())
}

async fn build_event(args: &PasteArgs) -> Result<PasteEvent> {
    let kind = if args.drop {
        PasteKind::Drop
    } else {
        PasteKind::Paste
    };
    let mut event = PasteEvent::new(kind);

    for path in &args.images {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        event = event.with_file(ClipboardFile::new(name, mime_for_path(path), data));
    }

    if !args.urls.is_empty() {
        let markup: Vec<String> = args.urls.iter().map(|url| embed_image(url)).collect();
        event = event.with_text(markup.join("\n"));
    }

    Ok(event)
}

fn mime_for_path(path: &Path) -> MimeType {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => return MimeType::octet_stream(),
    };
    MimeType(mime.to_string())
}

fn added(before: &str, after: &str, needle: &str) -> usize {
    after
        .matches(needle)
        .count()
        .saturating_sub(before.matches(needle).count())
}
