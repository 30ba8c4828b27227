//! Paste and settings commands against a temporary document root.

use std::path::PathBuf;

use imgpaste_lib::bootstrap::{wire_dependencies, AppDeps};
use imgpaste_lib::cli::{PasteArgs, SetArgs};
use imgpaste_lib::commands::{paste, settings};
use ip_core::config::AppConfig;
use tempfile::TempDir;
use tokio::runtime::Handle;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

async fn deps_in(root: &TempDir) -> AppDeps {
    let config = AppConfig {
        document_root: root.path().to_path_buf(),
        settings_path: root.path().join(".imgpaste/settings.json"),
        log_dir: root.path().join(".imgpaste/logs"),
    };
    wire_dependencies(&config, Handle::current()).await.unwrap()
}

fn paste_args(file: PathBuf) -> PasteArgs {
    PasteArgs {
        file,
        images: Vec::new(),
        urls: Vec::new(),
        line: None,
        drop: false,
    }
}

fn set_args() -> SetArgs {
    SetArgs {
        dir: None,
        clear_dir: false,
        save_on_paste: None,
    }
}

#[tokio::test]
async fn pasting_an_image_file_saves_it_and_rewrites_the_note() {
    let root = TempDir::new().unwrap();
    let deps = deps_in(&root).await;
    settings::set(
        &deps,
        &SetArgs {
            dir: Some("assets".into()),
            ..set_args()
        },
    )
    .await
    .unwrap();

    let note = root.path().join("note.md");
    std::fs::write(&note, "# Trip\nday one\n").unwrap();
    let image = root.path().join("beach.png");
    std::fs::write(&image, PNG_MAGIC).unwrap();

    let report = paste::run(
        &deps,
        &PasteArgs {
            images: vec![image],
            line: Some(2),
            ..paste_args(note.clone())
        },
    )
    .await
    .unwrap();

    assert!(report.consumed);
    assert_eq!(report.saved, 1);
    assert_eq!(report.failed, 0);

    let text = std::fs::read_to_string(&note).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines[0], "# Trip");
    assert!(lines[1].starts_with("![](assets/image-"), "{text}");
    assert_eq!(lines[2], "day one");

    let reference = &lines[1]["![](".len()..lines[1].len() - 1];
    assert_eq!(std::fs::read(root.path().join(reference)).unwrap(), PNG_MAGIC);
    assert!(!deps.lifecycle.is_instrumented(&ip_core::EditorId::from(note.display().to_string())));
}

#[tokio::test]
async fn disabled_saving_leaves_the_note_untouched() {
    let root = TempDir::new().unwrap();
    let deps = deps_in(&root).await;
    settings::set(
        &deps,
        &SetArgs {
            save_on_paste: Some(false),
            ..set_args()
        },
    )
    .await
    .unwrap();

    let note = root.path().join("note.md");
    std::fs::write(&note, "keep").unwrap();

    let report = paste::run(
        &deps,
        &PasteArgs {
            urls: vec!["https://img.test/a.png".into()],
            ..paste_args(note.clone())
        },
    )
    .await
    .unwrap();

    assert!(!report.consumed);
    assert_eq!(std::fs::read_to_string(&note).unwrap(), "keep");
}

#[tokio::test]
async fn unreachable_url_leaves_failure_text() {
    let root = TempDir::new().unwrap();
    let deps = deps_in(&root).await;
    let note = root.path().join("new.md");

    let report = paste::run(
        &deps,
        &PasteArgs {
            urls: vec!["http://127.0.0.1:1/a.png".into()],
            ..paste_args(note.clone())
        },
    )
    .await
    .unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(
        std::fs::read_to_string(&note).unwrap(),
        format!("{}\n", ip_core::placeholder::FAILURE_TEXT)
    );
}

#[tokio::test]
async fn empty_paste_is_rejected() {
    let root = TempDir::new().unwrap();
    let deps = deps_in(&root).await;

    let err = paste::run(&deps, &paste_args(root.path().join("x.md")))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("nothing to paste"));
}

#[tokio::test]
async fn settings_roundtrip_through_the_file() {
    let root = TempDir::new().unwrap();
    let deps = deps_in(&root).await;

    let updated = settings::set(
        &deps,
        &SetArgs {
            dir: Some("img".into()),
            save_on_paste: Some(false),
            ..set_args()
        },
    )
    .await
    .unwrap();
    assert_eq!(deps.settings.get(), updated.paste);

    let reloaded = settings::show(&deps_in(&root).await).await.unwrap();
    assert_eq!(reloaded, updated);

    let cleared = settings::set(
        &deps,
        &SetArgs {
            clear_dir: true,
            ..set_args()
        },
    )
    .await
    .unwrap();
    assert_eq!(cleared.paste.target_directory, None);
    assert!(settings::to_json(&cleared).unwrap().contains("\"save_on_paste\": false"));
}
