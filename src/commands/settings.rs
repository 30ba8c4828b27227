//! `imgpaste settings show|set`

use anyhow::{bail, Context, Result};
use ip_core::settings::model::Settings;

use crate::bootstrap::AppDeps;
use crate::cli::SetArgs;

pub async fn show(deps: &AppDeps) -> Result<Settings> {
    deps.get_settings.execute().await
}

/// Apply the requested changes on top of the persisted settings.
pub async fn set(deps: &AppDeps, args: &SetArgs) -> Result<Settings> {
    if args.dir.is_none() && !args.clear_dir && args.save_on_paste.is_none() {
        bail!("nothing to change: pass --dir, --clear-dir or --save-on-paste");
    }

    let mut settings = deps.get_settings.execute().await?;
    if let Some(dir) = &args.dir {
        settings.paste.target_directory = Some(dir.clone());
    }
    if args.clear_dir {
        settings.paste.target_directory = None;
    }
    if let Some(enabled) = args.save_on_paste {
        settings.paste.save_on_paste = enabled;
    }

    deps.update_settings.execute(settings.clone()).await?;
    Ok(settings)
}

pub fn to_json(settings: &Settings) -> Result<String> {
    serde_json::to_string_pretty(settings).context("serialize settings failed")
}
