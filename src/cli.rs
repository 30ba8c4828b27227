use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Save pasted and dropped images next to your markdown notes.
#[derive(Debug, Parser)]
#[command(name = "imgpaste", version, about)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Paste images into a markdown file as if they came from the clipboard
    Paste(PasteArgs),

    /// Show or change the persisted paste settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Args)]
pub struct PasteArgs {
    /// Markdown file to paste into; created if missing
    pub file: PathBuf,

    /// Image file to paste (repeatable)
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,

    /// Remote image URL to paste (repeatable)
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// 1-based line to paste at; defaults to the end of the file
    #[arg(long, value_name = "N")]
    pub line: Option<usize>,

    /// Deliver the images as a drop instead of a paste
    #[arg(long)]
    pub drop: bool,
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Print the current settings as JSON
    Show,

    /// Change one or more settings
    Set(SetArgs),
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Directory, relative to the document root, that receives saved images
    #[arg(long, value_name = "DIR", conflicts_with = "clear_dir")]
    pub dir: Option<String>,

    /// Save images directly into the document root
    #[arg(long)]
    pub clear_dir: bool,

    /// Enable or disable saving images on paste
    #[arg(long, value_name = "BOOL")]
    pub save_on_paste: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeatable_paste_sources() {
        let cli = Cli::parse_from([
            "imgpaste",
            "--config",
            "/etc/imgpaste.toml",
            "paste",
            "note.md",
            "--image",
            "a.png",
            "--image",
            "b.jpg",
            "--url",
            "https://x.test/c.png",
            "--line",
            "3",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/etc/imgpaste.toml")));
        match cli.command {
            Command::Paste(args) => {
                assert_eq!(args.file, PathBuf::from("note.md"));
                assert_eq!(args.images.len(), 2);
                assert_eq!(args.urls, vec!["https://x.test/c.png".to_string()]);
                assert_eq!(args.line, Some(3));
                assert!(!args.drop);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn dir_and_clear_dir_conflict() {
        let result = Cli::try_parse_from([
            "imgpaste", "settings", "set", "--dir", "img", "--clear-dir",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_settings_set() {
        let cli = Cli::parse_from(["imgpaste", "settings", "set", "--save-on-paste", "false"]);
        match cli.command {
            Command::Settings {
                action: SettingsAction::Set(args),
            } => {
                assert_eq!(args.save_on_paste, Some(false));
                assert_eq!(args.dir, None);
                assert!(!args.clear_dir);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
