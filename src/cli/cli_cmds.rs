use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use mtime2created::shared::config::CONFIG_FILE_NAME;
use mtime2created::shared::i18n::Language;

#[derive(Parser)]
#[command(
    name = "mtime2created",
    version,
    about = "mtime2created - sync the modification time of files to their creation time"
)]
pub struct Cli {
    /// The vault root. FILE arguments are relative to it.
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// The config file.
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Display language. Overrides the config and the locale.
    #[arg(long, global = true, value_enum)]
    pub lang: Option<LangArg>,

    #[command(subcommand)]
    pub command: MainCommands,
}

#[derive(Subcommand)]
pub enum MainCommands {
    /// Sync the modification time to the creation time.
    ///
    /// Without FILE nothing is selected, one FILE is synced on its own,
    /// several FILEs are synced as a batch.
    Sync {
        /// Files inside the vault, relative to it or absolute.
        files: Vec<String>,
    },
    /// List the registered actions.
    Actions,
    /// Show/write config.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// A config example.
    Example {
        #[command(subcommand)]
        command: ConfigExampleCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigExampleCommands {
    /// Show config example.
    Show,
    /// Write config example.
    Write,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LangArg {
    Ja,
    En,
}

impl From<LangArg> for Language {
    fn from(lang: LangArg) -> Self {
        match lang {
            LangArg::Ja => Language::Ja,
            LangArg::En => Language::En,
        }
    }
}
