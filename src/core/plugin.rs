use crossbeam_channel::Sender;
use std::fmt;
use std::sync::Arc;
use strum_macros::Display;

use crate::shared::config::NoticeVerbosity;
use crate::shared::i18n::{Language, MsgKey, t};
use crate::shared::message::Message;
use crate::shared::npath::{File, NPath, Rel};

use super::api::Mtime2Created;
use super::tasks::task_worker::TaskContext;

/// Id of the command acting on the active file.
pub const COMMAND_ID: &str = "sync-mtime-to-created";

/// Id of the context menu entry of a single file.
pub const FILE_MENU_ID: &str = "file-menu:sync-mtime-to-created";

/// Id of the context menu entry of a multi-file selection.
pub const FILES_MENU_ID: &str = "files-menu:sync-mtime-to-created";

/// Icon of the menu entries.
pub const MENU_ICON: &str = "clock";

/// Called with the files the user picked.
pub type ActionHandler = Arc<dyn Fn(&[NPath<Rel, File>]) + Send + Sync>;

/// Where an action shows up in the host.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPlace {
    /// A command working on the active file (the first file, if any).
    #[strum(to_string = "command")]
    Command,

    /// The context menu of one file.
    #[strum(to_string = "file-menu")]
    FileMenu,

    /// The context menu of a multi-file selection.
    #[strum(to_string = "files-menu")]
    FilesMenu,
}

/// A user invocable action contributed by a plugin.
#[derive(Clone)]
pub struct Action {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub place: ActionPlace,
    pub handler: ActionHandler,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("icon", &self.icon)
            .field("place", &self.place)
            .finish()
    }
}

/// What a host offers to a plugin.
pub trait Host {
    /// Returns the locale identifier of the host, e.g. `ja-JP` or `en_US.UTF-8`.
    fn locale(&self) -> String;

    /// Adds an action to the host.
    fn register_action(&mut self, action: Action);
}

/// A plugin driven by a host.
pub trait Plugin {
    /// Called once when the host loads the plugin.
    fn start(&mut self, host: &mut dyn Host);

    /// Called when the host unloads the plugin.
    fn stop(&mut self);
}

/// Settings a plugin is created with.
#[derive(Debug, Clone, Copy)]
pub struct PluginSettings {
    /// A fixed language; `None` asks the host.
    pub language: Option<Language>,
    pub notice: NoticeVerbosity,
    pub workers: usize,
}

/// The sync-modification-time-to-creation-time plugin.
pub struct Mtime2CreatedPlugin {
    settings: PluginSettings,
    context: TaskContext,
    sender: Sender<Arc<dyn Message>>,
    api: Option<Arc<Mtime2Created>>,
}

impl Mtime2CreatedPlugin {
    /// Creates the plugin. Nothing happens until the host starts it.
    pub fn new(
        settings: PluginSettings,
        context: TaskContext,
        sender: Sender<Arc<dyn Message>>,
    ) -> Self {
        Self {
            settings,
            context,
            sender,
            api: None,
        }
    }

    /// Returns the api while the plugin is started.
    pub fn api(&self) -> Option<&Arc<Mtime2Created>> {
        self.api.as_ref()
    }
}

impl Plugin for Mtime2CreatedPlugin {
    fn start(&mut self, host: &mut dyn Host) {
        // The language is fixed for the lifetime of the plugin.
        let language = self
            .settings
            .language
            .unwrap_or_else(|| Language::from_locale(&host.locale()));

        let api = Arc::new(Mtime2Created::new(
            language,
            self.settings.notice,
            self.settings.workers,
            self.context.clone(),
            self.sender.clone(),
        ));

        // Actions hold weak references; they go dead once `stop` drops the api.
        let command_api = Arc::downgrade(&api);
        host.register_action(Action {
            id: COMMAND_ID.to_string(),
            title: t(language, MsgKey::CommandName).to_string(),
            icon: None,
            place: ActionPlace::Command,
            handler: Arc::new(move |rel_files: &[NPath<Rel, File>]| {
                if let Some(api) = command_api.upgrade() {
                    api.sync_active(rel_files.first());
                }
            }),
        });

        let file_menu_api = Arc::downgrade(&api);
        host.register_action(Action {
            id: FILE_MENU_ID.to_string(),
            title: t(language, MsgKey::MenuTitle).to_string(),
            icon: Some(MENU_ICON.to_string()),
            place: ActionPlace::FileMenu,
            handler: Arc::new(move |rel_files: &[NPath<Rel, File>]| {
                if let Some(api) = file_menu_api.upgrade()
                    && let Some(rel_file_path) = rel_files.first()
                {
                    api.sync_one(rel_file_path);
                }
            }),
        });

        let files_menu_api = Arc::downgrade(&api);
        host.register_action(Action {
            id: FILES_MENU_ID.to_string(),
            title: t(language, MsgKey::MenuTitle).to_string(),
            icon: Some(MENU_ICON.to_string()),
            place: ActionPlace::FilesMenu,
            handler: Arc::new(move |rel_files: &[NPath<Rel, File>]| {
                if let Some(api) = files_menu_api.upgrade()
                    && !rel_files.is_empty()
                {
                    api.sync_batch(rel_files);
                }
            }),
        });

        self.api = Some(api);
    }

    /// Drops the api; actions still registered with the host do nothing afterwards.
    fn stop(&mut self) {
        self.api = None;
    }
}
