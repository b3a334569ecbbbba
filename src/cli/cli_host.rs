use mtime2created::core::plugin::{Action, ActionPlace, Host};
use mtime2created::shared::npath::{File, NPath, Rel};

/// Environment variables probed for the locale, in order.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// A host living on the command line.
///
/// Keeps the registered actions and runs them for the files given as
/// arguments. The locale comes from the environment.
#[derive(Default)]
pub struct CliHost {
    actions: Vec<Action>,
}

impl CliHost {
    /// Creates a host without actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registered actions.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Picks the action matching a selection of `count` files.
    fn action_for(&self, count: usize) -> Option<&Action> {
        let place = match count {
            0 => ActionPlace::Command,
            1 => ActionPlace::FileMenu,
            _ => ActionPlace::FilesMenu,
        };

        self.actions.iter().find(|action| action.place == place)
    }

    /// Runs the action matching the selection. Returns false if none is registered.
    pub fn invoke(&self, rel_files: &[NPath<Rel, File>]) -> bool {
        match self.action_for(rel_files.len()) {
            Some(action) => {
                log::debug!("Invoke {} for {} files", action.id, rel_files.len());
                (action.handler)(rel_files);
                true
            }
            None => false,
        }
    }
}

impl Host for CliHost {
    fn locale(&self) -> String {
        LOCALE_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| "en".to_string())
    }

    fn register_action(&mut self, action: Action) {
        self.actions.push(action);
    }
}
