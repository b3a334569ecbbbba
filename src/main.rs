mod cli;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use crossbeam_channel::{Sender, unbounded};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

use mtime2created::core::fs::local_fs::LocalFS;
use mtime2created::core::plugin::{Mtime2CreatedPlugin, Plugin, PluginSettings};
use mtime2created::core::tasks::task_worker::TaskContext;
use mtime2created::core::touch::SetFileTouch;
use mtime2created::shared::config::{Config, EXAMPLE_CONFIG};
use mtime2created::shared::message::{Message, NoticeKind, StringError};
use mtime2created::shared::msg_dispatcher::MsgDispatcher;
use mtime2created::shared::npath::{Abs, Dir, File, NPath, Rel};
use mtime2created::{send_error, send_info, send_notice};

use crate::cli::cli_cmds::{Cli, ConfigCommands, ConfigExampleCommands, MainCommands};
use crate::cli::cli_host::CliHost;
use crate::cli::console_out::ConsoleOut;
use crate::cli::file_logger::{Log, LogBuilder};
use crate::cli::progress_bars::ProgressBars;

/// A macro the subscribes the `Log` to the `MsgDispatcher`.
macro_rules! use_logger {
    ($msg_logger:ident, $msg_dispatcher:expr, $log_dir:expr, $sender:expr) => {{
        let logger_receiver = $msg_dispatcher.subscribe();
        let logger = LogBuilder::new(Arc::new(logger_receiver), Path::new($log_dir))
            .add_log_file(vec![log::Level::Info], "mtime2created.info.log")
            .and_then(|builder| builder.add_log_file(vec![log::Level::Error], "mtime2created.error.log"))
            .and_then(|builder| builder.build());

        match logger {
            Ok(logger) => {
                $msg_logger = Some(logger);
                if let Some(logger) = $msg_logger.as_mut() {
                    logger.start();
                }
            }
            Err(err) => send_error!($sender, err),
        }
    }};
}

/// A macro the unsubscribes the `Log` from the `MsgDispatcher`.
macro_rules! unuse_logger {
    ($msg_logger:ident) => {{
        if let Some(mut logger) = $msg_logger.take() {
            logger.stop();
        }
    }};
}

/// A macro the subscribes the `ConsoleOut` to the `MsgDispatcher`.
macro_rules! use_console_out {
    ($msg_console_out:ident, $msg_dispatcher:expr) => {{
        let console_out_receiver = $msg_dispatcher.subscribe();
        $msg_console_out = Some(ConsoleOut::new(Arc::new(console_out_receiver)));

        if let Some(console_out) = $msg_console_out.as_mut() {
            console_out.start();
        }
    }};
}

/// A macro the unsubscribes the `ConsoleOut` from the `MsgDispatcher`.
macro_rules! unuse_console_out {
    ($msg_console_out:ident) => {{
        if let Some(mut console_out) = $msg_console_out.take() {
            console_out.stop();
        }
    }};
}

/// A macro the subscribes the `ProgressBars` to the `MsgDispatcher`.
macro_rules! use_progress {
    ($msg_progress_bars:ident, $msg_dispatcher:expr, $workers:expr) => {{
        let progress_receiver = $msg_dispatcher.subscribe();
        $msg_progress_bars = Some(ProgressBars::new(Arc::new(progress_receiver), $workers));

        if let Some(progress) = $msg_progress_bars.as_mut() {
            progress.start();
        }
    }};
}

/// A macro the unsubscribes the `ProgressBars` from the `MsgDispatcher`.
macro_rules! unuse_progress {
    ($msg_progress_bars:ident) => {{
        if let Some(mut progress) = $msg_progress_bars.take() {
            progress.stop();
        }
    }};
}

/// Writes the example config to `path`.
pub fn write_example_config(sender: Sender<Arc<dyn Message>>, path: &Path) {
    if path.exists() {
        print!("{} already exists. Overwrite? [y/N]: ", path.display());
        if let Err(error) = io::stdout().flush() {
            send_error!(sender, error);
            return;
        }

        let mut input = String::new();
        if let Err(error) = io::stdin().read_line(&mut input) {
            send_error!(sender, error);
            return;
        }

        let trimmed = input.trim().to_lowercase();
        if trimmed != "y" && trimmed != "yes" {
            send_error!(
                sender,
                StringError::new("Aborted. Existing file was not overwritten.".to_string())
            );
            return;
        }
    }

    match fs::write(path, EXAMPLE_CONFIG) {
        Ok(_) => send_notice!(
            sender,
            NoticeKind::Success,
            "Example config written to {}",
            path.display()
        ),
        Err(error) => send_error!(sender, error),
    }
}

/// Resolves the vault root: the command line wins over the config, the
/// working directory is the fallback.
fn resolve_vault(cli_vault: Option<&Path>, config: &Config) -> Result<NPath<Abs, Dir>, StringError> {
    let os_path = match (cli_vault, &config.vault) {
        (Some(cli_vault), _) => std::path::absolute(cli_vault),
        (None, Some(vault)) => return Ok(vault.clone()),
        (None, None) => std::env::current_dir(),
    }
    .map_err(|err| StringError::new(format!("Cannot resolve the vault: {}", err)))?;

    NPath::<Abs, Dir>::from_os_path(&os_path)
        .map_err(|err| StringError::new(format!("Invalid vault {:?}: {}", os_path, err)))
}

/// Turns a file argument into a vault relative path.
fn resolve_file_arg(vault: &NPath<Abs, Dir>, arg: &str) -> Result<NPath<Rel, File>, StringError> {
    let rel_file_path = if Path::new(arg).is_absolute() {
        NPath::<Abs, File>::try_from(arg).and_then(|abs_file_path| abs_file_path.sub_abs_dir(vault))
    } else {
        NPath::<Rel, File>::try_from(arg)
    };

    rel_file_path.map_err(|err| StringError::new(format!("Invalid file {:?}: {}", arg, err)))
}

/// Creates the plugin for the vault and lets the host start it.
fn start_plugin(
    cli: &Cli,
    config: &Config,
    vault: NPath<Abs, Dir>,
    host: &mut CliHost,
    sender: Sender<Arc<dyn Message>>,
) -> Mtime2CreatedPlugin {
    let context = TaskContext {
        fs: Arc::new(LocalFS::new(vault)),
        touch: Arc::new(SetFileTouch::new(&config.utility)),
    };

    let settings = PluginSettings {
        language: cli.lang.map(Into::into).or(config.language.fixed()),
        notice: config.notice,
        workers: config.workers,
    };

    let mut plugin = Mtime2CreatedPlugin::new(settings, context, sender);
    plugin.start(host);
    plugin
}

fn main() {
    let (sender, receiver) = unbounded::<Arc<dyn Message>>();

    let mut msg_dispatcher = MsgDispatcher::new(receiver);

    msg_dispatcher.start();

    #[allow(unused_assignments)]
    let mut msg_console_out: Option<ConsoleOut> = None;
    #[allow(unused_assignments)]
    let mut msg_logger: Option<Log> = None;
    #[allow(unused_assignments)]
    let mut msg_progress_bars: Option<ProgressBars> = None;

    use_console_out!(msg_console_out, msg_dispatcher);

    // Show help if no arguments are passed.
    if std::env::args().len() == 1 {
        let _ = Cli::command().print_help();
    } else {
        match Cli::try_parse() {
            Ok(cli) => match &cli.command {
                MainCommands::Config { command } => match command {
                    ConfigCommands::Example { command } => match command {
                        ConfigExampleCommands::Show => {
                            println!("{}", EXAMPLE_CONFIG);
                        }
                        ConfigExampleCommands::Write => {
                            write_example_config(sender.clone(), &cli.config);
                        }
                    },
                },
                MainCommands::Actions | MainCommands::Sync { .. } => {
                    let config = match Config::load(&cli.config) {
                        Ok(config) => Some(config.unwrap_or_default()),
                        Err(err) => {
                            send_error!(sender, err);
                            None
                        }
                    };

                    let vault = config.as_ref().and_then(|config| {
                        resolve_vault(cli.vault.as_deref(), config)
                            .map_err(|err| send_error!(sender, err))
                            .ok()
                    });

                    if let (Some(config), Some(vault)) = (config, vault) {
                        use_logger!(msg_logger, msg_dispatcher, &config.log_dir, sender);
                        send_info!(sender, "Vault {}", vault);

                        let mut host = CliHost::new();
                        let mut plugin =
                            start_plugin(&cli, &config, vault.clone(), &mut host, sender.clone());

                        match &cli.command {
                            MainCommands::Sync { files } => {
                                let rel_files: Vec<NPath<Rel, File>> = files
                                    .iter()
                                    .filter_map(|arg| {
                                        resolve_file_arg(&vault, arg)
                                            .map_err(|err| send_error!(sender, err))
                                            .ok()
                                    })
                                    .collect();

                                if rel_files.len() > 1 {
                                    let workers = config.workers.clamp(1, rel_files.len());
                                    unuse_console_out!(msg_console_out);
                                    use_progress!(msg_progress_bars, msg_dispatcher, workers);

                                    host.invoke(&rel_files);

                                    unuse_progress!(msg_progress_bars);
                                    use_console_out!(msg_console_out, msg_dispatcher);
                                } else if files.is_empty() || !rel_files.is_empty() {
                                    host.invoke(&rel_files);
                                }
                            }
                            _ => {
                                for action in host.actions() {
                                    println!(
                                        "{:<11} {:<36} {:<6} {}",
                                        action.place.to_string(),
                                        action.id,
                                        action.icon.as_deref().unwrap_or("-"),
                                        action.title
                                    );
                                }
                            }
                        }

                        plugin.stop();
                    }
                }
            },
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = err.print();
                }
                _ => send_error!(sender, StringError::new(format!("{}", err))),
            },
        }
    }

    msg_dispatcher.stop();
    unuse_logger!(msg_logger);
    unuse_console_out!(msg_console_out);
}
