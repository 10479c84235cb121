mod command;
mod completer;
mod context;
mod handlers;
mod highlighter;
mod prompt;
pub mod view;

use classforge_core::session::SessionConfig;
use classforge_core::store::FsClassStore;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, DefaultHinter, Emacs, FileBackedHistory, KeyCode,
    KeyModifiers, MenuBuilder, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub use self::command::{parse_shell_command, ShellCommand};
pub use self::context::ShellContext;
use self::completer::ClassforgeCompleter;
use self::highlighter::ClassforgeHighlighter;
use self::prompt::DefaultPrompt;

const SHELL_HISTORY_SIZE: usize = 500;

#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Folder the shell reads and writes `.java` files in.
    pub folder: PathBuf,
    /// Lines kept in the line editor history file.
    pub history_size: usize,
    pub session: SessionConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            history_size: SHELL_HISTORY_SIZE,
            session: SessionConfig::default(),
        }
    }
}

pub struct ReplServer {
    context: ShellContext,
}

impl ReplServer {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            context: ShellContext::new(config, Arc::new(FsClassStore)),
        }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let folder = &self.context.config.folder;
        std::fs::create_dir_all(folder)?;
        println!("Folder: {}", folder.display());
        info!("Shell started in {}", folder.display());

        println!("Type 'help' for commands.");

        let line_editor = self.setup_line_editor()?;
        self.run_loop(line_editor)
    }

    fn setup_line_editor(&self) -> Result<Reedline, Box<dyn std::error::Error>> {
        let commands = ShellCommand::command_names();

        let completer = Box::new(ClassforgeCompleter::new(
            commands.clone(),
            self.context.clone(),
        ));

        let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let size = self.context.config.history_size;
        let history = match history_file() {
            Some(path) => FileBackedHistory::with_file(size, path)
                .or_else(|_| FileBackedHistory::new(size))?,
            None => FileBackedHistory::new(size)?,
        };

        let highlighter = Box::new(ClassforgeHighlighter::new(commands));

        Ok(Reedline::create()
            .with_history(Box::new(history))
            .with_completer(completer)
            .with_highlighter(highlighter)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_hinter(Box::new(
                DefaultHinter::default().with_style(
                    nu_ansi_term::Style::new()
                        .italic()
                        .fg(nu_ansi_term::Color::LightGray),
                ),
            ))
            .with_edit_mode(Box::new(Emacs::new(keybindings))))
    }

    fn run_loop(&self, mut line_editor: Reedline) -> Result<(), Box<dyn std::error::Error>> {
        let mut context = self.context.clone();

        loop {
            let prompt = DefaultPrompt::new(context.prompt_state());
            let sig = line_editor.read_line(&prompt);

            match sig {
                Ok(Signal::Success(buffer)) => {
                    let trimmed = buffer.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if trimmed == "exit" || trimmed == "quit" {
                        if context.has_unsaved_changes() {
                            println!("Warning: unsaved changes discarded.");
                        }
                        break;
                    }

                    match parse_shell_command(trimmed) {
                        Ok(Some(cmd)) => {
                            let handler = self::handlers::get_handler(&cmd);

                            match handler.handle(&cmd, &mut context) {
                                Ok(output) => {
                                    if !output.is_empty() {
                                        println!("{}", output);
                                    }
                                    if matches!(cmd, ShellCommand::Clear) {
                                        let _ = line_editor.clear_screen();
                                    }
                                }
                                Err(e) => {
                                    warn!("Command '{}' failed: {}", trimmed, e);
                                    eprintln!("Error: {}", e);
                                }
                            }
                        }
                        Ok(None) => {}
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
                Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                    println!("Bye!");
                    break;
                }
                x => println!("Event: {:?}", x),
            }
        }
        Ok(())
    }
}

fn history_file() -> Option<PathBuf> {
    let mut p = dirs::home_dir()?;
    p.push(".classforge");
    p.push("shell");
    std::fs::create_dir_all(&p).ok()?;
    p.push("history");
    Some(p)
}

pub fn run(config: ShellConfig) -> Result<(), Box<dyn std::error::Error>> {
    let server = ReplServer::new(config);
    server.run()
}
