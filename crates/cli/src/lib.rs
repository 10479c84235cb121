pub mod shell;

use clap::{Parser, Subcommand};
use classforge_core::session::{DuplicatePolicy, SessionConfig};
use classforge_core::store::{ClassStore, FsClassStore};
use classforge_core::{render, scan};
use std::path::PathBuf;

use crate::shell::view;

#[derive(Parser)]
#[command(
    name = "classforge",
    version,
    about = "Interactive builder for Java class source files",
    long_about = "Classforge keeps a structural model of one Java class or interface at a time. \
                  Members are added, refactored and generated through an interactive shell with \
                  undo/redo, and the model is rendered to a formatted .java file on save. \
                  Existing files are scanned back into the model on a best-effort basis."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive class editor
    #[command(
        long_about = "Starts an interactive shell bound to a folder of .java files. \
                            Classes are created, opened, edited and saved from the shell."
    )]
    Shell {
        /// Folder holding the .java files. Defaults to the current directory.
        #[arg(long, value_name = "DIR")]
        folder: Option<PathBuf>,
        /// Maximum number of undo steps kept per class
        #[arg(long, value_name = "N", default_value_t = classforge_core::history::DEFAULT_HISTORY_LIMIT)]
        history_limit: usize,
        /// When duplicate member names are reported: immediately, or at save time
        #[arg(long, value_name = "POLICY", default_value = "reject")]
        duplicates: DuplicatePolicy,
    },
    /// Scan a .java file and print the regenerated source
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Scan a .java file and print its members and inheritance
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print the recovered model as JSON instead
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Shell { .. } => "shell",
        _ => "cli",
    };
    let _guard = classforge_core::logging::init_logging(component, false);

    match cli.command {
        Commands::Shell {
            folder,
            history_limit,
            duplicates,
        } => {
            let folder = match folder {
                Some(f) => f,
                None => std::env::current_dir()?,
            };
            let config = shell::ShellConfig {
                folder,
                session: SessionConfig {
                    history_limit,
                    duplicate_policy: duplicates,
                },
                ..shell::ShellConfig::default()
            };
            shell::run(config)
        }
        Commands::Render { file } => {
            let text = FsClassStore.read(&file)?;
            let scanned = scan(&text)?;
            print!("{}", render(&scanned.model));
            Ok(())
        }
        Commands::Inspect { file, json } => {
            let text = FsClassStore.read(&file)?;
            let scanned = scan(&text)?;
            if json {
                println!("{}", scanned.model.to_json()?);
            } else {
                println!("{}", view::inheritance_tree(&scanned.model));
                println!("{}", view::members_table(&scanned.model));
                if !scanned.skipped.is_empty() {
                    println!("{}", view::skipped_lines(&scanned.skipped));
                }
            }
            Ok(())
        }
    }
}
