use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Method,
    Ctor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum RenameTarget {
    Class,
    Field,
    Method,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum RetypeTarget {
    Field,
    Method,
}

/// Helper struct for Clap parsing within the shell
#[derive(Parser, Clone, Debug)]
#[command(no_binary_name = true)]
pub enum ShellCommand {
    /// Start a new class or interface
    New {
        name: String,
        /// Create an interface instead of a class
        #[arg(long)]
        interface: bool,
        /// Mark the class abstract
        #[arg(long = "abstract")]
        is_abstract: bool,
        /// Superclass (or comma-separated parent interfaces)
        #[arg(long, value_delimiter = ',')]
        extends: Vec<String>,
        /// Implemented interfaces
        #[arg(long, value_delimiter = ',')]
        implements: Vec<String>,
        #[arg(long)]
        package: Option<String>,
    },
    /// Load a class from the folder for editing
    Open { name: String },
    /// Display a class file from the folder without opening it
    Read { name: String },
    /// Delete a class file from the folder
    Delete { name: String },
    /// List the classes stored in the folder
    Ls,
    /// Table of the active class's members
    Members,
    /// Preview the rendered source of the active class
    Show,
    /// Inheritance tree of the active class
    Tree,
    /// Dump the active model as JSON
    Json,
    /// Set the package, or clear it when no name is given
    Package { name: Option<String> },
    /// Add an import (or remove it with --remove)
    Import {
        name: String,
        #[arg(long)]
        remove: bool,
    },
    /// Change class-level modifiers and the superclass
    Modifiers {
        #[arg(long = "abstract")]
        is_abstract: Option<bool>,
        #[arg(long)]
        interface: Option<bool>,
        /// Superclass (or comma-separated parent interfaces)
        #[arg(long, value_delimiter = ',', conflicts_with = "no_extends")]
        extends: Option<Vec<String>>,
        /// Remove the superclass
        #[arg(long)]
        no_extends: bool,
    },
    /// Add an implemented interface (or remove it with --remove)
    Implement {
        name: String,
        #[arg(long)]
        remove: bool,
    },
    /// Add a field
    Field {
        name: String,
        #[arg(value_name = "TYPE")]
        type_name: String,
        #[arg(short, long, default_value = "private")]
        visibility: String,
        #[arg(long = "static")]
        is_static: bool,
        #[arg(long = "final")]
        is_final: bool,
        /// Initial value expression
        #[arg(long)]
        value: Option<String>,
    },
    /// Add a method
    Method {
        name: String,
        #[arg(value_name = "RETURN_TYPE")]
        return_type: String,
        /// Parameter declaration such as "String name" (repeatable)
        #[arg(short, long = "param")]
        params: Vec<String>,
        #[arg(short, long, default_value = "public")]
        visibility: String,
        #[arg(long = "static")]
        is_static: bool,
        #[arg(long = "abstract")]
        is_abstract: bool,
        /// Method body; `\n` separates lines
        #[arg(long)]
        body: Option<String>,
    },
    /// Add a constructor
    Ctor {
        /// Parameter declaration such as "String name" (repeatable)
        #[arg(short, long = "param")]
        params: Vec<String>,
        #[arg(short, long, default_value = "public")]
        visibility: String,
        /// Constructor body; `\n` separates lines
        #[arg(long)]
        body: Option<String>,
    },
    /// Remove a field, a method, or a constructor by its number in `members`
    Rm { kind: MemberKind, target: String },
    /// Rename the class (`rename class New`) or a member (`rename field old new`)
    Rename {
        target: RenameTarget,
        name: String,
        new_name: Option<String>,
    },
    /// Change a field type or a method return type
    Retype {
        target: RetypeTarget,
        name: String,
        #[arg(value_name = "TYPE")]
        type_name: String,
    },
    /// Generate getters and setters (all fields when none are named)
    Accessors { fields: Vec<String> },
    /// Generate a toString method
    Tostring {
        #[arg(long)]
        overwrite: bool,
    },
    /// Generate equals and hashCode methods
    Equals {
        #[arg(long)]
        overwrite: bool,
    },
    /// Undo the last edit
    Undo,
    /// Redo the last undone edit
    Redo,
    /// Write the active class to the folder
    Save,
    /// Clear the screen
    Clear,
}

impl ShellCommand {
    /// Automatically generates the list of available command names from the enum.
    pub fn command_names() -> Vec<String> {
        use clap::CommandFactory;
        let cmd = Self::command();
        let mut names = vec!["help".to_string(), "exit".to_string(), "quit".to_string()];
        names.extend(cmd.get_subcommands().map(|s| s.get_name().to_string()));
        names
    }

    /// Commands that change the active model.
    pub fn is_edit(&self) -> bool {
        !matches!(
            self,
            ShellCommand::New { .. }
                | ShellCommand::Open { .. }
                | ShellCommand::Read { .. }
                | ShellCommand::Delete { .. }
                | ShellCommand::Ls
                | ShellCommand::Members
                | ShellCommand::Show
                | ShellCommand::Tree
                | ShellCommand::Json
                | ShellCommand::Save
                | ShellCommand::Clear
        )
    }
}

pub fn parse_shell_command(
    input: &str,
) -> Result<Option<ShellCommand>, Box<dyn std::error::Error>> {
    // Use shlex to split arguments while respecting quotes
    let args = shlex::split(input).ok_or("Invalid quoting")?;

    match ShellCommand::try_parse_from(args) {
        Ok(c) => Ok(Some(c)),
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion {
                println!("{}", e);
                return Ok(None);
            }
            Err(Box::new(e))
        }
    }
}

/// Turns the `\n` escape typed on one shell line into real line breaks.
pub fn unescape_body(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ShellCommand {
        parse_shell_command(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_field_with_flags() {
        match parse("field age int --static --value 0 -v protected") {
            ShellCommand::Field {
                name,
                type_name,
                visibility,
                is_static,
                is_final,
                value,
            } => {
                assert_eq!(name, "age");
                assert_eq!(type_name, "int");
                assert_eq!(visibility, "protected");
                assert!(is_static);
                assert!(!is_final);
                assert_eq!(value.as_deref(), Some("0"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_quoted_params() {
        match parse(r#"method greet String -p "String name" -p "final int times" --body "return name;""#) {
            ShellCommand::Method { params, body, .. } => {
                assert_eq!(params, vec!["String name", "final int times"]);
                assert_eq!(body.as_deref(), Some("return name;"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_new_with_lists() {
        match parse("new Dog --extends Animal --implements Comparable,Runnable") {
            ShellCommand::New {
                name,
                extends,
                implements,
                ..
            } => {
                assert_eq!(name, "Dog");
                assert_eq!(extends, vec!["Animal"]);
                assert_eq!(implements, vec!["Comparable", "Runnable"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_rm_and_rename() {
        assert!(matches!(
            parse("rm ctor 1"),
            ShellCommand::Rm { kind: MemberKind::Ctor, .. }
        ));
        assert!(matches!(
            parse("rename class Cat"),
            ShellCommand::Rename { target: RenameTarget::Class, new_name: None, .. }
        ));
    }

    #[test]
    fn test_unknown_command_is_error() {
        assert!(parse_shell_command("frobnicate").is_err());
        assert!(parse_shell_command("field \"unterminated").is_err());
    }

    #[test]
    fn test_command_names_cover_shell() {
        let names = ShellCommand::command_names();
        for expected in ["new", "open", "accessors", "tostring", "undo", "exit"] {
            assert!(names.contains(&expected.to_string()), "{}", expected);
        }
    }

    #[test]
    fn test_unescape_body() {
        assert_eq!(unescape_body("a();\\nb();"), "a();\nb();");
    }
}
