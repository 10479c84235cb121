use super::command::{unescape_body, MemberKind, RenameTarget, RetypeTarget, ShellCommand};
use super::context::ShellContext;
use super::view;
use classforge_core::error::ClassForgeError;
use classforge_core::model::{Constructor, Field, Method, Parameter, Visibility};
use classforge_core::scan::scan;
use classforge_core::session::{ClassModifiers, EditSession};
use classforge_core::store::class_path;
use tracing::info;

type HandlerResult = Result<String, Box<dyn std::error::Error>>;

pub trait CommandHandler {
    fn handle(&self, cmd: &ShellCommand, context: &mut ShellContext) -> HandlerResult;
}

fn parse_visibility(raw: &str) -> Result<Visibility, ClassForgeError> {
    raw.parse()
}

fn parse_params(raw: &[String]) -> Result<Vec<Parameter>, ClassForgeError> {
    raw.iter()
        .map(|decl| {
            Parameter::parse_decl(decl).ok_or_else(|| {
                ClassForgeError::InvalidName(format!(
                    "Invalid parameter '{}', expected e.g. \"String name\"",
                    decl
                ))
            })
        })
        .collect()
}

fn preview(context: &ShellContext) -> HandlerResult {
    Ok(context.with_session(|s| view::preview(&s.render()))?)
}

/// Class files: new, open, read, delete, ls, save.
pub struct FileHandler;

impl FileHandler {
    fn new_class(
        context: &ShellContext,
        name: &str,
        interface: bool,
        is_abstract: bool,
        extends: &[String],
        implements: &[String],
        package: Option<&str>,
    ) -> HandlerResult {
        let mut session = EditSession::new(name, context.config.session)?;
        session.set_modifiers(ClassModifiers {
            is_abstract: Some(is_abstract),
            is_interface: Some(interface),
            extends: Some(extends.to_vec()),
        })?;
        if !implements.is_empty() {
            session.set_implements(implements.to_vec())?;
        }
        if package.is_some() {
            session.set_package(package)?;
        }
        session.clear_history();

        let mut out = String::new();
        if context.store.exists(context.folder(), name) {
            out.push_str(&format!(
                "Warning: {}.java already exists and will be overwritten on save.\n",
                name
            ));
        }
        if let Some(previous) = context.set_session(Some(session)) {
            if previous.is_dirty() {
                out.push_str(&format!(
                    "Discarded unsaved changes to {}.\n",
                    previous.model().name()
                ));
            }
        }
        out.push_str(&preview(context)?);
        Ok(out)
    }

    fn open(context: &ShellContext, name: &str) -> HandlerResult {
        let path = class_path(context.folder(), name);
        let text = context.store.read(&path)?;
        let scanned = scan(&text)?;

        let mut out = String::new();
        if scanned.model.name() != name {
            out.push_str(&format!(
                "Note: {}.java declares {}.\n",
                name,
                scanned.model.name()
            ));
        }
        if !scanned.skipped.is_empty() {
            out.push_str(&view::skipped_lines(&scanned.skipped));
            out.push('\n');
        }
        let session = EditSession::with_model(scanned.model, context.config.session);
        if let Some(previous) = context.set_session(Some(session)) {
            if previous.is_dirty() {
                out.push_str(&format!(
                    "Discarded unsaved changes to {}.\n",
                    previous.model().name()
                ));
            }
        }
        info!("Opened {}", path.display());
        out.push_str(&preview(context)?);
        Ok(out)
    }

    fn read(context: &ShellContext, name: &str) -> HandlerResult {
        let text = context.store.read(&class_path(context.folder(), name))?;
        let scanned = scan(&text)?;
        Ok(format!(
            "{}\n\n{}",
            view::inheritance_tree(&scanned.model),
            view::preview(&classforge_core::render(&scanned.model))
        ))
    }
}

impl CommandHandler for FileHandler {
    fn handle(&self, cmd: &ShellCommand, context: &mut ShellContext) -> HandlerResult {
        match cmd {
            ShellCommand::New {
                name,
                interface,
                is_abstract,
                extends,
                implements,
                package,
            } => Self::new_class(
                context,
                name,
                *interface,
                *is_abstract,
                extends,
                implements,
                package.as_deref(),
            ),
            ShellCommand::Open { name } => Self::open(context, name),
            ShellCommand::Read { name } => Self::read(context, name),
            ShellCommand::Delete { name } => {
                context.store.delete(context.folder(), name)?;
                Ok(format!("Deleted {}.java", name))
            }
            ShellCommand::Ls => {
                let names = context.store.list(context.folder())?;
                let active = context.prompt_state().map(|(name, _)| name);
                Ok(view::class_list(&names, active.as_deref()))
            }
            ShellCommand::Save => {
                let store = context.store.clone();
                let folder = context.folder().clone();
                let path = context.with_session_mut(|s| s.save(store.as_ref(), &folder))?;
                Ok(format!("Saved to {}", path.display()))
            }
            _ => Ok(String::new()),
        }
    }
}

/// Read-only views of the active class.
pub struct ViewHandler;

impl CommandHandler for ViewHandler {
    fn handle(&self, cmd: &ShellCommand, context: &mut ShellContext) -> HandlerResult {
        let out = match cmd {
            ShellCommand::Members => context.with_session(|s| view::members_table(s.model()))?,
            ShellCommand::Show => context.with_session(|s| view::preview(&s.render()))?,
            ShellCommand::Tree => context.with_session(|s| view::inheritance_tree(s.model()))?,
            ShellCommand::Json => context.with_session(|s| s.model().to_json())??,
            _ => String::new(),
        };
        Ok(out)
    }
}

/// Structural edits; each one prints the preview afterwards.
pub struct EditHandler;

impl EditHandler {
    fn apply(cmd: &ShellCommand, s: &mut EditSession) -> Result<Option<String>, ClassForgeError> {
        match cmd {
            ShellCommand::Package { name } => s.set_package(name.as_deref())?,
            ShellCommand::Import { name, remove } => {
                if *remove {
                    s.remove_import(name)?
                } else {
                    s.add_import(name)?
                }
            }
            ShellCommand::Modifiers {
                is_abstract,
                interface,
                extends,
                no_extends,
            } => s.set_modifiers(ClassModifiers {
                is_abstract: *is_abstract,
                is_interface: *interface,
                extends: if *no_extends {
                    Some(Vec::new())
                } else {
                    extends.clone()
                },
            })?,
            ShellCommand::Implement { name, remove } => {
                if *remove {
                    s.remove_implements(name)?
                } else {
                    s.add_implements(name)?
                }
            }
            ShellCommand::Field {
                name,
                type_name,
                visibility,
                is_static,
                is_final,
                value,
            } => {
                let mut field = Field::new(name, type_name, parse_visibility(visibility)?)
                    .with_static(*is_static)
                    .with_final(*is_final);
                if let Some(v) = value {
                    field = field.with_initial_value(v.as_str());
                }
                s.add_field(field)?;
            }
            ShellCommand::Method {
                name,
                return_type,
                params,
                visibility,
                is_static,
                is_abstract,
                body,
            } => {
                let mut method = Method::new(name, return_type, parse_visibility(visibility)?)
                    .with_static(*is_static)
                    .with_abstract(*is_abstract);
                for p in parse_params(params)? {
                    method = method.with_param(p);
                }
                if let Some(b) = body {
                    method = method.with_body(unescape_body(b));
                }
                s.add_method(method)?;
            }
            ShellCommand::Ctor {
                params,
                visibility,
                body,
            } => {
                let mut ctor = Constructor::new(parse_visibility(visibility)?);
                for p in parse_params(params)? {
                    ctor = ctor.with_param(p);
                }
                if let Some(b) = body {
                    ctor = ctor.with_body(unescape_body(b));
                }
                s.add_constructor(ctor)?;
            }
            ShellCommand::Rm { kind, target } => match kind {
                MemberKind::Field => {
                    s.remove_field(target)?;
                }
                MemberKind::Method => {
                    s.remove_method(target)?;
                }
                MemberKind::Ctor => {
                    let index = target
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .ok_or_else(|| ClassForgeError::not_found("Constructor", target.as_str()))?;
                    s.remove_constructor(index)?;
                }
            },
            ShellCommand::Rename {
                target,
                name,
                new_name,
            } => match (target, new_name) {
                (RenameTarget::Class, None) => s.rename_class(name)?,
                (RenameTarget::Field, Some(new_name)) => s.rename_field(name, new_name)?,
                (RenameTarget::Method, Some(new_name)) => s.rename_method(name, new_name)?,
                (RenameTarget::Class, Some(_)) => {
                    return Err(ClassForgeError::InvalidOperation(
                        "usage: rename class <NEW_NAME>".to_string(),
                    ))
                }
                (_, None) => {
                    return Err(ClassForgeError::InvalidOperation(
                        "usage: rename field|method <OLD> <NEW>".to_string(),
                    ))
                }
            },
            ShellCommand::Retype {
                target,
                name,
                type_name,
            } => match target {
                RetypeTarget::Field => s.change_field_type(name, type_name)?,
                RetypeTarget::Method => s.change_method_return_type(name, type_name)?,
            },
            ShellCommand::Accessors { fields } => {
                let count = s.generate_accessors(fields)?;
                return Ok(Some(format!(
                    "Generated {} getter(s) and {} setter(s).",
                    count.getters, count.setters
                )));
            }
            ShellCommand::Tostring { overwrite } => s.generate_to_string(*overwrite)?,
            ShellCommand::Equals { overwrite } => s.generate_equals_hash_code(*overwrite)?,
            ShellCommand::Undo => s.undo()?,
            ShellCommand::Redo => s.redo()?,
            _ => {}
        }
        Ok(None)
    }
}

impl CommandHandler for EditHandler {
    fn handle(&self, cmd: &ShellCommand, context: &mut ShellContext) -> HandlerResult {
        let note = context.with_session_mut(|s| Self::apply(cmd, s))?;
        let preview = preview(context)?;
        Ok(match note {
            Some(note) => format!("{}\n{}", note, preview),
            None => preview,
        })
    }
}

pub struct ClearHandler;

impl CommandHandler for ClearHandler {
    fn handle(&self, _cmd: &ShellCommand, _context: &mut ShellContext) -> HandlerResult {
        Ok(String::new())
    }
}

pub fn get_handler(cmd: &ShellCommand) -> Box<dyn CommandHandler> {
    match cmd {
        ShellCommand::Clear => Box::new(ClearHandler),
        ShellCommand::Members | ShellCommand::Show | ShellCommand::Tree | ShellCommand::Json => {
            Box::new(ViewHandler)
        }
        c if c.is_edit() => Box::new(EditHandler),
        _ => Box::new(FileHandler),
    }
}
