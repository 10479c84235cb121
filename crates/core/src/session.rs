//! Editing session: the live model plus its undo history.
//!
//! Every mutating operation follows the same order: validate the request
//! against the live model, snapshot, mutate, clear redo. A rejected request
//! therefore leaves both the model and the history untouched.

use crate::error::{ClassForgeError, Result};
use crate::generate;
use crate::history::{DEFAULT_HISTORY_LIMIT, History};
use crate::model::{ClassModel, Constructor, Field, Method, Parameter, Visibility};
use crate::render::render;
use crate::scan::scan;
use crate::store::ClassStore;
use crate::validate::{IdentifierKind, JavaNamingRules, Validator};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// When colliding member names are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Adds and renames that collide fail immediately.
    #[default]
    Reject,
    /// Collisions are accepted and only caught when saving.
    Defer,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::Defer => write!(f, "defer"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = ClassForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "defer" => Ok(DuplicatePolicy::Defer),
            other => Err(ClassForgeError::InvalidOperation(format!(
                "unknown duplicate policy '{}' (expected reject or defer)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub history_limit: usize,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

/// Class-level changes for [`EditSession::set_modifiers`]. `None` keeps the
/// current setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassModifiers {
    pub is_abstract: Option<bool>,
    pub is_interface: Option<bool>,
    pub extends: Option<Vec<String>>,
}

/// Counts returned by [`EditSession::generate_accessors`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessorCount {
    pub getters: usize,
    pub setters: usize,
}

pub struct EditSession {
    model: ClassModel,
    history: History,
    validator: Box<dyn Validator>,
    config: SessionConfig,
    dirty: bool,
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("model", &self.model.name())
            .field("undo_depth", &self.history.undo_depth())
            .field("redo_depth", &self.history.redo_depth())
            .field("config", &self.config)
            .field("dirty", &self.dirty)
            .finish()
    }
}

/// Interface members are public, and every instance method is abstract.
fn as_interface_method(method: &mut Method) {
    method.visibility = Visibility::Public;
    if !method.is_static {
        method.is_abstract = true;
        method.body.clear();
    }
}

fn normalize_import(import: &str) -> String {
    let trimmed = import.trim();
    let trimmed = trimmed.strip_prefix("import ").unwrap_or(trimmed);
    trimmed.trim().trim_end_matches(';').trim().to_string()
}

impl EditSession {
    /// Starts an empty class after checking its name.
    pub fn new(name: &str, config: SessionConfig) -> Result<Self> {
        let rules = JavaNamingRules;
        rules.validate_identifier(name, IdentifierKind::Class)?;
        let mut session = Self::with_model(ClassModel::new(name), config);
        session.dirty = true;
        Ok(session)
    }

    /// Wraps an existing model, e.g. one recovered by the scanner.
    pub fn with_model(model: ClassModel, config: SessionConfig) -> Self {
        Self {
            model,
            history: History::with_limit(config.history_limit),
            validator: Box::new(JavaNamingRules),
            config,
            dirty: false,
        }
    }

    pub fn from_source(source: &str, config: SessionConfig) -> Result<Self> {
        let scanned = scan(source)?;
        if !scanned.skipped.is_empty() {
            debug!(
                "Opened {} with {} unrecognized line(s)",
                scanned.model.name(),
                scanned.skipped.len()
            );
        }
        Ok(Self::with_model(scanned.model, config))
    }

    pub fn with_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn model(&self) -> &ClassModel {
        &self.model
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether there are edits since the last save or load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn render(&self) -> String {
        render(&self.model)
    }

    /// Swaps in a whole new model. History does not span models.
    pub fn replace(&mut self, model: ClassModel) {
        info!("Replacing {} with {}", self.model.name(), model.name());
        self.model = model;
        self.history.clear();
        self.dirty = false;
    }

    /// Drops all snapshots, making the current state the undo floor.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn edit<T>(&mut self, what: &str, apply: impl FnOnce(&mut ClassModel) -> T) -> T {
        self.history.record(&self.model);
        let out = apply(&mut self.model);
        self.history.clear_redo();
        self.dirty = true;
        debug!("{}: {}", self.model.name(), what);
        out
    }

    fn rejects_duplicates(&self) -> bool {
        self.config.duplicate_policy == DuplicatePolicy::Reject
    }

    fn validate_parameters(&self, parameters: &[Parameter]) -> Result<()> {
        let mut seen: Vec<&str> = Vec::new();
        for p in parameters {
            self.validator
                .validate_identifier(&p.name, IdentifierKind::Variable)?;
            self.validator.validate_type(&p.type_name)?;
            if p.type_name == "void" {
                return Err(ClassForgeError::InvalidName(format!(
                    "Parameter '{}' cannot be void",
                    p.name
                )));
            }
            if seen.contains(&p.name.as_str()) {
                return Err(ClassForgeError::duplicate(p.name.clone()));
            }
            seen.push(&p.name);
        }
        Ok(())
    }

    fn validate_relation(&self, name: &str) -> Result<()> {
        self.validator.validate_type(name)?;
        if crate::validate::is_primitive(name) {
            return Err(ClassForgeError::InvalidName(format!(
                "Cannot inherit from primitive type: {}",
                name
            )));
        }
        Ok(())
    }

    // --- Header ---

    pub fn set_package(&mut self, package: Option<&str>) -> Result<()> {
        let package = package.map(str::trim).filter(|p| !p.is_empty());
        if let Some(p) = package {
            self.validator.validate_package_name(p)?;
        }
        let package = package.map(str::to_string);
        self.edit("set package", |m| m.set_package_name(package));
        Ok(())
    }

    pub fn add_import(&mut self, import: &str) -> Result<()> {
        let import = normalize_import(import);
        self.validator.validate_import(&import)?;
        if self.model.imports().contains(&import) {
            return Err(ClassForgeError::duplicate(import));
        }
        self.edit("add import", |m| m.add_import(import));
        Ok(())
    }

    pub fn remove_import(&mut self, import: &str) -> Result<()> {
        let import = normalize_import(import);
        if !self.model.imports().contains(&import) {
            return Err(ClassForgeError::not_found("Import", import));
        }
        self.edit("remove import", |m| m.remove_import(&import));
        Ok(())
    }

    pub fn set_abstract(&mut self, is_abstract: bool) -> Result<()> {
        self.set_modifiers(ClassModifiers {
            is_abstract: Some(is_abstract),
            ..ClassModifiers::default()
        })
    }

    pub fn set_interface(&mut self, is_interface: bool) -> Result<()> {
        self.set_modifiers(ClassModifiers {
            is_interface: Some(is_interface),
            ..ClassModifiers::default()
        })
    }

    pub fn set_extends(&mut self, names: Vec<String>) -> Result<()> {
        self.set_modifiers(ClassModifiers {
            extends: Some(names),
            ..ClassModifiers::default()
        })
    }

    /// Applies several class-level changes as one edit. The combined result
    /// is checked before anything changes, so either all of them apply or
    /// none do.
    pub fn set_modifiers(&mut self, change: ClassModifiers) -> Result<()> {
        let is_interface = change.is_interface.unwrap_or(self.model.is_interface());
        let is_abstract = change.is_abstract.unwrap_or(self.model.is_abstract());
        let extends: Option<Vec<String>> = change.extends.map(|names| {
            names
                .into_iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect()
        });

        if let Some(names) = &extends {
            for name in names {
                self.validate_relation(name)?;
                if name == self.model.name() {
                    return Err(ClassForgeError::InvalidOperation(format!(
                        "{} cannot extend itself",
                        name
                    )));
                }
            }
        }
        let extends_count = extends
            .as_ref()
            .map_or(self.model.extends_names().len(), Vec::len);

        if is_interface && !self.model.constructors().is_empty() {
            return Err(ClassForgeError::InvalidOperation(
                "remove constructors before turning a class into an interface".to_string(),
            ));
        }
        if !is_interface && extends_count > 1 {
            return Err(ClassForgeError::InvalidOperation(
                "a class can extend at most one type".to_string(),
            ));
        }
        if !is_interface && !is_abstract {
            if let Some(m) = self.model.methods().iter().find(|m| m.is_abstract) {
                return Err(ClassForgeError::InvalidOperation(format!(
                    "abstract method '{}' requires an abstract class or interface",
                    m.name
                )));
            }
        }

        let becomes_interface = is_interface && !self.model.is_interface();
        self.edit("set modifiers", |m| {
            m.set_interface(is_interface);
            m.set_abstract(is_abstract);
            if let Some(names) = extends {
                m.set_extends(names);
            }
            if becomes_interface {
                for method in m.methods_mut() {
                    as_interface_method(method);
                }
            }
        });
        Ok(())
    }

    pub fn set_implements(&mut self, names: Vec<String>) -> Result<()> {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        for (i, name) in names.iter().enumerate() {
            self.validate_relation(name)?;
            if names[..i].contains(name) {
                return Err(ClassForgeError::duplicate(name.clone()));
            }
        }
        self.edit("set implements", |m| m.set_implements(names));
        Ok(())
    }

    pub fn add_implements(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        self.validate_relation(name)?;
        if self.model.implements_names().iter().any(|n| n == name) {
            return Err(ClassForgeError::duplicate(name));
        }
        self.edit("add implements", |m| m.add_implements(name));
        Ok(())
    }

    pub fn remove_implements(&mut self, name: &str) -> Result<()> {
        if !self.model.implements_names().iter().any(|n| n == name) {
            return Err(ClassForgeError::not_found("Interface", name));
        }
        self.edit("remove implements", |m| m.remove_implements(name));
        Ok(())
    }

    // --- Members ---

    pub fn add_field(&mut self, field: Field) -> Result<()> {
        self.validator
            .validate_identifier(&field.name, IdentifierKind::Variable)?;
        self.validator.validate_type(&field.type_name)?;
        if field.type_name == "void" {
            return Err(ClassForgeError::InvalidName(format!(
                "Field '{}' cannot be void",
                field.name
            )));
        }
        if self.rejects_duplicates() && self.model.field_by_name(&field.name).is_some() {
            return Err(ClassForgeError::duplicate(field.name));
        }
        self.edit("add field", |m| m.add_field(field));
        Ok(())
    }

    /// On an interface the method is made public, and abstract unless static.
    pub fn add_method(&mut self, mut method: Method) -> Result<()> {
        if self.model.is_interface() {
            as_interface_method(&mut method);
        }
        self.validator
            .validate_identifier(&method.name, IdentifierKind::Method)?;
        self.validator.validate_type(&method.return_type)?;
        self.validate_parameters(&method.parameters)?;
        if method.is_abstract && !self.model.is_abstract() && !self.model.is_interface() {
            return Err(ClassForgeError::InvalidOperation(format!(
                "abstract method '{}' requires an abstract class or interface",
                method.name
            )));
        }
        if method.is_abstract && method.is_static {
            return Err(ClassForgeError::InvalidOperation(format!(
                "method '{}' cannot be both abstract and static",
                method.name
            )));
        }
        if self.rejects_duplicates() && self.model.method_by_name(&method.name).is_some() {
            return Err(ClassForgeError::duplicate(method.name));
        }
        self.edit("add method", |m| m.add_method(method));
        Ok(())
    }

    pub fn add_constructor(&mut self, constructor: Constructor) -> Result<()> {
        if self.model.is_interface() {
            return Err(ClassForgeError::InvalidOperation(format!(
                "interface '{}' cannot declare constructors",
                self.model.name()
            )));
        }
        self.validate_parameters(&constructor.parameters)?;
        self.edit("add constructor", |m| m.add_constructor(constructor))
    }

    pub fn remove_field(&mut self, name: &str) -> Result<Field> {
        if self.model.field_by_name(name).is_none() {
            return Err(ClassForgeError::not_found("Field", name));
        }
        self.edit("remove field", |m| m.remove_field(name))
            .ok_or_else(|| ClassForgeError::not_found("Field", name))
    }

    pub fn remove_method(&mut self, name: &str) -> Result<Method> {
        if self.model.method_by_name(name).is_none() {
            return Err(ClassForgeError::not_found("Method", name));
        }
        self.edit("remove method", |m| m.remove_method(name))
            .ok_or_else(|| ClassForgeError::not_found("Method", name))
    }

    /// Removes the constructor at `index` (0-based, declaration order).
    pub fn remove_constructor(&mut self, index: usize) -> Result<Constructor> {
        if index >= self.model.constructors().len() {
            return Err(ClassForgeError::not_found("Constructor", format!("#{}", index)));
        }
        self.edit("remove constructor", |m| m.remove_constructor(index))
            .ok_or_else(|| ClassForgeError::not_found("Constructor", format!("#{}", index)))
    }

    // --- Refactoring ---

    pub fn rename_class(&mut self, new_name: &str) -> Result<()> {
        self.validator
            .validate_identifier(new_name, IdentifierKind::Class)?;
        if self.model.extends_names().iter().any(|n| n == new_name) {
            return Err(ClassForgeError::InvalidOperation(format!(
                "{} cannot extend itself",
                new_name
            )));
        }
        self.edit("rename class", |m| m.set_name(new_name));
        Ok(())
    }

    pub fn rename_field(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if self.model.field_by_name(old_name).is_none() {
            return Err(ClassForgeError::not_found("Field", old_name));
        }
        self.validator
            .validate_identifier(new_name, IdentifierKind::Variable)?;
        if old_name != new_name
            && self.rejects_duplicates()
            && self.model.field_by_name(new_name).is_some()
        {
            return Err(ClassForgeError::duplicate(new_name));
        }
        self.edit("rename field", |m| {
            if let Some(f) = m.field_by_name_mut(old_name) {
                f.name = new_name.to_string();
            }
        });
        Ok(())
    }

    pub fn rename_method(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if self.model.method_by_name(old_name).is_none() {
            return Err(ClassForgeError::not_found("Method", old_name));
        }
        self.validator
            .validate_identifier(new_name, IdentifierKind::Method)?;
        if old_name != new_name
            && self.rejects_duplicates()
            && self.model.method_by_name(new_name).is_some()
        {
            return Err(ClassForgeError::duplicate(new_name));
        }
        self.edit("rename method", |m| {
            if let Some(method) = m.method_by_name_mut(old_name) {
                method.name = new_name.to_string();
            }
        });
        Ok(())
    }

    pub fn change_field_type(&mut self, name: &str, type_name: &str) -> Result<()> {
        if self.model.field_by_name(name).is_none() {
            return Err(ClassForgeError::not_found("Field", name));
        }
        self.validator.validate_type(type_name)?;
        if type_name == "void" {
            return Err(ClassForgeError::InvalidName(format!(
                "Field '{}' cannot be void",
                name
            )));
        }
        self.edit("change field type", |m| {
            if let Some(f) = m.field_by_name_mut(name) {
                f.type_name = type_name.to_string();
            }
        });
        Ok(())
    }

    pub fn change_method_return_type(&mut self, name: &str, return_type: &str) -> Result<()> {
        if self.model.method_by_name(name).is_none() {
            return Err(ClassForgeError::not_found("Method", name));
        }
        self.validator.validate_type(return_type)?;
        self.edit("change return type", |m| {
            if let Some(method) = m.method_by_name_mut(name) {
                method.return_type = return_type.to_string();
            }
        });
        Ok(())
    }

    // --- Generators ---

    /// Adds getters and setters for `selection` (all fields when empty).
    /// Nothing is recorded when every accessor already exists.
    pub fn generate_accessors(&mut self, selection: &[String]) -> Result<AccessorCount> {
        let accessors = generate::accessors(&self.model, selection)?;
        let count = AccessorCount {
            getters: accessors.getters.len(),
            setters: accessors.setters.len(),
        };
        if count.getters + count.setters == 0 {
            return Ok(count);
        }
        self.edit("generate accessors", |m| {
            for method in accessors.into_methods() {
                m.add_method(method);
            }
        });
        Ok(count)
    }

    pub fn generate_to_string(&mut self, overwrite: bool) -> Result<()> {
        let method = generate::to_string_method(&self.model)?;
        self.install_generated(vec![method], overwrite)
    }

    pub fn generate_equals_hash_code(&mut self, overwrite: bool) -> Result<()> {
        let methods = vec![
            generate::equals_method(&self.model)?,
            generate::hash_code_method(&self.model)?,
        ];
        self.install_generated(methods, overwrite)
    }

    fn install_generated(&mut self, methods: Vec<Method>, overwrite: bool) -> Result<()> {
        if !overwrite {
            let existing: Vec<String> = methods
                .iter()
                .filter(|m| self.model.method_by_name(&m.name).is_some())
                .map(|m| m.name.clone())
                .collect();
            if !existing.is_empty() {
                return Err(ClassForgeError::DuplicateElement { names: existing });
            }
        }
        self.edit("generate methods", |m| {
            for method in methods {
                match m.method_by_name_mut(&method.name) {
                    Some(slot) => *slot = method,
                    None => m.add_method(method),
                }
            }
        });
        Ok(())
    }

    // --- History ---

    pub fn undo(&mut self) -> Result<()> {
        if !self.history.undo(&mut self.model) {
            return Err(ClassForgeError::NothingToUndo);
        }
        self.dirty = true;
        debug!("{}: undo", self.model.name());
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        if !self.history.redo(&mut self.model) {
            return Err(ClassForgeError::NothingToRedo);
        }
        self.dirty = true;
        debug!("{}: redo", self.model.name());
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Persistence ---

    /// Fails with every colliding field and method name, in first-seen order.
    pub fn check_duplicates(&self) -> Result<()> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for f in self.model.fields() {
            *counts.entry(format!("field {}", f.name)).or_default() += 1;
        }
        for m in self.model.methods() {
            *counts.entry(format!("method {}", m.name)).or_default() += 1;
        }
        let names: Vec<String> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(name, _)| name)
            .collect();
        if names.is_empty() {
            Ok(())
        } else {
            Err(ClassForgeError::DuplicateElement { names })
        }
    }

    pub fn save(&mut self, store: &dyn ClassStore, folder: &Path) -> Result<PathBuf> {
        if let Err(e) = self.check_duplicates() {
            warn!("Refusing to save {}: {}", self.model.name(), e);
            return Err(e);
        }
        let path = store.write_atomic(folder, self.model.name(), &self.render())?;
        self.dirty = false;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditSession {
        EditSession::new("Person", SessionConfig::default()).unwrap()
    }

    fn field(name: &str, ty: &str) -> Field {
        Field::new(name, ty, Visibility::Private)
    }

    #[test]
    fn test_new_validates_class_name() {
        assert!(EditSession::new("person", SessionConfig::default()).is_err());
        assert!(EditSession::new("class", SessionConfig::default()).is_err());
        assert_eq!(session().model().name(), "Person");
    }

    #[test]
    fn test_rejected_edit_leaves_history_untouched() {
        let mut s = session();
        s.add_field(field("age", "int")).unwrap();
        let before = s.model().clone();

        assert!(matches!(
            s.add_field(field("Age", "int")),
            Err(ClassForgeError::InvalidName(_))
        ));
        assert!(matches!(
            s.add_field(field("age", "long")),
            Err(ClassForgeError::DuplicateElement { .. })
        ));
        assert_eq!(s.model(), &before);

        s.undo().unwrap();
        assert!(s.model().fields().is_empty());
        assert!(!s.can_undo());
    }

    #[test]
    fn test_undo_redo_through_session() {
        let mut s = session();
        assert!(matches!(s.undo(), Err(ClassForgeError::NothingToUndo)));

        s.add_field(field("age", "int")).unwrap();
        s.rename_field("age", "years").unwrap();
        s.undo().unwrap();
        assert_eq!(s.model().fields()[0].name, "age");
        s.redo().unwrap();
        assert_eq!(s.model().fields()[0].name, "years");
        assert!(matches!(s.redo(), Err(ClassForgeError::NothingToRedo)));

        s.undo().unwrap();
        s.change_field_type("age", "long").unwrap();
        assert!(!s.can_redo());
    }

    #[test]
    fn test_defer_policy_catches_duplicates_at_save() {
        let config = SessionConfig {
            duplicate_policy: DuplicatePolicy::Defer,
            ..SessionConfig::default()
        };
        let mut s = EditSession::new("Person", config).unwrap();
        s.add_field(field("age", "int")).unwrap();
        s.add_field(field("age", "long")).unwrap();
        s.add_method(Method::new("run", "void", Visibility::Public))
            .unwrap();
        s.add_method(Method::new("run", "int", Visibility::Public))
            .unwrap();

        match s.check_duplicates() {
            Err(ClassForgeError::DuplicateElement { names }) => {
                assert_eq!(names, vec!["field age", "method run"]);
            }
            other => panic!("expected duplicates, got {:?}", other),
        }
    }

    #[test]
    fn test_class_extends_at_most_one() {
        let mut s = session();
        let err = s
            .set_extends(vec!["Animal".into(), "Thing".into()])
            .unwrap_err();
        assert!(matches!(err, ClassForgeError::InvalidOperation(_)));

        s.set_interface(true).unwrap();
        s.set_extends(vec!["Animal".into(), "Thing".into()]).unwrap();
        assert!(s.set_interface(false).is_err());
    }

    #[test]
    fn test_interface_rejects_constructors() {
        let mut s = session();
        s.add_constructor(Constructor::new(Visibility::Public))
            .unwrap();
        assert!(s.set_interface(true).is_err());

        s.remove_constructor(0).unwrap();
        s.set_interface(true).unwrap();
        assert!(matches!(
            s.add_constructor(Constructor::new(Visibility::Public)),
            Err(ClassForgeError::InvalidOperation(_))
        ));
        assert!(s.remove_constructor(0).is_err());
    }

    #[test]
    fn test_abstract_method_needs_abstract_class() {
        let mut s = session();
        let m = Method::new("speak", "void", Visibility::Public).with_abstract(true);
        assert!(s.add_method(m.clone()).is_err());
        s.set_abstract(true).unwrap();
        s.add_method(m).unwrap();
        assert!(s.set_abstract(false).is_err());
    }

    #[test]
    fn test_interface_to_class_keeps_abstract_methods_legal() {
        let mut s = EditSession::new("Shape", SessionConfig::default()).unwrap();
        s.set_interface(true).unwrap();
        s.add_method(Method::new("area", "double", Visibility::Public).with_abstract(true))
            .unwrap();

        assert!(matches!(
            s.set_interface(false),
            Err(ClassForgeError::InvalidOperation(_))
        ));
        assert!(s.model().is_interface());

        s.set_modifiers(ClassModifiers {
            is_abstract: Some(true),
            is_interface: Some(false),
            extends: None,
        })
        .unwrap();
        assert!(s.render().contains("public abstract class Shape {"));
        s.undo().unwrap();
        assert!(s.model().is_interface());
    }

    #[test]
    fn test_interface_methods_become_public_abstract() {
        let mut s = EditSession::new("Shape", SessionConfig::default()).unwrap();
        s.set_interface(true).unwrap();
        s.add_method(Method::new("area", "double", Visibility::Private).with_body("return 1;"))
            .unwrap();
        s.add_method(
            Method::new("unit", "Shape", Visibility::Package)
                .with_static(true)
                .with_body("return null;"),
        )
        .unwrap();

        let area = s.model().method_by_name("area").unwrap();
        assert!(area.is_abstract);
        assert_eq!(area.visibility, Visibility::Public);
        assert!(area.body.is_empty());
        let unit = s.model().method_by_name("unit").unwrap();
        assert!(!unit.is_abstract);
        assert_eq!(unit.visibility, Visibility::Public);

        let text = s.render();
        assert!(text.contains("    public abstract double area();"));
        assert!(text.contains("    public static Shape unit() {"));
    }

    #[test]
    fn test_class_to_interface_makes_instance_methods_abstract() {
        let mut s = session();
        s.add_method(Method::new("speak", "void", Visibility::Public).with_body("say();"))
            .unwrap();
        s.set_interface(true).unwrap();
        assert!(s.model().methods()[0].is_abstract);
        s.undo().unwrap();
        assert!(!s.model().methods()[0].is_abstract);
        assert_eq!(s.model().methods()[0].body, "say();");
    }

    #[test]
    fn test_imports_are_normalized() {
        let mut s = session();
        s.add_import("import java.util.List;").unwrap();
        assert_eq!(s.model().imports(), ["java.util.List"]);
        assert!(s.add_import("java.util.List").is_err());
        s.remove_import("java.util.List;").unwrap();
        assert!(s.model().imports().is_empty());
    }

    #[test]
    fn test_generators_respect_overwrite() {
        let mut s = session();
        assert!(s.generate_to_string(false).is_err());

        s.add_field(field("name", "String")).unwrap();
        s.generate_to_string(false).unwrap();
        assert!(matches!(
            s.generate_to_string(false),
            Err(ClassForgeError::DuplicateElement { .. })
        ));
        s.add_field(field("age", "int")).unwrap();
        s.generate_to_string(true).unwrap();

        let methods = s.model().methods();
        assert_eq!(methods.len(), 1);
        assert!(methods[0].body.contains("age"));

        s.generate_equals_hash_code(false).unwrap();
        let count = s.generate_accessors(&[]).unwrap();
        assert_eq!(count, AccessorCount { getters: 2, setters: 2 });
        assert_eq!(s.generate_accessors(&[]).unwrap(), AccessorCount::default());
    }

    #[test]
    fn test_save_marks_clean() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        assert!(s.is_dirty());
        let path = s.save(&crate::store::FsClassStore, dir.path()).unwrap();
        assert!(!s.is_dirty());
        assert_eq!(std::fs::read_to_string(path).unwrap(), s.render());
    }

    struct AcceptAll;

    impl Validator for AcceptAll {
        fn validate_identifier(&self, _: &str, _: IdentifierKind) -> Result<()> {
            Ok(())
        }
        fn validate_type(&self, _: &str) -> Result<()> {
            Ok(())
        }
        fn validate_visibility(&self, v: &str) -> Result<Visibility> {
            v.parse()
        }
        fn validate_package_name(&self, _: &str) -> Result<()> {
            Ok(())
        }
        fn validate_import(&self, _: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_custom_validator() {
        let mut s = session().with_validator(Box::new(AcceptAll));
        s.add_field(field("Age", "int")).unwrap();
        assert_eq!(s.model().fields()[0].name, "Age");
    }

    #[test]
    fn test_replace_clears_history() {
        let mut s = session();
        s.add_field(field("age", "int")).unwrap();
        s.replace(ClassModel::new("Other"));
        assert_eq!(s.model().name(), "Other");
        assert!(!s.can_undo());
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Defer".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Defer);
        assert!("maybe".parse::<DuplicatePolicy>().is_err());
    }
}
