use super::ShellConfig;
use classforge_core::error::{ClassForgeError, Result};
use classforge_core::session::EditSession;
use classforge_core::store::ClassStore;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// State shared between the command loop and the line editor's completer.
#[derive(Clone)]
pub struct ShellContext {
    pub config: ShellConfig,
    pub store: Arc<dyn ClassStore>,
    session: Arc<RwLock<Option<EditSession>>>,
}

impl ShellContext {
    pub fn new(config: ShellConfig, store: Arc<dyn ClassStore>) -> Self {
        Self {
            config,
            store,
            session: Arc::new(RwLock::new(None)),
        }
    }

    pub fn folder(&self) -> &PathBuf {
        &self.config.folder
    }

    /// Makes `session` the active one, returning the one it displaced.
    pub fn set_session(&self, session: Option<EditSession>) -> Option<EditSession> {
        let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, session)
    }

    pub fn with_session<T>(&self, f: impl FnOnce(&EditSession) -> T) -> Result<T> {
        let guard = self.session.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(f).ok_or(ClassForgeError::NoActiveClass)
    }

    pub fn with_session_mut<T>(&self, f: impl FnOnce(&mut EditSession) -> Result<T>) -> Result<T> {
        let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(session) => f(session),
            None => Err(ClassForgeError::NoActiveClass),
        }
    }

    /// Active class name and whether it has unsaved edits.
    pub fn prompt_state(&self) -> Option<(String, bool)> {
        self.with_session(|s| (s.model().name().to_string(), s.is_dirty()))
            .ok()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.with_session(EditSession::is_dirty).unwrap_or(false)
    }

    /// Names of the active class's fields and methods, for completion.
    pub fn member_names(&self) -> Vec<String> {
        self.with_session(|s| {
            let model = s.model();
            model
                .fields()
                .iter()
                .map(|f| f.name.clone())
                .chain(model.methods().iter().map(|m| m.name.clone()))
                .collect()
        })
        .unwrap_or_default()
    }

    /// Classes stored in the folder; empty when the folder cannot be read.
    pub fn class_names(&self) -> Vec<String> {
        self.store.list(&self.config.folder).unwrap_or_default()
    }
}
