use crate::model::ClassModel;
use std::collections::VecDeque;

/// Default number of snapshots kept on the undo side.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Linear undo/redo over deep copies of the model.
///
/// Snapshots are owned deep copies, so a snapshot on either stack can never
/// observe later mutations of the live model.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<ClassModel>,
    redo: Vec<ClassModel>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Snapshots `live` before it is mutated.
    pub fn record(&mut self, live: &ClassModel) {
        self.undo.push_back(live.clone());
        if self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    /// A fresh edit invalidates forward history.
    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }

    /// Restores the previous snapshot into `live`. Returns `false`, leaving
    /// everything untouched, when there is nothing to undo.
    pub fn undo(&mut self, live: &mut ClassModel) -> bool {
        match self.undo.pop_back() {
            Some(previous) => {
                self.redo.push(std::mem::replace(live, previous));
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, live: &mut ClassModel) -> bool {
        match self.redo.pop() {
            Some(next) => {
                self.undo.push_back(std::mem::replace(live, next));
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, Visibility};

    fn with_field(name: &str) -> ClassModel {
        let mut model = ClassModel::new("Item");
        model.add_field(Field::new(name, "int", Visibility::Private));
        model
    }

    #[test]
    fn test_undo_redo_linearity() {
        let mut history = History::default();
        let mut live = ClassModel::new("Item");
        let m0 = live.clone();

        history.record(&live);
        live.add_field(Field::new("id", "int", Visibility::Private));
        history.clear_redo();
        let m1 = live.clone();

        assert!(history.undo(&mut live));
        assert_eq!(live, m0);
        assert!(history.redo(&mut live));
        assert_eq!(live, m1);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut history = History::default();
        let mut live = with_field("a");

        history.record(&live);
        live.add_field(Field::new("b", "int", Visibility::Private));
        history.clear_redo();

        assert!(history.undo(&mut live));
        assert!(history.can_redo());

        history.record(&live);
        live.add_field(Field::new("c", "int", Visibility::Private));
        history.clear_redo();

        assert!(!history.redo(&mut live));
        assert_eq!(live.fields().len(), 2);
    }

    #[test]
    fn test_empty_stacks_leave_state_unchanged() {
        let mut history = History::default();
        let mut live = with_field("a");
        let before = live.clone();
        assert!(!history.undo(&mut live));
        assert!(!history.redo(&mut live));
        assert_eq!(live, before);
    }

    #[test]
    fn test_snapshots_are_isolated_from_live_model() {
        let mut history = History::default();
        let mut live = with_field("a");

        history.record(&live);
        live.field_by_name_mut("a").unwrap().type_name = "long".into();

        assert!(history.undo(&mut live));
        assert_eq!(live.fields()[0].type_name, "int");
    }

    #[test]
    fn test_limit_drops_oldest_snapshot() {
        let mut history = History::with_limit(2);
        let mut live = ClassModel::new("Item");
        for name in ["a", "b", "c"] {
            history.record(&live);
            live.add_field(Field::new(name, "int", Visibility::Private));
        }
        assert_eq!(history.undo_depth(), 2);

        assert!(history.undo(&mut live));
        assert!(history.undo(&mut live));
        assert!(!history.undo(&mut live));
        assert_eq!(live.fields().len(), 1);
    }
}
