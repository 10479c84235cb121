use super::context::ShellContext;
use reedline::{Completer, Span, Suggestion};

pub struct ClassforgeCompleter {
    pub commands: Vec<String>,
    pub context: ShellContext,
}

impl ClassforgeCompleter {
    pub fn new(commands: Vec<String>, context: ShellContext) -> Self {
        Self { commands, context }
    }

    /// Candidate words for the argument after `cmd`, or `None` when the
    /// command takes no completable argument.
    fn candidates(&self, cmd: &str, arg_index: usize) -> Option<Vec<String>> {
        match (cmd, arg_index) {
            ("open" | "read" | "delete", 0) => Some(self.context.class_names()),
            ("rm", 0) => Some(vec!["field".into(), "method".into(), "ctor".into()]),
            ("retype", 0) => Some(vec!["field".into(), "method".into()]),
            ("rename", 0) => Some(vec!["class".into(), "field".into(), "method".into()]),
            ("rm" | "rename" | "retype", 1) | ("accessors", _) => {
                Some(self.context.member_names())
            }
            _ => None,
        }
    }
}

fn suggestion(value: String, description: Option<String>, start: usize, end: usize) -> Suggestion {
    Suggestion {
        value,
        description,
        style: None,
        extra: None,
        span: Span { start, end },
        append_whitespace: true,
        match_indices: None,
    }
}

impl Completer for ClassforgeCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line = &line[..pos.min(line.len())];
        let trimmed = line.trim_start();

        // Command completion (at start of line)
        if !trimmed.contains(' ') {
            return self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(trimmed))
                .map(|cmd| suggestion(cmd.clone(), None, pos - trimmed.len(), pos))
                .collect();
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let Some(cmd) = parts.first() else {
            return vec![];
        };
        let last_word = if line.ends_with(' ') {
            ""
        } else {
            parts.last().copied().unwrap_or("")
        };
        let arg_index = if last_word.is_empty() {
            parts.len() - 1
        } else {
            parts.len() - 2
        };

        let Some(mut words) = self.candidates(cmd, arg_index) else {
            return vec![];
        };
        words.sort();
        words.dedup();

        let span_start = pos - last_word.len();
        words
            .into_iter()
            .filter(|w| w.starts_with(last_word))
            .map(|w| suggestion(w, None, span_start, pos))
            .collect()
    }
}
