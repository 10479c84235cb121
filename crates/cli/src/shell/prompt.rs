use nu_ansi_term::Color;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch};
use std::borrow::Cow;

pub struct DefaultPrompt {
    /// Active class name and its unsaved-changes flag.
    active: Option<(String, bool)>,
}

impl DefaultPrompt {
    pub fn new(active: Option<(String, bool)>) -> Self {
        Self { active }
    }
}

impl Prompt for DefaultPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        let prefix = Color::LightBlue.bold().paint("classforge");
        match &self.active {
            Some((name, dirty)) => {
                let marker = if *dirty { "*" } else { "" };
                let class = Color::Yellow.paint(format!("{}{}", name, marker));
                Cow::Owned(format!("{} {} > ", prefix, class))
            }
            None => Cow::Owned(format!("{} > ", prefix)),
        }
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(".. ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("(search) ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_marks_unsaved_class() {
        let prompt = DefaultPrompt::new(Some(("Person".to_string(), true)));
        assert!(prompt.render_prompt_left().contains("Person*"));

        let prompt = DefaultPrompt::new(Some(("Person".to_string(), false)));
        let left = prompt.render_prompt_left();
        assert!(left.contains("Person"));
        assert!(!left.contains('*'));

        let prompt = DefaultPrompt::new(None);
        assert!(prompt.render_prompt_left().contains("classforge"));
    }
}
