use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

pub struct ClassforgeHighlighter {
    commands: Vec<String>,
}

impl ClassforgeHighlighter {
    pub fn new(commands: Vec<String>) -> Self {
        Self { commands }
    }
}

impl Highlighter for ClassforgeHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled_text = StyledText::new();
        let mut in_quote = false;
        let mut current_pos = 0;

        for word in line.split_inclusive(char::is_whitespace) {
            let trimmed = word.trim();
            if trimmed.is_empty() {
                styled_text.push((Style::new(), word.to_string()));
                current_pos += word.len();
                continue;
            }

            let quote_count = trimmed.matches('"').count();
            let style = if in_quote || quote_count > 0 {
                Style::new().fg(Color::Green)
            } else if line[..current_pos].trim().is_empty() {
                if self.commands.iter().any(|c| c == trimmed) {
                    Style::new().fg(Color::LightGreen).bold()
                } else {
                    Style::new().fg(Color::Red)
                }
            } else if trimmed.starts_with('-') {
                Style::new().fg(Color::Cyan)
            } else if trimmed.chars().next().is_some_and(char::is_uppercase) {
                // Class and type names
                Style::new().fg(Color::Yellow)
            } else {
                Style::new()
            };
            if quote_count % 2 == 1 {
                in_quote = !in_quote;
            }

            styled_text.push((style, word.to_string()));
            current_pos += word.len();
        }

        styled_text
    }
}
