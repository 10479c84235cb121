use classforge_core::model::{ClassModel, ElementKind};
use classforge_core::scan::SkippedLine;
use nu_ansi_term::{Color, Style};
use tabled::settings::Style as TableStyle;
use tabled::{Table, Tabled};

/// One row of the `members` table.
#[derive(Tabled)]
pub struct MemberView {
    #[tabled(rename = "#")]
    pub index: String,
    pub kind: String,
    pub name: String,
    pub visibility: String,
    pub signature: String,
    pub modifiers: String,
}

#[derive(Tabled)]
pub struct ClassFileView {
    pub class: String,
    pub status: String,
}

#[derive(Tabled)]
pub struct SkippedLineView {
    pub line: usize,
    pub text: String,
}

/// Rows in declaration order. Constructors are numbered from 1 for `rm ctor`.
pub fn member_views(model: &ClassModel) -> Vec<MemberView> {
    let mut ctor_index = 0;
    model
        .elements()
        .iter()
        .map(|element| {
            let index = if element.kind() == ElementKind::Constructor {
                ctor_index += 1;
                ctor_index.to_string()
            } else {
                "-".to_string()
            };
            let visibility = match element.visibility().keyword() {
                "" => "package".to_string(),
                kw => kw.to_string(),
            };
            let modifiers = element.modifiers().join(" ");
            MemberView {
                index,
                kind: element.kind().to_string(),
                name: element.name().to_string(),
                visibility,
                signature: element.signature(),
                modifiers: if modifiers.is_empty() { "-".to_string() } else { modifiers },
            }
        })
        .collect()
}

pub fn members_table(model: &ClassModel) -> String {
    let views = member_views(model);
    if views.is_empty() {
        return "NO MEMBERS".to_string();
    }
    Table::new(&views).with(TableStyle::psql()).to_string()
}

pub fn class_list(names: &[String], active: Option<&str>) -> String {
    if names.is_empty() {
        return "NO CLASSES FOUND".to_string();
    }
    let views: Vec<ClassFileView> = names
        .iter()
        .map(|name| ClassFileView {
            class: name.clone(),
            status: if Some(name.as_str()) == active {
                "open".to_string()
            } else {
                "-".to_string()
            },
        })
        .collect();
    Table::new(&views).with(TableStyle::psql()).to_string()
}

pub fn skipped_lines(skipped: &[SkippedLine]) -> String {
    let views: Vec<SkippedLineView> = skipped
        .iter()
        .map(|s| SkippedLineView {
            line: s.number,
            text: s.text.clone(),
        })
        .collect();
    format!(
        "Unrecognized lines (not recovered):\n{}",
        Table::new(&views).with(TableStyle::psql())
    )
}

/// The class, its package, and its parents as an indented tree.
pub fn inheritance_tree(model: &ClassModel) -> String {
    let kind = if model.is_interface() {
        "interface"
    } else if model.is_abstract() {
        "abstract class"
    } else {
        "class"
    };
    let mut out = format!(
        "{} {}",
        Color::LightBlue.bold().paint(kind),
        Color::Yellow.bold().paint(model.name())
    );
    if let Some(pkg) = model.package_name() {
        out.push_str(&format!(" ({})", pkg));
    }

    let mut branches: Vec<(&str, String)> = Vec::new();
    if !model.extends_names().is_empty() {
        branches.push(("extends", model.extends_names().join(", ")));
    }
    if !model.implements_names().is_empty() {
        branches.push(("implements", model.implements_names().join(", ")));
    }
    for (i, (label, names)) in branches.iter().enumerate() {
        let branch = if i + 1 == branches.len() { "└──" } else { "├──" };
        out.push_str(&format!("\n{} {}: {}", branch, label, names));
    }
    out
}

const KEYWORDS: &[&str] = &[
    "package", "import", "public", "private", "protected", "class", "interface", "abstract",
    "static", "final", "extends", "implements", "return", "new", "this", "if", "else", "null",
    "true", "false",
];

const TYPES: &[&str] = &[
    "void", "int", "long", "short", "byte", "float", "double", "boolean", "char", "String",
    "Object",
];

/// ANSI-colors one line of Java source. Words only; no parsing.
pub fn highlight_java(line: &str) -> String {
    if line.trim_start().starts_with("//") {
        return Color::DarkGray.paint(line).to_string();
    }

    let mut out = String::new();
    let mut word = String::new();
    let mut in_string = false;

    let flush = |word: &mut String, out: &mut String| {
        if word.is_empty() {
            return;
        }
        let style = if KEYWORDS.contains(&word.as_str()) {
            Color::Blue.bold()
        } else if TYPES.contains(&word.as_str()) {
            Style::new().fg(Color::Cyan)
        } else {
            Style::new()
        };
        out.push_str(&style.paint(word.as_str()).to_string());
        word.clear();
    };

    for ch in line.chars() {
        if in_string {
            word.push(ch);
            if ch == '"' {
                out.push_str(&Color::Green.paint(word.as_str()).to_string());
                word.clear();
                in_string = false;
            }
        } else if ch == '"' {
            flush(&mut word, &mut out);
            word.push(ch);
            in_string = true;
        } else if ch.is_alphanumeric() || ch == '_' || ch == '$' {
            word.push(ch);
        } else {
            flush(&mut word, &mut out);
            out.push(ch);
        }
    }
    if in_string {
        out.push_str(&Color::Green.paint(word.as_str()).to_string());
    } else {
        flush(&mut word, &mut out);
    }
    out
}

/// Source with a line-number gutter and highlighting.
pub fn preview(code: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let width = lines.len().to_string().len();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let number = Color::DarkGray.paint(format!("{:>width$} |", i + 1, width = width));
            format!("{} {}", number, highlight_java(line))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
