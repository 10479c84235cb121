//! Best-effort reverse transform from source text to a [`ClassModel`].
//!
//! The scanner classifies lines one at a time against a handful of patterns
//! (package, import, class header, field, method signature, constructor
//! signature). It never builds a syntax tree: parameters and bodies are not
//! recovered, and anything nested deeper than the class body is skipped.

use crate::error::{ClassForgeError, Result};
use crate::model::{ClassModel, Constructor, Field, Method, Visibility};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

static PACKAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^package\s+([\w$.]+)\s*;").expect("valid package pattern"));

static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^import\s+((?:static\s+)?[\w$.*]+)\s*;").expect("valid import pattern")
});

static CLASS_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:public\s+)?(abstract\s+)?(interface|class)\s+([\w$]+)(?:\s+extends\s+([\w$]+(?:\s*,\s*[\w$]+)*))?(?:\s+implements\s+([\w$]+(?:\s*,\s*[\w$]+)*))?",
    )
    .expect("valid class header pattern")
});

/// A type as written: dotted name, generic arguments (which may contain
/// spaces and one level of nesting), then any array brackets.
const TYPE: &str = r"[\w$.]+(?:\s*<(?:[^<>;()=]|<[^<>;()=]*>)*>)?(?:\s*\[\])*";

static FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?:(public|protected|private)\s+)?(static\s+)?(final\s+)?({TYPE})\s+([\w$]+)\s*(?:=\s*([^;]+))?;\s*(?://.*)?$"
    ))
    .expect("valid field pattern")
});

static METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?:(public|protected|private)\s+)?(static\s+)?(abstract\s+)?({TYPE})\s+([\w$]+)\s*\(([^)]*)\)\s*(?:throws\s+[\w$.,\s]+?)?\s*(\{{|;)"
    ))
    .expect("valid method pattern")
});

static CONSTRUCTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(public|protected|private)\s+)?([\w$]+)\s*\(([^)]*)\)\s*(?:throws\s+[\w$.,\s]+?)?\s*\{",
    )
    .expect("valid constructor pattern")
});

/// Words that can sit in the "type" slot of a pattern without being a type.
const NON_TYPE_WORDS: &[&str] = &[
    "abstract", "break", "case", "catch", "class", "continue", "default", "do", "else",
    "extends", "final", "for", "if", "implements", "import", "interface", "new", "package",
    "private", "protected", "public", "return", "static", "super", "switch", "synchronized",
    "this", "throw", "try", "while", "yield",
];

/// A non-blank class-level line that matched no pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub number: usize,
    pub text: String,
}

/// Outcome of a successful scan: the recovered model plus every line the
/// scanner could not classify. Parameters and bodies are always empty.
#[derive(Debug, Clone)]
pub struct Scanned {
    pub model: ClassModel,
    pub skipped: Vec<SkippedLine>,
}

#[derive(Debug)]
struct Header {
    name: String,
    is_abstract: bool,
    is_interface: bool,
    extends_names: Vec<String>,
    implements_names: Vec<String>,
}

#[derive(Debug, Default)]
struct ScanState {
    header: Option<Header>,
    package: Option<String>,
    imports: Vec<String>,
    fields: Vec<Field>,
    methods: Vec<Method>,
    constructors: Vec<Constructor>,
    skipped: Vec<SkippedLine>,
}

pub fn scan(source: &str) -> Result<Scanned> {
    let normalized = source.replace("\r\n", "\n");
    let mut state = ScanState::default();
    let mut depth: i32 = 0;
    let mut in_block_comment = false;

    for (idx, raw) in normalized.split(['\n', '\r']).enumerate() {
        let line = raw.trim();

        if in_block_comment {
            if line.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }
        if line.starts_with("/*") {
            in_block_comment = !line.contains("*/");
            continue;
        }

        // Only the class body level carries declarations
        if depth <= 1 {
            classify(&mut state, idx + 1, line);
        }
        depth += brace_delta(line);
    }

    let Some(header) = state.header else {
        return Err(ClassForgeError::StructureNotFound);
    };

    let mut model = ClassModel::new(header.name);
    model.set_package_name(state.package);
    model.set_abstract(header.is_abstract);
    model.set_interface(header.is_interface);
    model.set_extends(header.extends_names);
    model.set_implements(header.implements_names);
    for import in state.imports {
        model.add_import(import);
    }
    for field in state.fields {
        model.add_field(field);
    }
    for constructor in state.constructors {
        model.add_constructor(constructor)?;
    }
    for method in state.methods {
        model.add_method(method);
    }

    debug!(
        "Scanned {}: {} fields, {} constructors, {} methods, {} skipped lines",
        model.name(),
        model.fields().len(),
        model.constructors().len(),
        model.methods().len(),
        state.skipped.len()
    );

    Ok(Scanned {
        model,
        skipped: state.skipped,
    })
}

fn classify(state: &mut ScanState, number: usize, line: &str) {
    if is_trivial(line) {
        return;
    }

    if state.header.is_none() {
        if let Some(caps) = PACKAGE.captures(line) {
            state.package = Some(caps[1].to_string());
            return;
        }
        if let Some(caps) = IMPORT.captures(line) {
            state.imports.push(caps[1].to_string());
            return;
        }
        if let Some(caps) = CLASS_HEADER.captures(line) {
            state.header = Some(Header {
                name: caps[3].to_string(),
                is_abstract: caps.get(1).is_some(),
                is_interface: &caps[2] == "interface",
                extends_names: split_names(caps.get(4).map(|m| m.as_str())),
                implements_names: split_names(caps.get(5).map(|m| m.as_str())),
            });
            return;
        }
    }

    if let Some(caps) = FIELD.captures(line) {
        if is_type_token(&caps[4]) {
            let field = Field::new(&caps[5], &caps[4], visibility(&caps))
                .with_static(caps.get(2).is_some())
                .with_final(caps.get(3).is_some())
                .with_initial_value(caps.get(6).map_or("", |m| m.as_str().trim()));
            state.fields.push(field);
            return;
        }
    }

    if let Some(caps) = METHOD.captures(line) {
        if is_type_token(&caps[4]) {
            let method = Method::new(&caps[5], &caps[4], visibility(&caps))
                .with_static(caps.get(2).is_some())
                .with_abstract(caps.get(3).is_some());
            state.methods.push(method);
            return;
        }
    }

    if let Some(header) = &state.header {
        if !header.is_interface {
            if let Some(caps) = CONSTRUCTOR.captures(line) {
                if caps[2] == header.name {
                    state.constructors.push(Constructor::new(visibility(&caps)));
                    return;
                }
            }
        }
    }

    state.skipped.push(SkippedLine {
        number,
        text: line.to_string(),
    });
}

/// Blank lines, braces and comments are expected noise, not skipped declarations.
fn is_trivial(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("//")
        || line.starts_with('*')
        || line.chars().all(|c| matches!(c, '{' | '}' | ';' | ' ' | '\t'))
}

fn is_type_token(token: &str) -> bool {
    !NON_TYPE_WORDS.contains(&token)
}

fn visibility(caps: &Captures<'_>) -> Visibility {
    match caps.get(1).map(|m| m.as_str()) {
        Some("public") => Visibility::Public,
        Some("private") => Visibility::Private,
        Some("protected") => Visibility::Protected,
        _ => Visibility::Package,
    }
}

fn split_names(list: Option<&str>) -> Vec<String> {
    list.map(|l| {
        l.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Net change in brace depth over one line, ignoring braces inside string
/// and char literals and after a line comment.
fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev = '\0';

    for c in line.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            prev = c;
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '/' if prev == '/' => break,
            '{' => delta += 1,
            '}' => delta -= 1,
            _ => {}
        }
        prev = c;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_variants() {
        let scanned = scan("public abstract class Dog extends Animal implements Comparable, Cloneable {\n}")
            .unwrap();
        let model = scanned.model;
        assert_eq!(model.name(), "Dog");
        assert!(model.is_abstract());
        assert!(!model.is_interface());
        assert_eq!(model.extends_name(), Some("Animal"));
        assert_eq!(model.implements_names(), ["Comparable", "Cloneable"]);

        let model = scan("interface Walker extends Mover, Named {").unwrap().model;
        assert!(model.is_interface());
        assert_eq!(model.extends_names(), ["Mover", "Named"]);
    }

    #[test]
    fn test_missing_header_is_structure_not_found() {
        let err = scan("private int x;\npublic void run() {\n}\n").unwrap_err();
        assert!(matches!(err, ClassForgeError::StructureNotFound));
        assert!(matches!(scan(""), Err(ClassForgeError::StructureNotFound)));
    }

    #[test]
    fn test_first_header_wins() {
        let source = "class Outer {\n    class Inner {\n    }\n}\n";
        let model = scan(source).unwrap().model;
        assert_eq!(model.name(), "Outer");
    }

    #[test]
    fn test_fields_with_modifiers_and_initializers() {
        let source = "public class Config {\n\
                      private static final int LIMIT = 10;\n\
                      String label;\n\
                      protected List<String> tags = new ArrayList<>();\n\
                      }";
        let model = scan(source).unwrap().model;
        let fields = model.fields();
        assert_eq!(fields.len(), 3);

        assert_eq!(fields[0].name, "LIMIT");
        assert!(fields[0].is_static && fields[0].is_final);
        assert_eq!(fields[0].initial_value.as_deref(), Some("10"));

        assert_eq!(fields[1].visibility, Visibility::Package);
        assert_eq!(fields[1].type_name, "String");

        assert_eq!(fields[2].type_name, "List<String>");
        assert_eq!(fields[2].initial_value.as_deref(), Some("new ArrayList<>()"));
    }

    #[test]
    fn test_method_signatures_without_parameters_or_bodies() {
        let source = "public abstract class Shape {\n\
                      public abstract double area(int scale);\n\
                      public static Shape unit() {\n\
                      int size = 1;\n\
                      return new Square(size);\n\
                      }\n\
                      }";
        let model = scan(source).unwrap().model;
        assert!(model.fields().is_empty(), "body statements must not become fields");

        let methods = model.methods();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].name, "area");
        assert!(methods[0].is_abstract);
        assert!(methods[0].parameters.is_empty());
        assert_eq!(methods[1].return_type, "Shape");
        assert!(methods[1].is_static);
        assert!(methods[1].body.is_empty());
    }

    #[test]
    fn test_constructor_signatures_are_recognized() {
        let source = "public class Point {\n\
                      public Point(int x, int y) {\n\
                      this.x = x;\n\
                      }\n\
                      Point() {\n\
                      }\n\
                      }";
        let model = scan(source).unwrap().model;
        assert!(model.methods().is_empty());
        assert_eq!(model.constructors().len(), 2);
        assert_eq!(model.constructors()[0].visibility, Visibility::Public);
        assert_eq!(model.constructors()[1].visibility, Visibility::Package);
    }

    #[test]
    fn test_package_imports_and_comments() {
        let source = "package com.example.zoo;\r\n\
                      import java.util.List;\r\n\
                      import static java.lang.Math.max;\r\n\
                      /*\r\n\
                      private int hidden;\r\n\
                      */\r\n\
                      // private int alsoHidden;\r\n\
                      public class Zoo {\r\n\
                      @Deprecated\r\n\
                      private int size;\r\n\
                      }\r\n";
        let scanned = scan(source).unwrap();
        let model = scanned.model;
        assert_eq!(model.package_name(), Some("com.example.zoo"));
        assert_eq!(model.imports(), ["java.util.List", "static java.lang.Math.max"]);
        assert_eq!(model.fields().len(), 1);
        assert_eq!(model.fields()[0].name, "size");

        assert_eq!(scanned.skipped.len(), 1);
        assert_eq!(scanned.skipped[0].number, 9);
        assert_eq!(scanned.skipped[0].text, "@Deprecated");
    }

    #[test]
    fn test_braces_in_literals_do_not_change_depth() {
        assert_eq!(brace_delta("String s = \"{{\";"), 0);
        assert_eq!(brace_delta("char c = '{'; // }"), 0);
        assert_eq!(brace_delta("public void run() {"), 1);
        assert_eq!(brace_delta("} else {"), 0);
    }
}
