//! Lexical gate applied to user-supplied names before they enter a model.

use crate::error::{ClassForgeError, Result};
use crate::model::Visibility;
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier pattern"));

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

const PRIMITIVES: &[&str] = &[
    "int", "long", "short", "byte", "float", "double", "boolean", "char", "void",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Class,
    Variable,
    Method,
}

impl IdentifierKind {
    fn label(&self) -> &'static str {
        match self {
            IdentifierKind::Class => "Class name",
            IdentifierKind::Variable => "Variable name",
            IdentifierKind::Method => "Method name",
        }
    }
}

pub trait Validator: Send + Sync {
    fn validate_identifier(&self, name: &str, kind: IdentifierKind) -> Result<()>;
    fn validate_type(&self, type_name: &str) -> Result<()>;
    fn validate_visibility(&self, visibility: &str) -> Result<Visibility>;
    fn validate_package_name(&self, package: &str) -> Result<()>;
    /// `import` target without the keyword or semicolon, e.g. `java.util.*`.
    fn validate_import(&self, import: &str) -> Result<()>;
}

pub fn is_primitive(type_name: &str) -> bool {
    PRIMITIVES.contains(&type_name)
}

pub fn is_keyword(word: &str) -> bool {
    JAVA_KEYWORDS.contains(&word)
}

fn invalid(reason: String) -> ClassForgeError {
    ClassForgeError::InvalidName(reason)
}

/// Java lexical rules plus the usual naming conventions: classes start
/// uppercase, variables and methods lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaNamingRules;

impl JavaNamingRules {
    fn check_dotted(&self, dotted: &str, what: &str) -> Result<()> {
        for part in dotted.split('.') {
            if !IDENTIFIER.is_match(part) || is_keyword(part) {
                return Err(invalid(format!("Invalid {} part: '{}'", what, part)));
            }
        }
        Ok(())
    }
}

impl Validator for JavaNamingRules {
    fn validate_identifier(&self, name: &str, kind: IdentifierKind) -> Result<()> {
        let label = kind.label();
        let Some(first) = name.chars().next() else {
            return Err(invalid(format!("{} cannot be empty", label)));
        };
        if !IDENTIFIER.is_match(name) {
            return Err(invalid(format!("Invalid {} format: {}", label.to_lowercase(), name)));
        }
        if is_keyword(name) {
            return Err(invalid(format!("{} cannot be a Java keyword: {}", label, name)));
        }
        match kind {
            IdentifierKind::Class if !first.is_uppercase() => Err(invalid(format!(
                "{} should start with an uppercase letter: {}",
                label, name
            ))),
            IdentifierKind::Variable if !first.is_lowercase() && first != '_' => {
                Err(invalid(format!(
                    "{} should start with a lowercase letter or underscore: {}",
                    label, name
                )))
            }
            IdentifierKind::Method if !first.is_lowercase() => Err(invalid(format!(
                "{} should start with a lowercase letter: {}",
                label, name
            ))),
            _ => Ok(()),
        }
    }

    fn validate_type(&self, type_name: &str) -> Result<()> {
        let trimmed = type_name.trim();
        if trimmed.is_empty() {
            return Err(invalid("Type cannot be empty".to_string()));
        }

        let mut base = trimmed;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped.trim_end();
        }
        if is_primitive(base) {
            return Ok(());
        }

        // Flat generics only: `Map<String, Integer>` but not `List<List<T>>`
        let (raw, args) = match base.split_once('<') {
            Some((raw, rest)) => match rest.strip_suffix('>') {
                Some(args) if !args.contains('<') && !args.contains('>') => (raw, Some(args)),
                _ => return Err(invalid(format!("Invalid type: {}", type_name))),
            },
            None => (base, None),
        };

        self.check_dotted(raw.trim(), "type")
            .map_err(|_| invalid(format!("Invalid type: {}", type_name)))?;

        if let Some(args) = args {
            for arg in args.split(',').map(str::trim) {
                if arg == "?" {
                    continue;
                }
                let arg = arg.trim_end_matches("[]");
                if is_primitive(arg) && arg != "void" {
                    return Err(invalid(format!(
                        "Invalid type: {} (type arguments cannot be primitive)",
                        type_name
                    )));
                }
                self.check_dotted(arg, "type")
                    .map_err(|_| invalid(format!("Invalid type: {}", type_name)))?;
            }
        }
        Ok(())
    }

    fn validate_visibility(&self, visibility: &str) -> Result<Visibility> {
        visibility.parse()
    }

    fn validate_package_name(&self, package: &str) -> Result<()> {
        if package.is_empty() {
            return Ok(());
        }
        self.check_dotted(package, "package name")?;
        if package.chars().any(char::is_uppercase) {
            return Err(invalid(format!(
                "Package names should be lowercase: {}",
                package
            )));
        }
        Ok(())
    }

    fn validate_import(&self, import: &str) -> Result<()> {
        let target = import.strip_prefix("static ").unwrap_or(import).trim();
        let target = target.strip_suffix(".*").unwrap_or(target);
        if target.is_empty() || !target.contains('.') {
            return Err(invalid(format!("Invalid import: '{}'", import)));
        }
        self.check_dotted(target, "import")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_conventions() {
        let rules = JavaNamingRules;
        assert!(rules.validate_identifier("Person", IdentifierKind::Class).is_ok());
        assert!(rules.validate_identifier("person", IdentifierKind::Class).is_err());
        assert!(rules.validate_identifier("age", IdentifierKind::Variable).is_ok());
        assert!(rules.validate_identifier("_age", IdentifierKind::Variable).is_ok());
        assert!(rules.validate_identifier("Age", IdentifierKind::Variable).is_err());
        assert!(rules.validate_identifier("getAge", IdentifierKind::Method).is_ok());
        assert!(rules.validate_identifier("class", IdentifierKind::Variable).is_err());
        assert!(rules.validate_identifier("2fast", IdentifierKind::Variable).is_err());
        assert!(rules.validate_identifier("", IdentifierKind::Method).is_err());
    }

    #[test]
    fn test_error_carries_reason() {
        let err = JavaNamingRules
            .validate_identifier("Order", IdentifierKind::Method)
            .unwrap_err();
        assert!(err.to_string().contains("lowercase"));
    }

    #[test]
    fn test_types() {
        let rules = JavaNamingRules;
        for ok in [
            "int",
            "int[]",
            "String[][]",
            "java.util.List",
            "List<String>",
            "Map<String, Integer>",
            "List<?>",
        ] {
            assert!(rules.validate_type(ok).is_ok(), "{} should be valid", ok);
        }
        for bad in ["", "class", "List<List<String>>", "List<int>", "Foo-Bar", "List<"] {
            assert!(rules.validate_type(bad).is_err(), "{} should be invalid", bad);
        }
    }

    #[test]
    fn test_visibility_and_package() {
        let rules = JavaNamingRules;
        assert_eq!(rules.validate_visibility("").unwrap(), Visibility::Package);
        assert!(rules.validate_visibility("friend").is_err());

        assert!(rules.validate_package_name("").is_ok());
        assert!(rules.validate_package_name("com.example.app").is_ok());
        assert!(rules.validate_package_name("com.Example").is_err());
        assert!(rules.validate_package_name("com..example").is_err());
        assert!(rules.validate_package_name("com.new").is_err());
    }

    #[test]
    fn test_imports() {
        let rules = JavaNamingRules;
        assert!(rules.validate_import("java.util.List").is_ok());
        assert!(rules.validate_import("java.util.*").is_ok());
        assert!(rules.validate_import("static org.junit.Assert.assertEquals").is_ok());
        assert!(rules.validate_import("List").is_err());
        assert!(rules.validate_import("java.util.").is_err());
        assert!(rules.validate_import("").is_err());
    }
}
