use crate::error::{ClassForgeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level of a declaration. `Package` is the implicit, keyword-less level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    #[default]
    Package,
}

impl Visibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Package => "",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Package => f.write_str("package-private"),
            other => f.write_str(other.keyword()),
        }
    }
}

impl FromStr for Visibility {
    type Err = ClassForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "protected" => Ok(Visibility::Protected),
            "" | "package" | "package-private" => Ok(Visibility::Package),
            other => Err(ClassForgeError::InvalidName(format!(
                "Invalid visibility modifier: {}. Must be 'public', 'private', 'protected', or empty for package-private",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub is_final: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_final: false,
        }
    }

    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    /// Parses a declaration such as `final String name` or `int count`.
    pub fn parse_decl(decl: &str) -> Option<Self> {
        let mut tokens: Vec<&str> = decl.split_whitespace().collect();
        let is_final = tokens.first() == Some(&"final");
        if is_final {
            tokens.remove(0);
        }
        match tokens.as_slice() {
            [type_name, name] => Some(Parameter::new(*name, *type_name).with_final(is_final)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub visibility: Visibility,
    pub type_name: String,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Raw initializer expression, rendered verbatim after `=`.
    pub initial_value: Option<String>,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            name: name.into(),
            visibility,
            type_name: type_name.into(),
            is_final: false,
            is_static: false,
            initial_value: None,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.initial_value = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub visibility: Visibility,
    /// `"void"` when the method returns nothing.
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    /// Raw statement text. Empty means no explicit body.
    #[serde(default)]
    pub body: String,
}

impl Method {
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            name: name.into(),
            visibility,
            return_type: return_type.into(),
            parameters: Vec::new(),
            is_static: false,
            is_abstract: false,
            body: String::new(),
        }
    }

    pub fn with_param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn is_void(&self) -> bool {
        self.return_type == "void"
    }
}

/// A constructor carries no name of its own: it always takes the name of
/// the class that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Constructor {
    pub visibility: Visibility,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub body: String,
}

impl Constructor {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            parameters: Vec::new(),
            body: String::new(),
        }
    }

    pub fn with_param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Field,
    Constructor,
    Method,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Field => f.write_str("field"),
            ElementKind::Constructor => f.write_str("constructor"),
            ElementKind::Method => f.write_str("method"),
        }
    }
}

/// Borrowed view over any named, visibility-bearing declaration of a class.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    Field(&'a Field),
    Method(&'a Method),
    Constructor {
        owner: &'a str,
        constructor: &'a Constructor,
    },
}

impl<'a> Element<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Element::Field(f) => &f.name,
            Element::Method(m) => &m.name,
            Element::Constructor { owner, .. } => owner,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            Element::Field(f) => f.visibility,
            Element::Method(m) => m.visibility,
            Element::Constructor { constructor, .. } => constructor.visibility,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Field(_) => ElementKind::Field,
            Element::Method(_) => ElementKind::Method,
            Element::Constructor { .. } => ElementKind::Constructor,
        }
    }

    /// One-line summary: the field type, or the parameter list and return type.
    pub fn signature(&self) -> String {
        let params = |ps: &[Parameter]| {
            ps.iter()
                .map(|p| p.type_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            Element::Field(f) => f.type_name.clone(),
            Element::Method(m) => format!("({}) -> {}", params(&m.parameters), m.return_type),
            Element::Constructor { constructor, .. } => {
                format!("({})", params(&constructor.parameters))
            }
        }
    }

    pub fn modifiers(&self) -> Vec<&'static str> {
        let mut mods = Vec::new();
        match self {
            Element::Field(f) => {
                if f.is_static {
                    mods.push("static");
                }
                if f.is_final {
                    mods.push("final");
                }
            }
            Element::Method(m) => {
                if m.is_static {
                    mods.push("static");
                }
                if m.is_abstract {
                    mods.push("abstract");
                }
            }
            Element::Constructor { .. } => {}
        }
        mods
    }
}
