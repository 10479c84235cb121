//! Model to source text.
//!
//! Every formatting rule of the generated source lives in this module: the
//! per-element renderers as well as the class layout around them. Rendering
//! is pure and total; absent optional parts simply drop their clause.

use crate::model::{ClassModel, Constructor, Element, Field, Method, Parameter, Visibility};

/// One level of indentation.
pub const INDENT: &str = "    ";

/// What an element needs to know about its owning class to render itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub class_name: &'a str,
    pub is_interface: bool,
}

impl<'a> RenderContext<'a> {
    pub fn of(model: &'a ClassModel) -> Self {
        Self {
            class_name: model.name(),
            is_interface: model.is_interface(),
        }
    }
}

/// Follows every newline in `text` with one indentation unit.
pub fn reindent(text: &str) -> String {
    text.replace('\n', &format!("\n{INDENT}"))
}

fn push_keyword(out: &mut String, keyword: &str) {
    if !keyword.is_empty() {
        out.push_str(keyword);
        out.push(' ');
    }
}

fn block(header: &str, body: &str) -> String {
    let body = body.trim_end_matches(['\n', '\r']);
    let mut out = format!("{header} {{\n");
    if !body.is_empty() {
        out.push_str(INDENT);
        out.push_str(&reindent(body));
        out.push('\n');
    }
    out.push('}');
    out
}

/// Statement returned by a non-void method that has no explicit body.
pub fn default_return(return_type: &str) -> Option<&'static str> {
    match return_type {
        "void" => None,
        "boolean" => Some("return false;"),
        "int" | "long" | "byte" | "short" | "float" | "double" => Some("return 0;"),
        "char" => Some("return '\\0';"),
        _ => Some("return null;"),
    }
}

impl Parameter {
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.is_final {
            out.push_str("final ");
        }
        out.push_str(&self.type_name);
        out.push(' ');
        out.push_str(&self.name);
        out
    }
}

pub fn render_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(Parameter::render)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Field {
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        // Interface fields are constants whatever flags the model holds
        let (visibility, is_static, is_final) = if ctx.is_interface {
            (Visibility::Public, true, true)
        } else {
            (self.visibility, self.is_static, self.is_final)
        };

        let mut out = String::new();
        push_keyword(&mut out, visibility.keyword());
        if is_static {
            out.push_str("static ");
        }
        if is_final {
            out.push_str("final ");
        }
        out.push_str(&self.type_name);
        out.push(' ');
        out.push_str(&self.name);
        if let Some(value) = &self.initial_value {
            out.push_str(" = ");
            out.push_str(value);
        }
        out.push(';');
        out
    }
}

impl Method {
    pub fn render(&self, _ctx: &RenderContext<'_>) -> String {
        let mut header = String::new();
        push_keyword(&mut header, self.visibility.keyword());
        if self.is_static {
            header.push_str("static ");
        }
        if self.is_abstract {
            header.push_str("abstract ");
        }
        header.push_str(&format!(
            "{} {}({})",
            self.return_type,
            self.name,
            render_parameters(&self.parameters)
        ));

        if self.is_abstract {
            header.push(';');
            return header;
        }

        if self.body.is_empty() {
            block(&header, default_return(&self.return_type).unwrap_or(""))
        } else {
            block(&header, &self.body)
        }
    }
}

impl Constructor {
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut header = String::new();
        push_keyword(&mut header, self.visibility.keyword());
        header.push_str(&format!(
            "{}({})",
            ctx.class_name,
            render_parameters(&self.parameters)
        ));
        block(&header, &self.body)
    }
}

impl Element<'_> {
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        match self {
            Element::Field(f) => f.render(ctx),
            Element::Method(m) => m.render(ctx),
            Element::Constructor { constructor, .. } => constructor.render(ctx),
        }
    }
}

/// Declaration line of the class, without the opening brace.
pub fn render_header(model: &ClassModel) -> String {
    let mut out = String::from("public ");
    if model.is_abstract() && !model.is_interface() {
        out.push_str("abstract ");
    }
    out.push_str(if model.is_interface() {
        "interface "
    } else {
        "class "
    });
    out.push_str(model.name());

    if !model.extends_names().is_empty() {
        out.push_str(" extends ");
        out.push_str(&model.extends_names().join(", "));
    }
    if !model.is_interface() && !model.implements_names().is_empty() {
        out.push_str(" implements ");
        out.push_str(&model.implements_names().join(", "));
    }
    out
}

/// Renders the complete compilation unit for `model`.
pub fn render(model: &ClassModel) -> String {
    let ctx = RenderContext::of(model);
    let mut out = String::new();

    if let Some(package) = model.package_name() {
        out.push_str(&format!("package {package};\n\n"));
    }

    if !model.imports().is_empty() {
        for import in model.imports() {
            out.push_str(&format!("import {import};\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!("/**\n * {}\n */\n", model.name()));
    out.push_str(&render_header(model));
    out.push_str(" {\n");

    if !model.fields().is_empty() {
        for field in model.fields() {
            out.push_str(INDENT);
            out.push_str(&field.render(&ctx));
            out.push('\n');
        }
        out.push('\n');
    }

    if !model.constructors().is_empty() {
        for constructor in model.constructors() {
            push_member(&mut out, &constructor.render(&ctx));
        }
    } else if !model.is_interface() {
        let synthesized = Constructor::new(Visibility::Public);
        push_member(&mut out, &synthesized.render(&ctx));
    }

    for method in model.methods() {
        push_member(&mut out, &method.render(&ctx));
    }

    out.push_str("}\n");
    out
}

fn push_member(out: &mut String, rendered: &str) {
    out.push_str(INDENT);
    out.push_str(&reindent(rendered));
    out.push_str("\n\n");
}
