//! Boilerplate members derived from a model's fields.

use crate::error::{ClassForgeError, Result};
use crate::model::{ClassModel, Field, Method, Parameter, Visibility};
use crate::validate::is_primitive;

/// Accessors to add, in field order. Names already taken are left out.
#[derive(Debug, Default)]
pub struct Accessors {
    pub getters: Vec<Method>,
    pub setters: Vec<Method>,
}

impl Accessors {
    pub fn into_methods(self) -> impl Iterator<Item = Method> {
        // Interleave so each getter sits next to its setter
        let mut setters = self.setters.into_iter().peekable();
        let mut out = Vec::new();
        for getter in self.getters {
            let field = accessor_field(&getter.name).to_string();
            out.push(getter);
            if let Some(setter) = setters.next_if(|s| accessor_field(&s.name) == field) {
                out.push(setter);
            }
        }
        out.extend(setters);
        out.into_iter()
    }
}

fn accessor_field(method_name: &str) -> &str {
    method_name
        .strip_prefix("get")
        .or_else(|| method_name.strip_prefix("set"))
        .or_else(|| method_name.strip_prefix("is"))
        .unwrap_or(method_name)
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn ensure_generatable<'a>(model: &'a ClassModel, what: &str) -> Result<&'a [Field]> {
    if model.is_interface() {
        return Err(ClassForgeError::InvalidOperation(format!(
            "interfaces cannot have {}",
            what
        )));
    }
    if model.fields().is_empty() {
        return Err(ClassForgeError::InvalidOperation(format!(
            "no fields to generate {} for",
            what
        )));
    }
    Ok(model.fields())
}

/// Getters for every selected field and setters for the non-final ones.
/// An empty selection means all fields.
pub fn accessors(model: &ClassModel, selection: &[String]) -> Result<Accessors> {
    let fields = ensure_generatable(model, "getters/setters")?;

    let selected: Vec<&Field> = if selection.is_empty() {
        fields.iter().collect()
    } else {
        selection
            .iter()
            .map(|name| {
                model
                    .field_by_name(name)
                    .ok_or_else(|| ClassForgeError::not_found("Field", name.as_str()))
            })
            .collect::<Result<_>>()?
    };

    let mut taken: Vec<String> = model.methods().iter().map(|m| m.name.clone()).collect();
    let mut out = Accessors::default();

    for field in selected {
        let capitalized = capitalize(&field.name);
        let prefix = if field.type_name == "boolean" { "is" } else { "get" };

        let getter_name = format!("{}{}", prefix, capitalized);
        if !taken.contains(&getter_name) {
            out.getters.push(
                Method::new(&getter_name, &field.type_name, Visibility::Public)
                    .with_static(field.is_static)
                    .with_body(format!("return {};", field.name)),
            );
            taken.push(getter_name);
        }

        if field.is_final {
            continue;
        }
        let setter_name = format!("set{}", capitalized);
        if !taken.contains(&setter_name) {
            let target = if field.is_static {
                format!("{}.{}", model.name(), field.name)
            } else {
                format!("this.{}", field.name)
            };
            out.setters.push(
                Method::new(&setter_name, "void", Visibility::Public)
                    .with_static(field.is_static)
                    .with_param(Parameter::new(&field.name, &field.type_name))
                    .with_body(format!("{} = {};", target, field.name)),
            );
            taken.push(setter_name);
        }
    }
    Ok(out)
}

pub fn to_string_method(model: &ClassModel) -> Result<Method> {
    let fields = ensure_generatable(model, "a toString method")?;
    let instance: Vec<&Field> = fields.iter().filter(|f| !f.is_static).collect();

    let mut body = format!("return \"{}{{\" +\n", model.name());
    for (i, field) in instance.iter().enumerate() {
        let lead = if i == 0 { "" } else { ", " };
        body.push_str(&format!(
            "    \"{}{}=\" + {} +\n",
            lead, field.name, field.name
        ));
    }
    body.push_str("    \"}\";");

    Ok(Method::new("toString", "String", Visibility::Public).with_body(body))
}

pub fn equals_method(model: &ClassModel) -> Result<Method> {
    let fields = ensure_generatable(model, "equals/hashCode methods")?;
    let class = model.name();

    let mut body = String::from("if (this == obj) return true;\n");
    body.push_str("if (obj == null || getClass() != obj.getClass()) return false;\n\n");
    body.push_str(&format!("{class} other = ({class}) obj;\n\n"));

    for field in fields.iter().filter(|f| !f.is_static) {
        let name = &field.name;
        let line = match field.type_name.as_str() {
            "float" => format!("if (Float.compare(other.{name}, {name}) != 0) return false;\n"),
            "double" => format!("if (Double.compare(other.{name}, {name}) != 0) return false;\n"),
            t if is_primitive(t) => format!("if ({name} != other.{name}) return false;\n"),
            _ => format!(
                "if ({name} != null ? !{name}.equals(other.{name}) : other.{name} != null) return false;\n"
            ),
        };
        body.push_str(&line);
    }
    body.push_str("\nreturn true;");

    Ok(Method::new("equals", "boolean", Visibility::Public)
        .with_param(Parameter::new("obj", "Object"))
        .with_body(body))
}

pub fn hash_code_method(model: &ClassModel) -> Result<Method> {
    let fields = ensure_generatable(model, "equals/hashCode methods")?;

    let mut body = String::from("int result = 17;\n");
    let mut declared_temp = false;
    for field in fields.iter().filter(|f| !f.is_static) {
        let name = &field.name;
        match field.type_name.as_str() {
            "boolean" => body.push_str(&format!("result = 31 * result + ({name} ? 1 : 0);\n")),
            "byte" | "short" | "char" | "int" => {
                body.push_str(&format!("result = 31 * result + {name};\n"))
            }
            "long" => body.push_str(&format!(
                "result = 31 * result + (int) ({name} ^ ({name} >>> 32));\n"
            )),
            "float" => body.push_str(&format!(
                "result = 31 * result + Float.floatToIntBits({name});\n"
            )),
            "double" => {
                let decl = if declared_temp { "" } else { "long " };
                declared_temp = true;
                body.push_str(&format!("{decl}temp = Double.doubleToLongBits({name});\n"));
                body.push_str("result = 31 * result + (int) (temp ^ (temp >>> 32));\n");
            }
            _ => body.push_str(&format!(
                "result = 31 * result + ({name} != null ? {name}.hashCode() : 0);\n"
            )),
        }
    }
    body.push_str("return result;");

    Ok(Method::new("hashCode", "int", Visibility::Public).with_body(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> ClassModel {
        let mut model = ClassModel::new("Person");
        model.add_field(Field::new("name", "String", Visibility::Private));
        model.add_field(Field::new("active", "boolean", Visibility::Private));
        model.add_field(Field::new("id", "long", Visibility::Private).with_final(true));
        model
    }

    #[test]
    fn test_accessors_for_all_fields() {
        let acc = accessors(&person(), &[]).unwrap();
        let getters: Vec<_> = acc.getters.iter().map(|m| m.name.as_str()).collect();
        let setters: Vec<_> = acc.setters.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(getters, vec!["getName", "isActive", "getId"]);
        assert_eq!(setters, vec!["setName", "setActive"]);

        assert_eq!(acc.getters[0].body, "return name;");
        assert_eq!(acc.setters[0].parameters[0].type_name, "String");
        assert_eq!(acc.setters[0].body, "this.name = name;");
    }

    #[test]
    fn test_accessors_skip_existing_names() {
        let mut model = person();
        model.add_method(Method::new("getName", "String", Visibility::Public));
        let acc = accessors(&model, &["name".to_string()]).unwrap();
        assert!(acc.getters.is_empty());
        assert_eq!(acc.setters.len(), 1);
    }

    #[test]
    fn test_accessors_interleave() {
        let acc = accessors(&person(), &[]).unwrap();
        let names: Vec<_> = acc.into_methods().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec!["getName", "setName", "isActive", "setActive", "getId"]
        );
    }

    #[test]
    fn test_unknown_field_selection() {
        let err = accessors(&person(), &["nope".to_string()]).unwrap_err();
        assert!(matches!(err, ClassForgeError::NotFound { .. }));
    }

    #[test]
    fn test_interface_and_empty_models_are_rejected() {
        let mut iface = person();
        iface.set_interface(true);
        assert!(matches!(
            to_string_method(&iface),
            Err(ClassForgeError::InvalidOperation(_))
        ));
        assert!(matches!(
            equals_method(&ClassModel::new("Empty")),
            Err(ClassForgeError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_to_string_body() {
        let method = to_string_method(&person()).unwrap();
        assert_eq!(
            method.body,
            "return \"Person{\" +\n    \"name=\" + name +\n    \", active=\" + active +\n    \", id=\" + id +\n    \"}\";"
        );
    }

    #[test]
    fn test_equals_and_hash_code_bodies() {
        let equals = equals_method(&person()).unwrap();
        assert!(equals.body.contains("Person other = (Person) obj;"));
        assert!(equals.body.contains(
            "if (name != null ? !name.equals(other.name) : other.name != null) return false;"
        ));
        assert!(equals.body.contains("if (id != other.id) return false;"));
        assert!(equals.body.ends_with("return true;"));

        let hash = hash_code_method(&person()).unwrap();
        assert!(hash.body.contains("result = 31 * result + (active ? 1 : 0);"));
        assert!(hash.body.contains("result = 31 * result + (int) (id ^ (id >>> 32));"));
        assert!(hash.body.ends_with("return result;"));
    }

    #[test]
    fn test_hash_code_declares_temp_once() {
        let mut model = ClassModel::new("Point");
        model.add_field(Field::new("x", "double", Visibility::Private));
        model.add_field(Field::new("y", "double", Visibility::Private));
        let body = hash_code_method(&model).unwrap().body;
        assert_eq!(body.matches("long temp").count(), 1);
        assert_eq!(body.matches("temp = Double.doubleToLongBits").count(), 2);
    }
}
