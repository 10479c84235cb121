use super::element::{Constructor, Element, Field, Method};
use crate::error::{ClassForgeError, Result};
use serde::{Deserialize, Serialize};

/// Structural model of one class or interface.
///
/// The model is deliberately permissive: it accepts duplicate member names,
/// leaving uniqueness to the editing layer. `Clone` is a full deep copy, as
/// every collection is owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModel {
    name: String,
    package_name: Option<String>,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    is_abstract: bool,
    #[serde(default)]
    is_interface: bool,
    #[serde(default)]
    extends_names: Vec<String>,
    #[serde(default)]
    implements_names: Vec<String>,
    #[serde(default)]
    fields: Vec<Field>,
    #[serde(default)]
    constructors: Vec<Constructor>,
    #[serde(default)]
    methods: Vec<Method>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_name: None,
            imports: Vec::new(),
            is_abstract: false,
            is_interface: false,
            extends_names: Vec::new(),
            implements_names: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    // --- Identity ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    pub fn set_package_name(&mut self, package: Option<String>) {
        self.package_name = package.filter(|p| !p.trim().is_empty());
    }

    // --- Structural flags ---

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn set_abstract(&mut self, is_abstract: bool) {
        self.is_abstract = is_abstract;
    }

    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    pub fn set_interface(&mut self, is_interface: bool) {
        self.is_interface = is_interface;
    }

    // --- Relations ---

    pub fn extends_names(&self) -> &[String] {
        &self.extends_names
    }

    /// The single superclass of a class (or the first parent of an interface).
    pub fn extends_name(&self) -> Option<&str> {
        self.extends_names.first().map(String::as_str)
    }

    pub fn set_extends(&mut self, names: Vec<String>) {
        self.extends_names = names;
    }

    pub fn implements_names(&self) -> &[String] {
        &self.implements_names
    }

    pub fn add_implements(&mut self, name: impl Into<String>) {
        self.implements_names.push(name.into());
    }

    pub fn remove_implements(&mut self, name: &str) -> bool {
        remove_first(&mut self.implements_names, |n| n == name).is_some()
    }

    pub fn set_implements(&mut self, names: Vec<String>) {
        self.implements_names = names;
    }

    // --- Imports ---

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn add_import(&mut self, import: impl Into<String>) {
        self.imports.push(import.into());
    }

    pub fn remove_import(&mut self, import: &str) -> bool {
        remove_first(&mut self.imports, |i| i == import).is_some()
    }

    // --- Fields ---

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn remove_field(&mut self, name: &str) -> Option<Field> {
        remove_first(&mut self.fields, |f| f.name == name)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_name_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    // --- Methods ---

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut [Method] {
        &mut self.methods
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.push(method);
    }

    pub fn remove_method(&mut self, name: &str) -> Option<Method> {
        remove_first(&mut self.methods, |m| m.name == name)
    }

    pub fn method_by_name(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn method_by_name_mut(&mut self, name: &str) -> Option<&mut Method> {
        self.methods.iter_mut().find(|m| m.name == name)
    }

    // --- Constructors ---

    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    pub fn add_constructor(&mut self, constructor: Constructor) -> Result<()> {
        if self.is_interface {
            return Err(ClassForgeError::InvalidOperation(format!(
                "interface '{}' cannot declare constructors",
                self.name
            )));
        }
        self.constructors.push(constructor);
        Ok(())
    }

    pub fn remove_constructor(&mut self, index: usize) -> Option<Constructor> {
        if index < self.constructors.len() {
            Some(self.constructors.remove(index))
        } else {
            None
        }
    }

    /// All declarations in output order: fields, constructors, methods.
    pub fn elements(&self) -> Vec<Element<'_>> {
        let fields = self.fields.iter().map(Element::Field);
        let ctors = self.constructors.iter().map(|c| Element::Constructor {
            owner: &self.name,
            constructor: c,
        });
        let methods = self.methods.iter().map(Element::Method);
        fields.chain(ctors).chain(methods).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn remove_first<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> Option<T> {
    let idx = items.iter().position(pred)?;
    Some(items.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parameter, Visibility};

    fn sample() -> ClassModel {
        let mut model = ClassModel::new("Person");
        model.add_field(Field::new("name", "String", Visibility::Private));
        model.add_method(
            Method::new("greet", "void", Visibility::Public)
                .with_param(Parameter::new("other", "Person")),
        );
        model
            .add_constructor(
                Constructor::new(Visibility::Public).with_param(Parameter::new("name", "String")),
            )
            .unwrap();
        model.add_import("java.util.List");
        model.add_implements("Comparable");
        model
    }

    #[test]
    fn test_lookup_is_first_match() {
        let mut model = sample();
        model.add_field(Field::new("name", "int", Visibility::Public));

        assert_eq!(model.fields().len(), 2);
        assert_eq!(model.field_by_name("name").unwrap().type_name, "String");
        assert!(model.field_by_name("missing").is_none());

        let removed = model.remove_field("name").unwrap();
        assert_eq!(removed.type_name, "String");
        assert_eq!(model.field_by_name("name").unwrap().type_name, "int");
    }

    #[test]
    fn test_clone_does_not_alias() {
        let original = sample();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.method_by_name_mut("greet").unwrap().parameters[0].name = "peer".into();
        copy.field_by_name_mut("name").unwrap().is_final = true;
        copy.add_import("java.util.Map");
        copy.remove_implements("Comparable");

        assert_eq!(original.methods()[0].parameters[0].name, "other");
        assert!(!original.fields()[0].is_final);
        assert_eq!(original.imports().len(), 1);
        assert_eq!(original.implements_names(), ["Comparable".to_string()]);
    }

    #[test]
    fn test_interface_rejects_constructor() {
        let mut model = ClassModel::new("Shape");
        model.set_interface(true);
        let err = model
            .add_constructor(Constructor::new(Visibility::Public))
            .unwrap_err();
        assert!(matches!(err, ClassForgeError::InvalidOperation(_)));
        assert!(model.constructors().is_empty());
    }

    #[test]
    fn test_elements_in_declaration_order() {
        let model = sample();
        let names: Vec<_> = model.elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["name", "Person", "greet"]);
    }

    #[test]
    fn test_blank_package_is_none() {
        let mut model = ClassModel::new("A");
        model.set_package_name(Some("  ".into()));
        assert!(model.package_name().is_none());
        model.set_package_name(Some("com.example".into()));
        assert_eq!(model.package_name(), Some("com.example"));
    }

    #[test]
    fn test_json_roundtrip() {
        let model = sample();
        let json = model.to_json().unwrap();
        let back: ClassModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
