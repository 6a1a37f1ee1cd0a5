//! Document IR: everything a single `.aidl` file can declare.
//!
//! A file declares either exactly one interface or a sequence of
//! parcelables. [`Document`] is the closed set of those two shapes.

use serde::Serialize;

/// Spelling of the `void` type.
pub const VOID_TYPE: &str = "void";

/// Join a dotted package and a simple name into a qualified name.
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}

/// Split a qualified name into `(package, simple name)`.
/// `a.b.Foo` → `("a.b", "Foo")`, `Foo` → `("", "Foo")`.
pub fn split_qualified(qualified: &str) -> (&str, &str) {
    match qualified.rfind('.') {
        Some(pos) => (&qualified[..pos], &qualified[pos + 1..]),
        None => ("", qualified),
    }
}

// ── Types and arguments ─────────────────────────────────────────────

/// A type as spelled at a use site (return type or argument).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    /// Type name as written, e.g. `int`, `Foo`, `a.b.Foo`, `List<String>`.
    pub name: String,

    /// Whether the use site appends `[]`.
    pub is_array: bool,

    /// Source line of the use site.
    pub line: u32,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            is_array: false,
            line,
        }
    }

    pub fn array(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            is_array: true,
            line,
        }
    }

    /// True for a plain `void` (not `void[]`).
    pub fn is_void(&self) -> bool {
        self.name == VOID_TYPE && !self.is_array
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_array {
            write!(f, "{}[]", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Data flow direction of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    In,
    Out,
    InOut,
}

/// A single method argument.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub ty: TypeRef,

    /// Effective direction. Unspecified directions are `In`.
    pub direction: Direction,

    /// Whether `in`/`out`/`inout` was written explicitly.
    pub direction_specified: bool,

    pub name: String,
    pub line: u32,
}

impl Argument {
    /// Argument with no explicit direction (treated as `in`).
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        let line = ty.line;
        Self {
            ty,
            direction: Direction::In,
            direction_specified: false,
            name: name.into(),
            line,
        }
    }

    /// Argument with an explicit direction.
    pub fn with_direction(ty: TypeRef, direction: Direction, name: impl Into<String>) -> Self {
        Self {
            direction,
            direction_specified: true,
            ..Self::new(ty, name)
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self.direction, Direction::In | Direction::InOut)
    }

    pub fn is_out(&self) -> bool {
        matches!(self.direction, Direction::Out | Direction::InOut)
    }
}

// ── Methods ─────────────────────────────────────────────────────────

/// A method signature on an interface.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Method {
    /// Declared `oneway` on the method itself.
    pub oneway: bool,

    pub return_type: TypeRef,
    pub name: String,
    pub arguments: Vec<Argument>,

    /// Transaction id. `None` until assigned unless written explicitly
    /// (`void foo() = 7;`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    pub line: u32,
}

impl Method {
    pub fn new(return_type: TypeRef, name: impl Into<String>, line: u32) -> Self {
        Self {
            oneway: false,
            return_type,
            name: name.into(),
            arguments: Vec::new(),
            id: None,
            line,
        }
    }

    pub fn oneway(mut self) -> Self {
        self.oneway = true;
        self
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn arg(mut self, arg: Argument) -> Self {
        self.arguments.push(arg);
        self
    }

    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }
}

// ── Declarations ────────────────────────────────────────────────────

/// A binder interface declaration.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Interface {
    pub name: String,

    /// Dotted package, possibly empty.
    pub package: String,

    pub line: u32,

    /// Every method is fire-and-forget.
    pub oneway: bool,

    pub methods: Vec<Method>,

    /// File the interface was declared in.
    pub source_path: String,
}

impl Interface {
    pub fn new(
        package: impl Into<String>,
        name: impl Into<String>,
        line: u32,
        source_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            line,
            oneway: false,
            methods: Vec::new(),
            source_path: source_path.into(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn qualified_name(&self) -> String {
        qualify(&self.package, &self.name)
    }

    /// Effective oneway status of a method: either the method or the
    /// enclosing interface may set it.
    pub fn is_oneway_method(&self, method: &Method) -> bool {
        self.oneway || method.oneway
    }
}

/// A parcelable (data-only) declaration.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Parcelable {
    pub name: String,
    pub package: String,
    pub line: u32,
}

impl Parcelable {
    pub fn new(package: impl Into<String>, name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            line,
        }
    }

    pub fn qualified_name(&self) -> String {
        qualify(&self.package, &self.name)
    }
}

/// The declarations of one parsed file.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub enum Document {
    /// Exactly one interface.
    Interface(Interface),
    /// One or more parcelables, in declaration order.
    Parcelables(Vec<Parcelable>),
}

impl Document {
    pub fn as_interface(&self) -> Option<&Interface> {
        match self {
            Document::Interface(iface) => Some(iface),
            Document::Parcelables(_) => None,
        }
    }

    /// Take the interface out of the document, or give the document back.
    pub fn into_interface(self) -> Result<Interface, Document> {
        match self {
            Document::Interface(iface) => Ok(iface),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_names() {
        assert_eq!(qualify("a.b", "Foo"), "a.b.Foo");
        assert_eq!(qualify("", "Foo"), "Foo");
        assert_eq!(split_qualified("a.b.Foo"), ("a.b", "Foo"));
        assert_eq!(split_qualified("Foo"), ("", "Foo"));
    }

    #[test]
    fn argument_directions() {
        let implicit = Argument::new(TypeRef::new("int", 3), "x");
        assert!(implicit.is_in());
        assert!(!implicit.is_out());
        assert!(!implicit.direction_specified);

        let inout = Argument::with_direction(TypeRef::new("Foo", 3), Direction::InOut, "f");
        assert!(inout.is_in());
        assert!(inout.is_out());
        assert!(inout.direction_specified);
    }

    #[test]
    fn oneway_is_union_of_method_and_interface() {
        let mut iface = Interface::new("a", "IFoo", 1, "a/IFoo.aidl")
            .method(Method::new(TypeRef::new("void", 2), "plain", 2))
            .method(Method::new(TypeRef::new("void", 3), "fire", 3).oneway());

        assert!(!iface.is_oneway_method(&iface.methods[0]));
        assert!(iface.is_oneway_method(&iface.methods[1]));

        iface.oneway = true;
        assert!(iface.is_oneway_method(&iface.methods[0]));
    }

    #[test]
    fn document_into_interface() {
        let doc = Document::Parcelables(vec![Parcelable::new("a", "P", 1)]);
        assert!(doc.as_interface().is_none());
        assert!(doc.into_interface().is_err());

        let doc = Document::Interface(Interface::new("a", "IFoo", 1, "a/IFoo.aidl"));
        assert_eq!(doc.into_interface().unwrap().qualified_name(), "a.IFoo");
    }

    #[test]
    fn method_serializes_without_unassigned_id() {
        let m = Method::new(TypeRef::array("int", 4), "values", 4);
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["return_type"]["is_array"], true);
    }
}
