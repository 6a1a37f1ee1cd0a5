//! A registered, language-bindable type.

use serde::Serialize;

/// Where a type came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeKind {
    /// Shipped with the namespace (`int`, `String`, ...).
    BuiltIn,
    /// User-declared parcelable.
    Parcelable,
    /// User-declared binder interface.
    Interface,
    /// Generated on first use (`List<T>`, `Map<K,V>`).
    Container,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TypeKind::BuiltIn => "built in type",
            TypeKind::Parcelable => "parcelable",
            TypeKind::Interface => "interface",
            TypeKind::Container => "container",
        })
    }
}

/// A Type Namespace entry.
///
/// `aidl_name` is the registry key: the qualified IDL spelling
/// (`int`, `a.b.Foo`, `List<String>`). `lang_name` is what a generator
/// writes in the target language.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Type {
    pub kind: TypeKind,

    /// Declaring package, empty for built-ins.
    pub package: String,

    pub aidl_name: String,
    pub lang_name: String,

    /// Headers (C++) or imports (Java) the generator must emit.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,

    pub read_method: String,
    pub write_method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_array_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_array_method: Option<String>,

    /// Declaration site for user types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Needs no generator scaffolding beyond a direct read/write.
    pub primitive: bool,

    /// Scalar values of this type may be `out`/`inout`.
    pub can_be_out: bool,

    pub can_write_to_parcel: bool,
}

impl Type {
    /// A built-in type with no array form.
    pub fn builtin(
        aidl_name: impl Into<String>,
        lang_name: impl Into<String>,
        read_method: impl Into<String>,
        write_method: impl Into<String>,
    ) -> Self {
        Self {
            kind: TypeKind::BuiltIn,
            package: String::new(),
            aidl_name: aidl_name.into(),
            lang_name: lang_name.into(),
            headers: Vec::new(),
            read_method: read_method.into(),
            write_method: write_method.into(),
            read_array_method: None,
            write_array_method: None,
            src_file: None,
            line: None,
            primitive: false,
            can_be_out: false,
            can_write_to_parcel: true,
        }
    }

    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.headers.push(header.into());
        self
    }

    pub fn with_array(mut self, read: impl Into<String>, write: impl Into<String>) -> Self {
        self.read_array_method = Some(read.into());
        self.write_array_method = Some(write.into());
        self
    }

    pub fn with_source(mut self, file: impl Into<String>, line: u32) -> Self {
        self.src_file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn primitive(mut self) -> Self {
        self.primitive = true;
        self
    }

    pub fn out_capable(mut self) -> Self {
        self.can_be_out = true;
        self
    }

    pub fn not_parcelable(mut self) -> Self {
        self.can_write_to_parcel = false;
        self
    }

    pub fn can_be_array(&self) -> bool {
        self.read_array_method.is_some()
    }

    /// Simple name: last dotted segment of `aidl_name`.
    pub fn short_name(&self) -> &str {
        if self.package.is_empty() {
            &self.aidl_name
        } else {
            aidl_ir::split_qualified(&self.aidl_name).1
        }
    }

    pub fn read_method(&self, is_array: bool) -> Option<&str> {
        if is_array {
            self.read_array_method.as_deref()
        } else {
            Some(&self.read_method)
        }
    }

    pub fn write_method(&self, is_array: bool) -> Option<&str> {
        if is_array {
            self.write_array_method.as_deref()
        } else {
            Some(&self.write_method)
        }
    }
}
