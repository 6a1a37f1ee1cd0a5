//! C++ (native binder) type namespace.

use aidl_ir::{Argument, Diagnostics, Interface, Parcelable};

use crate::namespace::TypeNamespace;
use crate::registry::TypeRegistry;
use crate::ty::{Type, TypeKind};

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char16_t", "char32_t", "class", "compl", "concept", "const",
    "constexpr", "const_cast", "continue", "decltype", "default", "delete", "do", "double",
    "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float", "for",
    "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept",
    "not", "not_eq", "nullptr", "operator", "or", "or_eq", "private", "protected", "public",
    "register", "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

pub fn is_cpp_keyword(word: &str) -> bool {
    CPP_KEYWORDS.contains(&word)
}

/// `a.b` + `Foo` → `::a::b::Foo`.
fn cpp_qualified(package: &str, name: &str) -> String {
    let mut out = String::new();
    for segment in package.split('.').filter(|s| !s.is_empty()) {
        out.push_str("::");
        out.push_str(segment);
    }
    out.push_str("::");
    out.push_str(name);
    out
}

/// `a.b` + `Foo` → `a/b/Foo.h`.
fn cpp_header(package: &str, name: &str) -> String {
    let mut out = package.replace('.', "/");
    if !out.is_empty() {
        out.push('/');
    }
    out.push_str(name);
    out.push_str(".h");
    out
}

/// Type namespace for generated C++ binder code.
///
/// No scalar type can be an out parameter, only `List<String>` and
/// `List<IBinder>` are supported, and maps are rejected.
#[derive(Debug)]
pub struct CppTypeNamespace {
    registry: TypeRegistry,
}

impl Default for CppTypeNamespace {
    fn default() -> Self {
        Self::new()
    }
}

impl CppTypeNamespace {
    pub fn new() -> Self {
        let mut registry = TypeRegistry::new();

        let scalars = [
            ("byte", "int8_t", "Byte"),
            ("int", "int32_t", "Int32"),
            ("long", "int64_t", "Int64"),
            ("float", "float", "Float"),
            ("double", "double", "Double"),
            ("boolean", "bool", "Bool"),
            ("char", "char16_t", "Char"),
        ];
        for (aidl, cpp, suffix) in scalars {
            registry.insert_builtin(
                Type::builtin(aidl, cpp, format!("read{}", suffix), format!("write{}", suffix))
                    .with_header("cstdint")
                    .with_array(
                        format!("read{}Vector", suffix),
                        format!("write{}Vector", suffix),
                    )
                    .primitive(),
            );
        }

        registry.insert_builtin(Type::builtin("void", "void", "", "").not_parcelable());
        registry.insert_builtin(
            Type::builtin("String", "::android::String16", "readString16", "writeString16")
                .with_header("utils/String16.h")
                .with_array("readString16Vector", "writeString16Vector"),
        );
        registry.insert_builtin(
            Type::builtin(
                "IBinder",
                "::android::sp<::android::IBinder>",
                "readStrongBinder",
                "writeStrongBinder",
            )
            .with_header("binder/IBinder.h")
            .with_array("readStrongBinderVector", "writeStrongBinderVector"),
        );
        registry.insert_builtin(
            Type::builtin(
                "FileDescriptor",
                "::ScopedFd",
                "readUniqueFileDescriptor",
                "writeUniqueFileDescriptor",
            )
            .with_header("nativehelper/ScopedFd.h"),
        );
        registry.insert_builtin(
            Type::builtin(
                "List<String>",
                "::std::vector<::android::String16>",
                "readString16Vector",
                "writeString16Vector",
            )
            .with_kind(TypeKind::Container)
            .with_header("utils/String16.h")
            .with_header("vector"),
        );
        registry.insert_builtin(
            Type::builtin(
                "List<IBinder>",
                "::std::vector<::android::sp<::android::IBinder>>",
                "readStrongBinderVector",
                "writeStrongBinderVector",
            )
            .with_kind(TypeKind::Container)
            .with_header("binder/IBinder.h")
            .with_header("vector"),
        );

        Self { registry }
    }
}

impl TypeNamespace for CppTypeNamespace {
    fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    fn language(&self) -> &'static str {
        "cpp"
    }

    fn register_parcelable(
        &mut self,
        p: &Parcelable,
        filename: &str,
        diags: &mut Diagnostics,
    ) -> bool {
        let ty = Type::builtin(
            p.qualified_name(),
            cpp_qualified(&p.package, &p.name),
            "readParcelable",
            "writeParcelable",
        )
        .with_kind(TypeKind::Parcelable)
        .with_package(p.package.clone())
        .with_header(cpp_header(&p.package, &p.name))
        .with_array("readParcelableVector", "writeParcelableVector")
        .with_source(filename, p.line);
        self.registry.add(ty, filename, p.line, diags)
    }

    fn register_binder_interface(
        &mut self,
        b: &Interface,
        filename: &str,
        diags: &mut Diagnostics,
    ) -> bool {
        let ty = Type::builtin(
            b.qualified_name(),
            format!("::android::sp<{}>", cpp_qualified(&b.package, &b.name)),
            "readStrongBinder",
            "writeStrongBinder",
        )
        .with_kind(TypeKind::Interface)
        .with_package(b.package.clone())
        .with_header(cpp_header(&b.package, &b.name))
        .with_source(filename, b.line);
        self.registry.add(ty, filename, b.line, diags)
    }

    fn register_list(
        &mut self,
        element: &str,
        filename: &str,
        line: u32,
        diags: &mut Diagnostics,
    ) -> bool {
        diags.error(
            filename,
            line,
            format!("aidl-cpp does not yet support List<{}>", element),
        );
        false
    }

    fn register_map(
        &mut self,
        _key: &str,
        _value: &str,
        filename: &str,
        line: u32,
        diags: &mut Diagnostics,
    ) -> bool {
        diags.error(filename, line, "aidl-cpp does not yet support Map types");
        false
    }

    fn validate_package(&self, package: &str) -> bool {
        if package.is_empty() {
            return false;
        }
        package
            .split('.')
            .all(|piece| !piece.is_empty() && !is_cpp_keyword(piece))
    }

    fn validate_argument(
        &self,
        arg: &Argument,
        index: usize,
        filename: &str,
        diags: &mut Diagnostics,
    ) -> bool {
        if !self.registry.validate_argument(arg, index, filename, diags) {
            return false;
        }
        if is_cpp_keyword(&arg.name) {
            diags.error(
                filename,
                arg.line,
                format!(
                    "parameter {} ({}): argument name is a C++ keyword",
                    arg.name, index
                ),
            );
            return false;
        }
        true
    }
}
