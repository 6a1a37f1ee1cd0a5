//! Java type namespace.

use aidl_ir::{Diagnostics, Interface, Parcelable};

use crate::namespace::TypeNamespace;
use crate::registry::TypeRegistry;
use crate::ty::{Type, TypeKind};

/// Type namespace for generated Java binder code.
///
/// Parcelables and collections may be `out`; any package spelling is
/// accepted; `List<T>` and `Map<K,V>` are generated for any registered
/// element types.
#[derive(Debug)]
pub struct JavaTypeNamespace {
    registry: TypeRegistry,
}

impl Default for JavaTypeNamespace {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaTypeNamespace {
    pub fn new() -> Self {
        let mut registry = TypeRegistry::new();

        registry.insert_builtin(Type::builtin("void", "void", "", "").not_parcelable());

        let scalars = [
            ("boolean", "Boolean"),
            ("byte", "Byte"),
            ("char", "Char"),
            ("int", "Int"),
            ("long", "Long"),
            ("float", "Float"),
            ("double", "Double"),
        ];
        for (aidl, suffix) in scalars {
            registry.insert_builtin(
                Type::builtin(aidl, aidl, format!("read{}", suffix), format!("write{}", suffix))
                    .with_array(
                        format!("create{}Array", suffix),
                        format!("write{}Array", suffix),
                    )
                    .primitive(),
            );
        }

        registry.insert_builtin(
            Type::builtin("String", "java.lang.String", "readString", "writeString")
                .with_package("java.lang")
                .with_array("createStringArray", "writeStringArray"),
        );
        registry.insert_builtin(
            Type::builtin(
                "CharSequence",
                "java.lang.CharSequence",
                "TextUtils.CHAR_SEQUENCE_CREATOR.createFromParcel",
                "TextUtils.writeToParcel",
            )
            .with_package("java.lang")
            .with_header("android.text.TextUtils"),
        );
        registry.insert_builtin(
            Type::builtin("IBinder", "android.os.IBinder", "readStrongBinder", "writeStrongBinder")
                .with_package("android.os")
                .with_array("createBinderArray", "writeBinderArray"),
        );
        registry.insert_builtin(
            Type::builtin("List", "java.util.List", "readArrayList", "writeList")
                .with_package("java.util")
                .with_header("java.util.List")
                .out_capable(),
        );
        registry.insert_builtin(
            Type::builtin("Map", "java.util.Map", "readHashMap", "writeMap")
                .with_package("java.util")
                .with_header("java.util.Map")
                .out_capable(),
        );

        Self { registry }
    }

    /// Register `name` if it is a container, then look it up.
    fn resolve_element(
        &mut self,
        name: &str,
        filename: &str,
        line: u32,
        diags: &mut Diagnostics,
    ) -> Option<(String, TypeKind)> {
        if !self.register_container(name, filename, line, diags) {
            return None;
        }
        match self.registry.find(name) {
            Some(t) => Some((t.lang_name.clone(), t.kind)),
            None => {
                diags.error(filename, line, format!("failed to find type for {}", name));
                None
            }
        }
    }
}

impl TypeNamespace for JavaTypeNamespace {
    fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    fn language(&self) -> &'static str {
        "java"
    }

    fn register_parcelable(
        &mut self,
        p: &Parcelable,
        filename: &str,
        diags: &mut Diagnostics,
    ) -> bool {
        let ty = Type::builtin(p.qualified_name(), p.qualified_name(), "readFromParcel", "writeToParcel")
            .with_kind(TypeKind::Parcelable)
            .with_package(p.package.clone())
            .with_header(p.qualified_name())
            .with_array("createTypedArray", "writeTypedArray")
            .with_source(filename, p.line)
            .out_capable();
        self.registry.add(ty, filename, p.line, diags)
    }

    fn register_binder_interface(
        &mut self,
        b: &Interface,
        filename: &str,
        diags: &mut Diagnostics,
    ) -> bool {
        let ty = Type::builtin(b.qualified_name(), b.qualified_name(), "readStrongBinder", "writeStrongInterface")
            .with_kind(TypeKind::Interface)
            .with_package(b.package.clone())
            .with_header(b.qualified_name())
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
        let Some((element_lang, element_kind)) = self.resolve_element(element, filename, line, diags)
        else {
            return false;
        };

        let (read, write) = match (element, element_kind) {
            ("String", _) => ("createStringArrayList", "writeStringList"),
            ("IBinder", _) => ("createBinderArrayList", "writeBinderList"),
            (_, TypeKind::Parcelable) => ("createTypedArrayList", "writeTypedList"),
            _ => ("readArrayList", "writeList"),
        };

        let ty = Type::builtin(
            format!("List<{}>", element),
            format!("java.util.List<{}>", element_lang),
            read,
            write,
        )
        .with_kind(TypeKind::Container)
        .with_header("java.util.List")
        .out_capable();
        self.registry.add(ty, filename, line, diags)
    }

    fn register_map(
        &mut self,
        key: &str,
        value: &str,
        filename: &str,
        line: u32,
        diags: &mut Diagnostics,
    ) -> bool {
        let key_lang = self.resolve_element(key, filename, line, diags);
        let value_lang = self.resolve_element(value, filename, line, diags);
        let (Some((key_lang, _)), Some((value_lang, _))) = (key_lang, value_lang) else {
            return false;
        };

        let ty = Type::builtin(
            format!("Map<{},{}>", key, value),
            format!("java.util.Map<{},{}>", key_lang, value_lang),
            "readHashMap",
            "writeMap",
        )
        .with_kind(TypeKind::Container)
        .with_header("java.util.Map")
        .out_capable();
        self.registry.add(ty, filename, line, diags)
    }

    fn validate_package(&self, _package: &str) -> bool {
        true
    }
}
