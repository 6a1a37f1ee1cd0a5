//! Language-independent half of a type namespace: storage, lookup,
//! redefinition rules and the shared use-site checks.

use aidl_ir::{Argument, Diagnostics, TypeRef, VOID_TYPE};
use indexmap::IndexMap;
use tracing::debug;

use crate::ty::{Type, TypeKind};

/// Ordered map of registered types keyed by qualified IDL name.
/// Entries are never removed.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, Type>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a built-in at namespace construction. Later built-ins with
    /// the same name replace earlier ones.
    pub fn insert_builtin(&mut self, ty: Type) {
        self.types.insert(ty.aidl_name.clone(), ty);
    }

    /// Register a type, applying the redefinition rules:
    /// - same kind as the existing entry: accepted, first entry kept
    /// - existing built-in: error
    /// - different kind: error pointing at the previous definition
    pub fn add(&mut self, ty: Type, filename: &str, line: u32, diags: &mut Diagnostics) -> bool {
        let Some(existing) = self.types.get(&ty.aidl_name) else {
            debug!("registered {} {}", ty.kind, ty.aidl_name);
            self.types.insert(ty.aidl_name.clone(), ty);
            return true;
        };

        if existing.kind == TypeKind::BuiltIn {
            diags.error(
                filename,
                line,
                format!("attempt to redefine built in class {}", ty.aidl_name),
            );
            return false;
        }

        if existing.kind != ty.kind {
            diags.error(
                filename,
                line,
                format!("attempt to redefine {} as {},", ty.aidl_name, ty.kind),
            );
            if let (Some(file), Some(prev_line)) = (&existing.src_file, existing.line) {
                diags.note(file.clone(), prev_line, "    previously defined here.");
            }
            return false;
        }

        true
    }

    /// Look up a type by name. Builtins keyed by their simple name also
    /// answer to `package.Name`. A bare name falls back to the first
    /// packaged type with that simple name, in registration order.
    /// Container spellings are compared without whitespace.
    pub fn find(&self, name: &str) -> Option<&Type> {
        let key: String;
        let name = if name.contains('<') {
            key = name.chars().filter(|c| !c.is_whitespace()).collect();
            key.as_str()
        } else {
            name
        };

        if let Some(ty) = self.types.get(name) {
            return Some(ty);
        }
        if name.contains('<') {
            return None;
        }
        if name.contains('.') {
            return self.types.values().find(|t| is_qualified_name_of(t, name));
        }

        let mut matches = self
            .types
            .values()
            .filter(|t| !t.package.is_empty() && t.short_name() == name);
        let first = matches.next()?;
        if let Some(other) = matches.next() {
            debug!(
                "{} matches {} and {}, using the first",
                name, first.aidl_name, other.aidl_name
            );
        }
        Some(first)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ── Use-site checks ─────────────────────────────────────────────

    pub fn validate_return_type(
        &self,
        ty: &TypeRef,
        filename: &str,
        diags: &mut Diagnostics,
    ) -> bool {
        if ty.is_void() {
            return true;
        }
        let Some(t) = self.find(&ty.name) else {
            diags.error(filename, ty.line, format!("unknown return type {}", ty));
            return false;
        };
        if ty.is_array && !t.can_be_array() {
            diags.error(
                filename,
                ty.line,
                format!("return type {} can't be an array", ty),
            );
            return false;
        }
        if !t.can_write_to_parcel {
            diags.error(
                filename,
                ty.line,
                format!("return type {} can't be marshalled", ty),
            );
            return false;
        }
        true
    }

    /// `index` is the 1-based position of the argument.
    pub fn validate_argument(
        &self,
        arg: &Argument,
        index: usize,
        filename: &str,
        diags: &mut Diagnostics,
    ) -> bool {
        let prefix = format!("parameter {} ({})", arg.name, index);

        if arg.ty.name == VOID_TYPE {
            diags.error(
                filename,
                arg.line,
                format!("{}: void is not a valid parameter type", prefix),
            );
            return false;
        }
        let Some(t) = self.find(&arg.ty.name) else {
            diags.error(
                filename,
                arg.line,
                format!("{}: unknown type {}", prefix, arg.ty),
            );
            return false;
        };
        if !t.can_write_to_parcel {
            diags.error(
                filename,
                arg.line,
                format!("{}: '{}' can't be marshalled", prefix, arg.ty),
            );
            return false;
        }
        if arg.ty.is_array && !t.can_be_array() {
            diags.error(
                filename,
                arg.line,
                format!("{}: '{}' can't be an array", prefix, arg.ty),
            );
            return false;
        }
        if !arg.direction_specified && (arg.ty.is_array || t.can_be_out) {
            diags.error(
                filename,
                arg.line,
                format!(
                    "{}: '{}' can be an out type, so you must declare it as in, out or inout",
                    prefix, arg.ty
                ),
            );
            return false;
        }
        if arg.is_out() && !arg.ty.is_array && !t.can_be_out {
            diags.error(
                filename,
                arg.line,
                format!("{}: '{}' can only be an in parameter", prefix, arg.ty),
            );
            return false;
        }
        true
    }
}

/// Whether `name` spells `ty` as `package.ShortName`.
fn is_qualified_name_of(ty: &Type, name: &str) -> bool {
    !ty.package.is_empty()
        && name
            .strip_suffix(ty.short_name())
            .and_then(|prefix| prefix.strip_suffix('.'))
            == Some(ty.package.as_str())
}

// ── Container names ─────────────────────────────────────────────────

/// Result of inspecting a type spelling for a generic container shape.
#[derive(Debug, PartialEq, Eq)]
pub enum ContainerName {
    /// No type arguments at all (`int`, `a.b.Foo`, raw `List`).
    NotContainer,
    /// Has `<` but is not a well-formed `Class<Arg,...>`.
    Malformed,
    Container {
        class: String,
        args: Vec<String>,
        /// Whitespace-free spelling used as the registry key.
        canonical: String,
    },
}

/// Split `Map< String, List<int> >` into `Map` + `["String", "List<int>"]`.
pub fn parse_container(name: &str) -> ContainerName {
    let canonical: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    let Some(open) = canonical.find('<') else {
        return ContainerName::NotContainer;
    };
    if !canonical.ends_with('>') || open == 0 {
        return ContainerName::Malformed;
    }

    let class = canonical[..open].to_string();
    let inner = &canonical[open + 1..canonical.len() - 1];

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                if depth == 0 {
                    return ContainerName::Malformed;
                }
                depth -= 1;
            }
            ',' if depth == 0 => {
                args.push(inner[start..i].to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return ContainerName::Malformed;
    }
    args.push(inner[start..].to_string());

    if args.iter().any(|a| a.is_empty()) {
        return ContainerName::Malformed;
    }

    ContainerName::Container {
        class,
        args,
        canonical,
    }
}
