//! The `TypeNamespace` contract shared by every target language.

use aidl_ir::{Argument, Diagnostics, Interface, Parcelable, TypeRef};

use crate::registry::{parse_container, ContainerName, TypeRegistry};
use crate::ty::Type;

/// Registry of the types valid for one output language.
///
/// Implementations differ in what they register and which uses they
/// accept; the pipeline only talks to this trait. Registration is
/// append-only.
pub trait TypeNamespace {
    fn registry(&self) -> &TypeRegistry;

    /// Short language tag for logs (`cpp`, `java`).
    fn language(&self) -> &'static str;

    fn register_parcelable(
        &mut self,
        parcelable: &Parcelable,
        filename: &str,
        diags: &mut Diagnostics,
    ) -> bool;

    fn register_binder_interface(
        &mut self,
        interface: &Interface,
        filename: &str,
        diags: &mut Diagnostics,
    ) -> bool;

    /// Register `List<element>`. Called with an unregistered list only.
    fn register_list(
        &mut self,
        element: &str,
        filename: &str,
        line: u32,
        diags: &mut Diagnostics,
    ) -> bool;

    /// Register `Map<key,value>`. Called with an unregistered map only.
    fn register_map(
        &mut self,
        key: &str,
        value: &str,
        filename: &str,
        line: u32,
        diags: &mut Diagnostics,
    ) -> bool;

    fn validate_package(&self, package: &str) -> bool;

    fn validate_argument(
        &self,
        arg: &Argument,
        index: usize,
        filename: &str,
        diags: &mut Diagnostics,
    ) -> bool {
        self.registry().validate_argument(arg, index, filename, diags)
    }

    fn validate_return_type(&self, ty: &TypeRef, filename: &str, diags: &mut Diagnostics) -> bool {
        self.registry().validate_return_type(ty, filename, diags)
    }

    fn has_type(&self, name: &str) -> bool {
        self.registry().contains(name)
    }

    fn find(&self, name: &str) -> Option<&Type> {
        self.registry().find(name)
    }

    /// Register a generic container the first time it is referenced.
    /// Non-container names pass through untouched.
    fn register_container(
        &mut self,
        name: &str,
        filename: &str,
        line: u32,
        diags: &mut Diagnostics,
    ) -> bool {
        let (class, args, canonical) = match parse_container(name) {
            ContainerName::NotContainer => return true,
            ContainerName::Malformed => {
                diags.error(filename, line, format!("invalid container type {}", name));
                return false;
            }
            ContainerName::Container {
                class,
                args,
                canonical,
            } => (class, args, canonical),
        };

        if self.has_type(&canonical) {
            return true;
        }

        match (class.as_str(), args.as_slice()) {
            ("List", [element]) => self.register_list(element, filename, line, diags),
            ("Map", [key, value]) => self.register_map(key, value, filename, line, diags),
            _ => {
                diags.error(
                    filename,
                    line,
                    format!("Don't know how to create a container of type {}", name),
                );
                false
            }
        }
    }
}
