//! Structural checks on the primary interface: types used by every
//! method signature, oneway shape, duplicate names, package spelling.
//!
//! Every method is checked even after a failure so one run reports
//! every problem in the file.

use std::collections::HashMap;

use aidl_ir::{Diagnostics, Interface};
use aidl_types::TypeNamespace;

/// Validate every method of `interface` against `types`. Container
/// types referenced for the first time are registered on the way.
pub fn check_types<N: TypeNamespace + ?Sized>(
    filename: &str,
    interface: &Interface,
    types: &mut N,
    diags: &mut Diagnostics,
) -> bool {
    let mut ok = true;
    let mut seen: HashMap<&str, u32> = HashMap::new();

    for method in &interface.methods {
        let oneway = interface.is_oneway_method(method);
        let ret = &method.return_type;

        if !types.register_container(&ret.name, filename, ret.line, diags)
            || !types.validate_return_type(ret, filename, diags)
        {
            ok = false;
        }

        if oneway && !ret.is_void() {
            diags.error(
                filename,
                method.line,
                format!("oneway method '{}' cannot return a value", method.name),
            );
            ok = false;
        }

        for (i, arg) in method.arguments.iter().enumerate() {
            let index = i + 1;
            if !types.register_container(&arg.ty.name, filename, arg.line, diags)
                || !types.validate_argument(arg, index, filename, diags)
            {
                ok = false;
            }

            if oneway && arg.is_out() {
                diags.error(
                    filename,
                    method.line,
                    format!("oneway method '{}' cannot have out parameters", method.name),
                );
                ok = false;
            }
        }

        match seen.get(method.name.as_str()) {
            None => {
                seen.insert(method.name.as_str(), method.line);
            }
            Some(&previous) => {
                diags.error(
                    filename,
                    method.line,
                    format!("attempt to redefine method {},", method.name),
                );
                diags.note(filename, previous, "    previously defined here.");
                ok = false;
            }
        }
    }

    ok
}

/// The interface's package must be well-formed for the target language.
pub fn check_package<N: TypeNamespace + ?Sized>(
    filename: &str,
    interface: &Interface,
    types: &N,
    diags: &mut Diagnostics,
) -> bool {
    if types.validate_package(&interface.package) {
        return true;
    }
    diags.error(
        filename,
        interface.line,
        format!("Invalid package declaration '{}'", interface.package),
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidl_ir::{Argument, Direction, Method, Parcelable, Severity, TypeRef};
    use aidl_types::{CppTypeNamespace, JavaTypeNamespace};

    const FILE: &str = "a/IFoo.aidl";

    fn iface() -> Interface {
        Interface::new("a", "IFoo", 1, FILE)
    }

    fn check(interface: &Interface) -> (bool, Diagnostics) {
        let mut types = JavaTypeNamespace::new();
        let mut diags = Diagnostics::new();
        let ok = check_types(FILE, interface, &mut types, &mut diags);
        (ok, diags)
    }

    #[test]
    fn oneway_with_return_value_fails() {
        let i = iface().method(Method::new(TypeRef::new("int", 2), "get", 2).oneway());
        let (ok, diags) = check(&i);
        assert!(!ok);
        assert_eq!(
            diags.render(),
            "a/IFoo.aidl:2 oneway method 'get' cannot return a value\n"
        );
    }

    #[test]
    fn oneway_with_out_argument_fails() {
        let i = iface().method(
            Method::new(TypeRef::new("void", 2), "fill", 2)
                .oneway()
                .arg(Argument::with_direction(TypeRef::array("int", 2), Direction::Out, "buf")),
        );
        let (ok, diags) = check(&i);
        assert!(!ok);
        assert!(diags.render().contains("oneway method 'fill' cannot have out parameters"));
    }

    #[test]
    fn oneway_interface_applies_to_every_method() {
        let mut i = iface().method(Method::new(TypeRef::new("String", 4), "name", 4));
        i.oneway = true;
        let (ok, diags) = check(&i);
        assert!(!ok);
        assert!(diags.render().contains("oneway method 'name' cannot return a value"));
    }

    #[test]
    fn oneway_with_in_arguments_succeeds() {
        let i = iface().method(
            Method::new(TypeRef::new("void", 2), "send", 2)
                .oneway()
                .arg(Argument::with_direction(TypeRef::new("int", 2), Direction::In, "a"))
                .arg(Argument::with_direction(TypeRef::array("byte", 2), Direction::In, "b")),
        );
        let (ok, diags) = check(&i);
        assert!(ok, "{}", diags.render());
    }

    #[test]
    fn duplicate_method_names_name_both_sites() {
        let i = iface()
            .method(Method::new(TypeRef::new("void", 2), "ping", 2))
            .method(Method::new(TypeRef::new("int", 5), "ping", 5));
        let (ok, diags) = check(&i);
        assert!(!ok);
        let all: Vec<_> = diags.iter().collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].to_string(), "a/IFoo.aidl:5 attempt to redefine method ping,");
        assert_eq!(all[1].severity, Severity::Note);
        assert_eq!(all[1].line, Some(2));
    }

    #[test]
    fn keeps_checking_after_failures() {
        let i = iface()
            .method(Method::new(TypeRef::new("Unknown", 2), "a", 2))
            .method(
                Method::new(TypeRef::new("void", 3), "b", 3)
                    .arg(Argument::with_direction(TypeRef::new("Missing", 3), Direction::In, "m")),
            )
            .method(Method::new(TypeRef::new("int", 4), "c", 4).oneway());
        let (ok, diags) = check(&i);
        assert!(!ok);
        assert_eq!(diags.error_count(), 3);
    }

    #[test]
    fn containers_are_registered_on_use() {
        let i = iface().method(
            Method::new(TypeRef::new("List<String>", 2), "names", 2).arg(Argument::with_direction(
                TypeRef::new("Map<String,int>", 2),
                Direction::In,
                "m",
            )),
        );
        let mut types = JavaTypeNamespace::new();
        let mut diags = Diagnostics::new();
        assert!(check_types(FILE, &i, &mut types, &mut diags), "{}", diags.render());
        assert!(types.has_type("List<String>"));
        assert!(types.has_type("Map<String,int>"));
    }

    #[test]
    fn registered_parcelable_resolves_by_simple_name() {
        let mut types = JavaTypeNamespace::new();
        let mut diags = Diagnostics::new();
        types.register_parcelable(&Parcelable::new("a.b", "Foo", 1), "cache", &mut diags);

        let i = iface().method(
            Method::new(TypeRef::new("a.b.Foo", 2), "get", 2).arg(Argument::with_direction(
                TypeRef::new("Foo", 2),
                Direction::In,
                "f",
            )),
        );
        assert!(check_types(FILE, &i, &mut types, &mut diags), "{}", diags.render());
    }

    #[test]
    fn package_check_uses_language_rule() {
        let mut diags = Diagnostics::new();
        let i = Interface::new("", "IFoo", 1, "IFoo.aidl");
        assert!(check_package("IFoo.aidl", &i, &JavaTypeNamespace::new(), &mut diags));
        assert!(!check_package("IFoo.aidl", &i, &CppTypeNamespace::new(), &mut diags));
        assert_eq!(diags.render(), "IFoo.aidl:1 Invalid package declaration ''\n");
    }
}
