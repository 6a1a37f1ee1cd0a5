//! AIDL Type Namespaces
//!
//! Per-run registries of the types valid for one output language:
//! - `TypeNamespace`: the contract the pipeline calls
//! - `TypeRegistry`: shared storage, lookup and use-site checks
//! - `cpp` / `java`: the two language-specific namespaces

pub mod cpp;
pub mod java;
pub mod namespace;
pub mod registry;
pub mod ty;

pub use cpp::CppTypeNamespace;
pub use java::JavaTypeNamespace;
pub use namespace::TypeNamespace;
pub use registry::{parse_container, ContainerName, TypeRegistry};
pub use ty::{Type, TypeKind};
