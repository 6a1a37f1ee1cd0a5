//! AIDL Intermediate Representation (IR)
//!
//! Data structures shared between:
//! - the external parser (produces documents + imports)
//! - the type namespaces (register declared types)
//! - the validator and method-id assigner
//! - code generators (consume the validated interface)
//!
//! Document items are move-only: a parsed item is handed to exactly one
//! owner and never duplicated, so none of them derive `Clone`.

pub mod diag;
pub mod document;
pub mod import;

pub use diag::*;
pub use document::*;
pub use import::*;
