//! AIDL Compiler Front-End
//!
//! Turns one `.aidl` interface file into a validated, numbered
//! [`aidl_ir::Interface`] that generators can trust:
//! - Loads preprocessed type caches
//! - Resolves imports against search directories
//! - Registers every declared type with a language namespace
//! - Runs the structural checks and assigns method ids
//!
//! Also carries the pieces around the pipeline that a build invocation
//! needs: options, dependency files, cache writing and compile drivers.

pub mod deps;
pub mod driver;
pub mod error;
pub mod import_resolver;
pub mod io;
pub mod options;
pub mod parser;
pub mod pipeline;
pub mod preprocessed;

pub use deps::{format_dep_file, write_dep_file};
pub use driver::{compile_aidl_to_cpp, compile_aidl_to_java, preprocess_aidl, run_java, Generator};
pub use error::{CompileError, ErrorCount};
pub use import_resolver::ImportResolver;
pub use io::{FileAccess, FsFileAccess, MemoryFileAccess};
pub use options::{CppOptions, JavaOptions, Task};
pub use parser::{DocumentParser, ParsedFile};
pub use pipeline::{gather_types, resolve_and_validate, LoadRequest, LoadedInterface, Stage};
pub use preprocessed::{format_preprocessed_line, parse_preprocessed_file, MAX_PREPROCESSED_LINE_LEN};
