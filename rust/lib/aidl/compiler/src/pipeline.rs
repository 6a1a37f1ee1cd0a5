//! Load, resolve, validate and number one interface file.
//!
//! Stages run in a fixed order. Each stage runs to completion so it
//! reports everything it finds, then the run stops if that stage
//! recorded any error:
//!
//! ```text
//! ParsePrimary → LoadCache → ValidatePrimaryFilename → ResolveImports
//!   → ParseImports → GatherTypes → ValidatePackage → ValidateStructure
//!   → AssignMethodIds
//! ```
//!
//! On success the caller owns the validated interface and the import
//! list; documents parsed from imports are dropped once their types are
//! registered.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use aidl_ir::{Diagnostics, Document, Import, ImportKey, Interface};
use aidl_types::TypeNamespace;
use aidl_validate::{
    assign_method_ids, check_document_filenames, check_filename, check_package, check_types,
    FilenameCase,
};
use tracing::{debug, warn};

use crate::error::ErrorCount;
use crate::import_resolver::ImportResolver;
use crate::io::FileAccess;
use crate::parser::DocumentParser;
use crate::preprocessed::parse_preprocessed_file;

/// Inputs of one run.
#[derive(Debug, Clone, Copy)]
pub struct LoadRequest<'a> {
    /// Preprocessed caches, loaded in order.
    pub preprocessed_files: &'a [PathBuf],

    /// Import search directories, searched in order.
    pub import_paths: &'a [PathBuf],

    pub input_file: &'a str,

    pub filename_case: FilenameCase,
}

impl<'a> LoadRequest<'a> {
    pub fn new(input_file: &'a str) -> Self {
        Self {
            preprocessed_files: &[],
            import_paths: &[],
            input_file,
            filename_case: FilenameCase::host(),
        }
    }
}

/// A validated, numbered interface ready for code generation.
#[derive(Debug)]
pub struct LoadedInterface {
    pub interface: Interface,

    /// Imports of the primary file in source order. Imports satisfied by
    /// a preprocessed cache stay unresolved.
    pub imports: Vec<Import>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ParsePrimary,
    LoadCache,
    ValidatePrimaryFilename,
    ResolveImports,
    ParseImports,
    GatherTypes,
    ValidatePackage,
    ValidateStructure,
    AssignMethodIds,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ParsePrimary => "parse primary",
            Stage::LoadCache => "load cache",
            Stage::ValidatePrimaryFilename => "validate primary filename",
            Stage::ResolveImports => "resolve imports",
            Stage::ParseImports => "parse imports",
            Stage::GatherTypes => "gather types",
            Stage::ValidatePackage => "validate package",
            Stage::ValidateStructure => "validate structure",
            Stage::AssignMethodIds => "assign method ids",
        };
        f.write_str(name)
    }
}

/// Counts only errors recorded during this run.
struct Gate {
    baseline: usize,
}

impl Gate {
    fn pass(&self, stage: Stage, ok: bool, diags: &Diagnostics) -> Result<(), ErrorCount> {
        let errors = diags.error_count().saturating_sub(self.baseline);
        if ok && errors == 0 {
            debug!("stage {} passed", stage);
            return Ok(());
        }
        Err(self.fail(stage, diags))
    }

    fn fail(&self, stage: Stage, diags: &Diagnostics) -> ErrorCount {
        let count = ErrorCount::since(diags, self.baseline);
        debug!("stage {} failed with {}", stage, count);
        count
    }
}

/// Run every stage over `request.input_file`, registering what it finds
/// in `types`.
pub fn resolve_and_validate<N: TypeNamespace + ?Sized>(
    request: &LoadRequest<'_>,
    parser: &dyn DocumentParser,
    io: &dyn FileAccess,
    types: &mut N,
    diags: &mut Diagnostics,
) -> Result<LoadedInterface, ErrorCount> {
    let gate = Gate {
        baseline: diags.error_count(),
    };
    let input = request.input_file;
    debug!("loading {} for {}", input, types.language());

    // ── Parse primary ────────────────────────────────────────────

    let Some(parsed) = parser.parse_file(input, io, diags) else {
        return Err(gate.fail(Stage::ParsePrimary, diags));
    };
    let mut imports = parsed.imports;
    let mut interface = match parsed.document {
        Some(Document::Interface(interface)) => interface,
        _ => {
            diags.file_error(input, "aidl expects exactly one interface per input file");
            return Err(gate.fail(Stage::ParsePrimary, diags));
        }
    };
    gate.pass(Stage::ParsePrimary, true, diags)?;

    // ── Load cache ───────────────────────────────────────────────

    let mut ok = true;
    for path in request.preprocessed_files {
        ok &= parse_preprocessed_file(path, io, types, diags);
    }
    gate.pass(Stage::LoadCache, ok, diags)?;

    // ── Validate primary filename ────────────────────────────────

    let cwd = match io.current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            diags.file_error(input, format!("can't determine working directory: {}", e));
            return Err(gate.fail(Stage::ValidatePrimaryFilename, diags));
        }
    };
    let ok = check_filename(
        input,
        &cwd,
        "interface",
        &interface.package,
        &interface.name,
        interface.line,
        request.filename_case,
        diags,
    );
    gate.pass(Stage::ValidatePrimaryFilename, ok, diags)?;

    // ── Resolve imports ──────────────────────────────────────────

    let ok = resolve_imports(&mut imports, request.import_paths, io, types, diags);
    gate.pass(Stage::ResolveImports, ok, diags)?;

    // ── Parse imports ────────────────────────────────────────────

    let (docs, ok) = parse_imports(&imports, &cwd, request.filename_case, parser, io, diags);
    gate.pass(Stage::ParseImports, ok, diags)?;

    // ── Gather types ─────────────────────────────────────────────

    let mut ok = types.register_binder_interface(&interface, input, diags);
    for import in &imports {
        if let (Some(filename), Some(doc)) = (&import.filename, docs.get(&import.key())) {
            ok &= gather_types(filename, doc, types, diags);
        }
    }
    drop(docs);
    gate.pass(Stage::GatherTypes, ok, diags)?;

    // ── Validate ─────────────────────────────────────────────────

    let ok = check_package(input, &interface, types, diags);
    gate.pass(Stage::ValidatePackage, ok, diags)?;

    let ok = check_types(input, &interface, types, diags);
    gate.pass(Stage::ValidateStructure, ok, diags)?;

    // ── Number ───────────────────────────────────────────────────

    let ok = assign_method_ids(input, &mut interface.methods, diags);
    gate.pass(Stage::AssignMethodIds, ok, diags)?;

    debug!(
        "{} validated: {} methods, {} imports",
        interface.qualified_name(),
        interface.methods.len(),
        imports.len()
    );
    Ok(LoadedInterface { interface, imports })
}

fn resolve_imports<N: TypeNamespace + ?Sized>(
    imports: &mut [Import],
    import_paths: &[PathBuf],
    io: &dyn FileAccess,
    types: &N,
    diags: &mut Diagnostics,
) -> bool {
    let resolver = ImportResolver::new(io, import_paths);
    let mut ok = true;

    for import in imports.iter_mut() {
        // Some trees import types that only the preprocessed cache knows
        // about. Accept them without a file.
        if types.has_type(&import.needed_class) {
            warn!(
                "{}:{} import {} satisfied by known type, not resolving",
                import.file_from, import.line, import.needed_class
            );
            continue;
        }

        match resolver.find_import_file(&import.needed_class) {
            Some(path) => {
                import.set_filename(path.display().to_string());
            }
            None => {
                diags.error(
                    import.file_from.clone(),
                    import.line,
                    format!("couldn't find import for class {}", import.needed_class),
                );
                ok = false;
            }
        }
    }
    ok
}

/// Parse every resolved import. A file that parses to no document is
/// kept and contributes no types.
fn parse_imports(
    imports: &[Import],
    cwd: &Path,
    case: FilenameCase,
    parser: &dyn DocumentParser,
    io: &dyn FileAccess,
    diags: &mut Diagnostics,
) -> (HashMap<ImportKey, Document>, bool) {
    let mut docs = HashMap::new();
    let mut ok = true;

    for import in imports {
        let Some(filename) = &import.filename else {
            continue;
        };

        let Some(parsed) = parser.parse_file(filename, io, diags) else {
            diags.error(
                import.file_from.clone(),
                import.line,
                format!("error while parsing import for class {}", import.needed_class),
            );
            ok = false;
            continue;
        };

        if let Some(doc) = parsed.document {
            ok &= check_document_filenames(filename, cwd, &doc, case, diags);
            docs.insert(import.key(), doc);
        }
    }
    (docs, ok)
}

/// Register every declaration in `document` with `types`.
pub fn gather_types<N: TypeNamespace + ?Sized>(
    filename: &str,
    document: &Document,
    types: &mut N,
    diags: &mut Diagnostics,
) -> bool {
    match document {
        Document::Interface(iface) => types.register_binder_interface(iface, filename, diags),
        Document::Parcelables(items) => {
            let mut ok = true;
            for p in items {
                ok &= types.register_parcelable(p, filename, diags);
            }
            ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidl_ir::Parcelable;
    use aidl_types::{JavaTypeNamespace, TypeKind};

    #[test]
    fn stage_names() {
        assert_eq!(Stage::ParsePrimary.to_string(), "parse primary");
        assert_eq!(Stage::AssignMethodIds.to_string(), "assign method ids");
    }

    #[test]
    fn gather_registers_every_parcelable() {
        let doc = Document::Parcelables(vec![
            Parcelable::new("a", "One", 1),
            Parcelable::new("a", "Two", 2),
        ]);
        let mut types = JavaTypeNamespace::new();
        let mut diags = Diagnostics::new();
        assert!(gather_types("a/One.aidl", &doc, &mut types, &mut diags));
        assert_eq!(types.find("a.One").unwrap().kind, TypeKind::Parcelable);
        assert_eq!(types.find("a.Two").unwrap().kind, TypeKind::Parcelable);
    }

    #[test]
    fn gather_reports_kind_conflicts() {
        let mut types = JavaTypeNamespace::new();
        let mut diags = Diagnostics::new();
        let first = Document::Parcelables(vec![Parcelable::new("a", "Foo", 1)]);
        let second = Document::Interface(Interface::new("a", "Foo", 3, "a/Foo.aidl"));
        assert!(gather_types("a/Foo.aidl", &first, &mut types, &mut diags));
        assert!(!gather_types("b/Foo.aidl", &second, &mut types, &mut diags));
        assert_eq!(diags.error_count(), 1);
    }

    #[test]
    fn gate_counts_only_new_errors() {
        let mut diags = Diagnostics::new();
        diags.error("earlier.aidl", 1, "from a previous run");
        let gate = Gate {
            baseline: diags.error_count(),
        };
        assert!(gate.pass(Stage::LoadCache, true, &diags).is_ok());

        diags.error("a.aidl", 2, "x");
        diags.error("a.aidl", 3, "y");
        assert_eq!(gate.pass(Stage::LoadCache, true, &diags), Err(ErrorCount(2)));
        assert_eq!(gate.pass(Stage::LoadCache, false, &diags), Err(ErrorCount(2)));
    }
}
