//! Compile and preprocess entry points.
//!
//! Each driver runs the pipeline with a fresh namespace for its target
//! language, takes care of output paths and dependency files, and hands
//! the validated interface to a [`Generator`].

use std::path::{Path, PathBuf};

use aidl_ir::Diagnostics;
use aidl_types::{CppTypeNamespace, JavaTypeNamespace, TypeNamespace};
use tracing::{debug, info};

use crate::deps::write_dep_file;
use crate::error::{CompileError, ErrorCount};
use crate::io::FileAccess;
use crate::options::{CppOptions, JavaOptions, Task};
use crate::parser::DocumentParser;
use crate::pipeline::{resolve_and_validate, LoadedInterface};
use crate::preprocessed::format_preprocessed_line;

/// Turns a validated interface into source files.
///
/// `N` is the namespace the interface was validated against; generators
/// read marshalling details from it.
pub trait Generator<N: TypeNamespace + ?Sized> {
    fn language(&self) -> &str;

    fn generate(
        &self,
        output: &Path,
        loaded: &LoadedInterface,
        types: &N,
        io: &dyn FileAccess,
    ) -> anyhow::Result<()>;
}

/// Validate `options.input_file_name` and generate Java for it.
/// Returns the path of the generated file.
pub fn compile_aidl_to_java(
    options: &JavaOptions,
    parser: &dyn DocumentParser,
    io: &dyn FileAccess,
    generator: &dyn Generator<JavaTypeNamespace>,
    diags: &mut Diagnostics,
) -> Result<PathBuf, CompileError> {
    let mut types = JavaTypeNamespace::new();
    let loaded = resolve_and_validate(&options.load_request(), parser, io, &mut types, diags)?;

    let output = options
        .resolve_output_file(&loaded.interface)
        .ok_or(CompileError::MissingOutput)?;

    if let Some(dep_file) = options.resolve_dep_file(&output) {
        write_dep_file(
            &dep_file,
            &output.display().to_string(),
            &options.input_file_name,
            &loaded.imports,
            io,
        )?;
    }

    emit(generator, &output, &loaded, &types, io)?;
    Ok(output)
}

/// Validate `options.input_file_name` and generate C++ for it.
/// Preprocessed caches are never read.
pub fn compile_aidl_to_cpp(
    options: &CppOptions,
    parser: &dyn DocumentParser,
    io: &dyn FileAccess,
    generator: &dyn Generator<CppTypeNamespace>,
    diags: &mut Diagnostics,
) -> Result<PathBuf, CompileError> {
    let mut types = CppTypeNamespace::new();
    let loaded = resolve_and_validate(&options.load_request(), parser, io, &mut types, diags)?;

    let output = options.output_cpp_file_name.clone();
    if output.as_os_str().is_empty() {
        return Err(CompileError::MissingOutput);
    }

    if let Some(dep_file) = &options.dep_file_name {
        write_dep_file(
            dep_file,
            &output.display().to_string(),
            &options.input_file_name,
            &loaded.imports,
            io,
        )?;
    }

    emit(generator, &output, &loaded, &types, io)?;
    Ok(output)
}

fn emit<N: TypeNamespace + ?Sized>(
    generator: &dyn Generator<N>,
    output: &Path,
    loaded: &LoadedInterface,
    types: &N,
    io: &dyn FileAccess,
) -> Result<(), CompileError> {
    io.create_parent_dirs(output)
        .map_err(|e| CompileError::write(output, e))?;

    debug!(
        "generating {} for {} into {}",
        generator.language(),
        loaded.interface.qualified_name(),
        output.display()
    );
    generator
        .generate(output, loaded, types, io)
        .map_err(CompileError::Generate)
}

/// Write one cache line per declaration in `options.files_to_preprocess`
/// to `options.output_file_name`. Returns the number of lines written.
///
/// Nothing is written if any input fails to parse.
pub fn preprocess_aidl(
    options: &JavaOptions,
    parser: &dyn DocumentParser,
    io: &dyn FileAccess,
    diags: &mut Diagnostics,
) -> Result<usize, CompileError> {
    let output = options
        .output_file_name
        .as_deref()
        .ok_or(CompileError::MissingOutput)?;

    let baseline = diags.error_count();
    let mut contents = String::new();
    for file in &options.files_to_preprocess {
        let Some(parsed) = parser.parse_file(file, io, diags) else {
            return Err(ErrorCount::since(diags, baseline).into());
        };
        match parsed.document {
            Some(doc) => contents.push_str(&format_preprocessed_line(&doc)),
            None => debug!("{} declares nothing", file),
        }
    }

    let lines = contents.lines().count();
    io.create_parent_dirs(output)
        .and_then(|()| io.write_file(output, &contents))
        .map_err(|e| CompileError::write(output, e))?;

    info!("preprocessed {} declarations into {}", lines, output.display());
    Ok(lines)
}

/// Run whichever task `options.task` selects.
pub fn run_java(
    options: &JavaOptions,
    parser: &dyn DocumentParser,
    io: &dyn FileAccess,
    generator: &dyn Generator<JavaTypeNamespace>,
    diags: &mut Diagnostics,
) -> Result<(), CompileError> {
    match options.task {
        Task::CompileAidlToJava => {
            compile_aidl_to_java(options, parser, io, generator, diags).map(|_| ())
        }
        Task::PreprocessAidl => preprocess_aidl(options, parser, io, diags).map(|_| ()),
    }
}
