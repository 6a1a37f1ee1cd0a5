//! Shared fixtures for the pipeline and driver tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use aidl_compiler::{DocumentParser, FileAccess, Generator, LoadedInterface, MemoryFileAccess, ParsedFile};
use aidl_ir::{Diagnostics, Document, Import, Interface, Method, Parcelable, TypeRef};
use aidl_types::TypeNamespace;

pub const CWD: &str = "/src";

/// Hands out pre-built parse results keyed by path. A `None` entry
/// simulates a syntax error.
#[derive(Default)]
pub struct TestParser {
    files: RefCell<HashMap<String, Option<ParsedFile>>>,
}

impl TestParser {
    pub fn add(&self, path: &str, parsed: ParsedFile) {
        self.files.borrow_mut().insert(path.to_string(), Some(parsed));
    }

    pub fn add_broken(&self, path: &str) {
        self.files.borrow_mut().insert(path.to_string(), None);
    }
}

impl DocumentParser for TestParser {
    fn parse_file(&self, path: &str, io: &dyn FileAccess, diags: &mut Diagnostics) -> Option<ParsedFile> {
        if !io.file_exists(Path::new(path)) {
            diags.file_error(path, "can't open file");
            return None;
        }
        match self.files.borrow_mut().remove(path) {
            Some(Some(parsed)) => Some(parsed),
            Some(None) => {
                diags.error(path, 1, "syntax error");
                None
            }
            None => Some(ParsedFile::default()),
        }
    }
}

/// In-memory sources plus their parse results.
pub struct Fixture {
    pub io: MemoryFileAccess,
    pub parser: TestParser,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            io: MemoryFileAccess::new(CWD),
            parser: TestParser::default(),
        }
    }

    pub fn source(&self, path: &str, parsed: ParsedFile) {
        self.io.add_file(path, "");
        self.parser.add(path, parsed);
    }

    pub fn broken_source(&self, path: &str) {
        self.io.add_file(path, "");
        self.parser.add_broken(path);
    }
}

pub fn interface(package: &str, name: &str, path: &str) -> Interface {
    Interface::new(package, name, 2, path)
}

pub fn void_method(name: &str, line: u32) -> Method {
    Method::new(TypeRef::new("void", line), name, line)
}

pub fn parcelables(package: &str, names: &[&str]) -> ParsedFile {
    let items = names
        .iter()
        .enumerate()
        .map(|(i, name)| Parcelable::new(package, *name, i as u32 + 1))
        .collect();
    ParsedFile::new(Document::Parcelables(items))
}

pub fn import(class: &str, from: &str, line: u32) -> Import {
    Import::new(class, from, line)
}

/// Writes `name=id` per method so tests can see what generators receive.
pub struct RecordingGenerator;

impl<N: TypeNamespace + ?Sized> Generator<N> for RecordingGenerator {
    fn language(&self) -> &str {
        "record"
    }

    fn generate(
        &self,
        output: &Path,
        loaded: &LoadedInterface,
        _types: &N,
        io: &dyn FileAccess,
    ) -> anyhow::Result<()> {
        let mut text = format!("// {}\n", loaded.interface.qualified_name());
        for m in &loaded.interface.methods {
            text.push_str(&format!("{}={}\n", m.name, m.id.unwrap_or(-1)));
        }
        io.write_file(output, &text)?;
        Ok(())
    }
}

pub struct FailingGenerator;

impl<N: TypeNamespace + ?Sized> Generator<N> for FailingGenerator {
    fn language(&self) -> &str {
        "failing"
    }

    fn generate(
        &self,
        _output: &Path,
        _loaded: &LoadedInterface,
        _types: &N,
        _io: &dyn FileAccess,
    ) -> anyhow::Result<()> {
        anyhow::bail!("template missing")
    }
}
