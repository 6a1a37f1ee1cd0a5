//! Make-style dependency file for incremental builds.
//!
//! ```text
//! out/IFoo.java: \
//!   src/a/IFoo.aidl \
//!   inc/a/Bar.aidl
//!
//! src/a/IFoo.aidl :
//! inc/a/Bar.aidl :
//! ```
//!
//! The empty rules keep make from failing when an input is deleted or
//! renamed.

use std::path::Path;

use aidl_ir::Import;
use tracing::debug;

use crate::error::CompileError;
use crate::io::FileAccess;

/// Only resolved imports are listed; imports satisfied by a preprocessed
/// cache have no file.
pub fn format_dep_file(output: &str, input: &str, imports: &[Import]) -> String {
    let deps: Vec<&str> = imports.iter().filter_map(|i| i.filename.as_deref()).collect();

    let mut out = format!("{}: \\\n  {}", output, input);
    for dep in &deps {
        out.push_str(&format!(" \\\n  {}", dep));
    }
    out.push_str(&format!("\n\n{} :\n", input));
    for dep in &deps {
        out.push_str(&format!("{} :\n", dep));
    }
    out
}

pub fn write_dep_file(
    path: &Path,
    output: &str,
    input: &str,
    imports: &[Import],
    io: &dyn FileAccess,
) -> Result<(), CompileError> {
    debug!("writing dependency file {}", path.display());
    let contents = format_dep_file(output, input, imports);
    io.create_parent_dirs(path)
        .and_then(|()| io.write_file(path, &contents))
        .map_err(|e| CompileError::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryFileAccess;

    fn resolved(class: &str, file: &str) -> Import {
        let mut import = Import::new(class, "src/a/IFoo.aidl", 3);
        import.set_filename(file);
        import
    }

    #[test]
    fn no_imports() {
        assert_eq!(
            format_dep_file("out/IFoo.java", "src/a/IFoo.aidl", &[]),
            "out/IFoo.java: \\\n  src/a/IFoo.aidl\n\nsrc/a/IFoo.aidl :\n"
        );
    }

    #[test]
    fn lists_resolved_imports_only() {
        let imports = vec![
            resolved("a.Bar", "inc/a/Bar.aidl"),
            Import::new("android.os.Bundle", "src/a/IFoo.aidl", 4),
            resolved("a.Baz", "inc/a/Baz.aidl"),
        ];
        assert_eq!(
            format_dep_file("out/IFoo.java", "src/a/IFoo.aidl", &imports),
            "out/IFoo.java: \\\n  src/a/IFoo.aidl \\\n  inc/a/Bar.aidl \\\n  inc/a/Baz.aidl\n\n\
             src/a/IFoo.aidl :\ninc/a/Bar.aidl :\ninc/a/Baz.aidl :\n"
        );
    }

    #[test]
    fn writes_through_file_access() {
        let io = MemoryFileAccess::new("/work");
        let imports = vec![resolved("a.Bar", "inc/a/Bar.aidl")];
        write_dep_file(
            Path::new("out/IFoo.java.d"),
            "out/IFoo.java",
            "src/a/IFoo.aidl",
            &imports,
            &io,
        )
        .unwrap();
        let text = io.contents("out/IFoo.java.d").unwrap();
        assert!(text.starts_with("out/IFoo.java: \\\n"));
        assert!(text.ends_with("inc/a/Bar.aidl :\n"));
    }
}
