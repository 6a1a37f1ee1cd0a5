//! Preprocessed type cache.
//!
//! A flat text listing of already-known declarations:
//!
//! ```text
//! // comment
//! parcelable android.os.Bundle;
//! interface android.os.IServiceManager;
//! ```
//!
//! Loading registers each entry with the type namespace without parsing
//! its full declaration; method and field detail is not kept.

use std::path::Path;

use aidl_ir::{split_qualified, Diagnostics, Document, Interface, Parcelable};
use aidl_types::TypeNamespace;
use tracing::debug;

use crate::io::FileAccess;

/// Lines of this many bytes or more cannot be read in full.
pub const MAX_PREPROCESSED_LINE_LEN: usize = 1024;

const PARCELABLE_KEYWORD: &str = "parcelable";
const INTERFACE_KEYWORD: &str = "interface";

/// Load one cache file into `types`. Stops at the first bad line.
pub fn parse_preprocessed_file<N: TypeNamespace + ?Sized>(
    path: &Path,
    io: &dyn FileAccess,
    types: &mut N,
    diags: &mut Diagnostics,
) -> bool {
    let filename = path.display().to_string();
    let contents = match io.read_file(path) {
        Ok(contents) => contents,
        Err(e) => {
            diags.file_error(&filename, format!("can't open preprocessed file: {}", e));
            return false;
        }
    };

    let mut count = 0usize;
    for (index, raw) in contents.lines().enumerate() {
        let lineno = index as u32 + 1;

        if raw.len() >= MAX_PREPROCESSED_LINE_LEN {
            diags.error(&filename, lineno, "error reading file, line too long.");
            return false;
        }

        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        let mut tokens = line.splitn(2, char::is_whitespace);
        let kind = tokens.next().unwrap_or_default();
        let fullname = tokens
            .next()
            .map(|rest| {
                rest.trim_start()
                    .split(|c: char| c == ';' || c.is_whitespace())
                    .next()
                    .unwrap_or_default()
            })
            .unwrap_or_default();

        let registered = match kind {
            PARCELABLE_KEYWORD | INTERFACE_KEYWORD if fullname.is_empty() => {
                diags.error(&filename, lineno, format!("missing type name in line: {}", line));
                return false;
            }
            PARCELABLE_KEYWORD => {
                let (package, name) = split_qualified(fullname);
                let parcelable = Parcelable::new(package, name, lineno);
                types.register_parcelable(&parcelable, &filename, diags)
            }
            INTERFACE_KEYWORD => {
                let (package, name) = split_qualified(fullname);
                let interface = Interface::new(package, name, lineno, filename.clone());
                types.register_binder_interface(&interface, &filename, diags)
            }
            _ => {
                diags.error(&filename, lineno, format!("bad type in line: {}", line));
                return false;
            }
        };

        if !registered {
            diags.error(&filename, lineno, "Failed to gather types for preprocessed aidl.");
            return false;
        }
        count += 1;
    }

    debug!("loaded {} preprocessed types from {}", count, filename);
    true
}

/// Cache lines for one parsed document: one per declaration.
pub fn format_preprocessed_line(document: &Document) -> String {
    let mut out = String::new();
    match document {
        Document::Interface(iface) => {
            out.push_str(&format_line(INTERFACE_KEYWORD, &iface.qualified_name()));
        }
        Document::Parcelables(items) => {
            for p in items {
                out.push_str(&format_line(PARCELABLE_KEYWORD, &p.qualified_name()));
            }
        }
    }
    out
}

fn format_line(kind: &str, qualified: &str) -> String {
    format!("{} {};\n", kind, qualified)
}
