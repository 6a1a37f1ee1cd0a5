use std::io;
use std::path::PathBuf;

use aidl_ir::Diagnostics;
use thiserror::Error;

/// Number of errors a failed pipeline run reported.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0} error(s)")]
pub struct ErrorCount(pub usize);

impl ErrorCount {
    /// Errors recorded after `baseline`. Never zero: a failed stage that
    /// somehow logged nothing still fails.
    pub fn since(diags: &Diagnostics, baseline: usize) -> Self {
        Self(diags.error_count().saturating_sub(baseline).max(1))
    }
}

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("validation failed: {0}")]
    Invalid(#[from] ErrorCount),

    #[error("no output file: set an output file name or an output base folder")]
    MissingOutput,

    #[error("could not write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("code generation failed: {0:#}")]
    Generate(anyhow::Error),
}

impl CompileError {
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
