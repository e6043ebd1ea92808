//! Project assembler — materializes a compilation on disk
//!
//! Regeneration is "discard prior output, produce fresh output": the
//! target directory is removed wholesale before anything is written, never
//! patched incrementally. The assembler consumes a complete path→text map
//! and holds no generation logic of its own.

use crate::compile::Compilation;
use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Writes a compiled file map into a target directory
pub struct Assembler {
    target: PathBuf,
}

impl Assembler {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Assembler {
            target: target.into(),
        }
    }

    /// Replace the target directory with the compilation's files. Returns
    /// the number of files written.
    pub fn write(&self, compilation: &Compilation) -> Result<usize> {
        match fs::remove_dir_all(&self.target) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        for (relative, text) in &compilation.files {
            let path = self.target.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, text)?;
        }

        Ok(compilation.files.len())
    }
}
