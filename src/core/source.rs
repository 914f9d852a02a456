//! Script sources - where file-backed script bodies come from

use crate::core::error::{DslError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Reads script bodies by path
pub trait ScriptSource {
    /// Read the script at `path`, failing with `NotFound` if it is missing
    fn read(&self, path: &Path) -> Result<String>;
}

/// Reads scripts from the filesystem, relative to an optional base directory
#[derive(Debug, Clone, Default)]
pub struct FsScriptSource {
    base_dir: Option<PathBuf>,
}

impl FsScriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base_dir`
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ScriptSource for FsScriptSource {
    fn read(&self, path: &Path) -> Result<String> {
        let resolved = self.resolve(path);
        std::fs::read_to_string(&resolved).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DslError::NotFound {
                path: resolved.display().to_string(),
            },
            _ => DslError::Io(e),
        })
    }
}

/// In-memory scripts keyed by path (for testing or embedding)
#[derive(Debug, Clone, Default)]
pub struct MemoryScriptSource {
    scripts: HashMap<PathBuf, String>,
}

impl MemoryScriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.scripts.insert(path.into(), content.into());
        self
    }
}

impl ScriptSource for MemoryScriptSource {
    fn read(&self, path: &Path) -> Result<String> {
        self.scripts
            .get(path)
            .cloned()
            .ok_or_else(|| DslError::NotFound {
                path: path.display().to_string(),
            })
    }
}
