use crate::error::{ClassForgeError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const SOURCE_EXTENSION: &str = "java";

/// Location of the source file for class `name` inside `folder`.
pub fn class_path(folder: &Path, name: &str) -> PathBuf {
    folder.join(format!("{}.{}", name, SOURCE_EXTENSION))
}

/// Persistence of rendered class sources.
pub trait ClassStore: Send + Sync {
    /// Writes `text` as the source of class `name` without ever exposing a
    /// partially written file under the target name.
    fn write_atomic(&self, folder: &Path, name: &str, text: &str) -> Result<PathBuf>;

    fn read(&self, path: &Path) -> Result<String>;

    fn exists(&self, folder: &Path, name: &str) -> bool;

    fn delete(&self, folder: &Path, name: &str) -> Result<()>;

    /// Sorted names of the classes stored in `folder`.
    fn list(&self, folder: &Path) -> Result<Vec<String>>;
}

/// Plain filesystem store: one `<Name>.java` file per class.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsClassStore;

impl ClassStore for FsClassStore {
    fn write_atomic(&self, folder: &Path, name: &str, text: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(folder)?;

        let path = class_path(folder, name);
        // Write to temp, then rename over the target
        let temp_path = path.with_extension(format!("{}.tmp", SOURCE_EXTENSION));
        std::fs::write(&temp_path, text)?;
        if let Err(e) = std::fs::rename(&temp_path, &path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        info!("Saved {} to {}", name, path.display());
        Ok(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        if !path.is_file() {
            return Err(ClassForgeError::not_found("File", path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(text)
    }

    fn exists(&self, folder: &Path, name: &str) -> bool {
        class_path(folder, name).is_file()
    }

    fn delete(&self, folder: &Path, name: &str) -> Result<()> {
        let path = class_path(folder, name);
        if !path.is_file() {
            return Err(ClassForgeError::not_found("Class file", name));
        }
        std::fs::remove_file(&path)?;
        info!("Deleted {}", path.display());
        Ok(())
    }

    fn list(&self, folder: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(folder)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
