//! Output bundles and the sinks that store them
//!
//! A completed run produces a [`Bundle`]: one named file per target language.
//! Sinks decide where the bundle goes. Nothing is handed to a sink unless
//! every language succeeded.

use serde::Serialize;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub file_name: String,
    pub content: String,
}

/// Translated files in the order the languages were selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bundle {
    pub files: Vec<OutputFile>,
}

impl Bundle {
    pub fn push(&mut self, file_name: String, content: String) {
        self.files.push(OutputFile { file_name, content });
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, file_name: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.file_name == file_name)
    }
}

pub trait ArchiveSink: Send + Sync {
    fn write(&self, bundle: &Bundle) -> io::Result<()>;
}

/// Writes each file of a bundle into a directory, creating it if needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// File names must stay below the output directory
fn check_relative(file_name: &str) -> io::Result<()> {
    let escapes = Path::new(file_name).components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes || file_name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Output file name {:?} leaves the output directory", file_name),
        ));
    }
    Ok(())
}

impl ArchiveSink for DirectorySink {
    /// Nothing is written unless every file name is a relative path
    /// without `..` segments.
    fn write(&self, bundle: &Bundle) -> io::Result<()> {
        for file in &bundle.files {
            check_relative(&file.file_name)?;
        }

        std::fs::create_dir_all(&self.dir)?;
        for file in &bundle.files {
            let path = self.dir.join(&file.file_name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &file.content)?;
            info!("Wrote {}", path.display());
        }
        Ok(())
    }
}

/// Keeps every bundle it receives in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    bundles: Mutex<Vec<Bundle>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bundles(&self) -> Vec<Bundle> {
        self.bundles
            .lock()
            .map(|bundles| bundles.clone())
            .unwrap_or_default()
    }

    /// The most recent bundle, if any
    pub fn last(&self) -> Option<Bundle> {
        self.bundles().pop()
    }
}

impl ArchiveSink for MemorySink {
    fn write(&self, bundle: &Bundle) -> io::Result<()> {
        self.bundles
            .lock()
            .map_err(|_| io::Error::other("memory sink lock poisoned"))?
            .push(bundle.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bundle {
        let mut bundle = Bundle::default();
        bundle.push("app_es.json".to_string(), "{}\n".to_string());
        bundle.push("app_fr.json".to_string(), "{\"a\": 1}\n".to_string());
        bundle
    }

    #[test]
    fn test_directory_sink_writes_files() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("nested").join("out");
        let sink = DirectorySink::new(&out);

        sink.write(&sample()).unwrap();

        assert_eq!(std::fs::read_to_string(out.join("app_es.json")).unwrap(), "{}\n");
        assert_eq!(
            std::fs::read_to_string(out.join("app_fr.json")).unwrap(),
            "{\"a\": 1}\n"
        );
    }

    #[test]
    fn test_directory_sink_creates_pattern_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(tmp.path());
        let mut bundle = Bundle::default();
        bundle.push("spanish/app.properties".to_string(), "a=b\n".to_string());

        sink.write(&bundle).unwrap();
        assert!(tmp.path().join("spanish").join("app.properties").exists());
    }

    #[test]
    fn test_directory_sink_rejects_parent_segments() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let sink = DirectorySink::new(&out);
        let mut bundle = sample();
        bundle.push("../escape.json".to_string(), "{}\n".to_string());

        let err = sink.write(&bundle).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!tmp.path().join("escape.json").exists());
        // The valid files of the bundle are not written either
        assert!(!out.exists());
    }

    #[test]
    fn test_directory_sink_rejects_absolute_names() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("elsewhere.json");
        let sink = DirectorySink::new(tmp.path().join("out"));
        let mut bundle = Bundle::default();
        bundle.push(target.display().to_string(), "{}\n".to_string());

        let err = sink.write(&bundle).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!target.exists());
    }

    #[test]
    fn test_directory_sink_allows_dots_inside_names() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(tmp.path());
        let mut bundle = Bundle::default();
        bundle.push("app..v2_es.json".to_string(), "{}\n".to_string());

        sink.write(&bundle).unwrap();
        assert!(tmp.path().join("app..v2_es.json").exists());
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemorySink::new();
        assert!(sink.last().is_none());
        sink.write(&sample()).unwrap();
        let last = sink.last().unwrap();
        assert_eq!(last.len(), 2);
        assert_eq!(last.get("app_fr.json").unwrap().content, "{\"a\": 1}\n");
    }
}
