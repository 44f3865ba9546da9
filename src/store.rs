use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::runtime::Error;

pub const DIR_SUBSET: &str = "subset";
pub const DIR_INDEX: &str = "jellyfish";
pub const DIR_KEPT: &str = "reads_kept";
pub const DIR_REJECTED: &str = "reads_rejected";
pub const DIR_MODE: &str = "mode";
pub const DIR_COUNTS: &str = "counts";
pub const DIR_FIGURES: &str = "figures";

///////////////////////////////
/// Name-addressed storage of pipeline artifacts. Keys are relative paths;
/// presence of an artifact means the work that produces it is done.
pub trait ArtifactStore {
    /// Concrete location of a key, as handed to external tools
    fn locate(&self, key: &Path) -> PathBuf;

    fn has(&self, key: &Path) -> bool;

    fn write(&self, key: &Path, bytes: &[u8]) -> Result<(), Error>;

    fn read_to_string(&self, key: &Path) -> Result<String, Error>;

    fn remove(&self, key: &Path) -> Result<(), Error>;

    /// Create-if-absent; safe to call repeatedly
    fn ensure_dir(&self, key: &Path) -> Result<(), Error>;

    /// All files below a key, recursively, as sorted keys
    fn list_files(&self, key: &Path) -> Result<Vec<PathBuf>, Error>;
}

///////////////////////////////
/// Artifact store backed by a directory
#[derive(Clone, Debug)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(FsArtifactStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactStore for FsArtifactStore {
    fn locate(&self, key: &Path) -> PathBuf {
        self.root.join(key)
    }

    fn has(&self, key: &Path) -> bool {
        self.locate(key).is_file()
    }

    fn write(&self, key: &Path, bytes: &[u8]) -> Result<(), Error> {
        let path = self.locate(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        Ok(())
    }

    fn read_to_string(&self, key: &Path) -> Result<String, Error> {
        let path = self.locate(key);
        if !path.is_file() {
            return Err(Error::file_not_found(&path));
        }
        Ok(fs::read_to_string(&path)?)
    }

    fn remove(&self, key: &Path) -> Result<(), Error> {
        let path = self.locate(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn ensure_dir(&self, key: &Path) -> Result<(), Error> {
        // create_dir_all tolerates a concurrent creator
        fs::create_dir_all(self.locate(key))?;
        Ok(())
    }

    fn list_files(&self, key: &Path) -> Result<Vec<PathBuf>, Error> {
        let dir = self.locate(key);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                Error::parse_error(format!("directory listing of {:?}", dir), Some(e.to_string()))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&self.root) {
                files.push(rel.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}

////////////////////////////// Artifact keys

pub fn subset_key(name: &str) -> PathBuf {
    Path::new(DIR_SUBSET).join(name)
}

pub fn index_key(name: &str) -> PathBuf {
    Path::new(DIR_INDEX).join(name)
}

pub fn kept_key(index_name: &str, query_name: &str) -> PathBuf {
    Path::new(DIR_KEPT).join(index_name).join(query_name)
}

pub fn rejected_key(index_name: &str, query_name: &str) -> PathBuf {
    Path::new(DIR_REJECTED).join(index_name).join(query_name)
}

pub fn mode_key(index_name: &str, query_name: &str) -> PathBuf {
    Path::new(DIR_MODE).join(index_name).join(query_name)
}

pub fn count_key(name: &str) -> PathBuf {
    Path::new(DIR_COUNTS).join(name)
}

pub fn task_list_key(phase: &str) -> PathBuf {
    PathBuf::from(format!("{}.jobs", phase))
}
