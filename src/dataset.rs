use std::collections::HashMap;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::runtime::Error;

///////////////////////////////
/// One input sequence file. The name is the file name of the source and is
/// used as the key of every artifact derived from it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub path: PathBuf,
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Dataset, Error> {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::configuration(format!("cannot derive a dataset name from {:?}", path))
            })?
            .to_string();
        Ok(Dataset { name, path })
    }

    /// Same dataset, read from another location
    pub fn relocated<P: AsRef<Path>>(&self, path: P) -> Dataset {
        Dataset {
            name: self.name.clone(),
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Resolve files and directories into a list of datasets. A directory
/// contributes its direct file entries, in name order. Duplicates keep
/// their first position.
pub fn resolve_datasets(specs: &[PathBuf]) -> Result<Vec<Dataset>, Error> {
    let mut sources: Vec<PathBuf> = Vec::new();
    for spec in specs {
        if spec.is_dir() {
            let mut entries: Vec<PathBuf> = Vec::new();
            for entry in fs::read_dir(spec)? {
                // follows symlinks, so linked sample files count as files
                let path = entry?.path();
                if path.is_file() {
                    entries.push(path);
                }
            }
            entries.sort();
            sources.extend(entries);
        } else if spec.is_file() {
            sources.push(spec.clone());
        } else {
            warn!("--query \"{}\" neither file nor directory", spec.display());
        }
    }

    let mut seen_paths: HashSet<PathBuf> = HashSet::new();
    let mut seen_names: HashMap<String, PathBuf> = HashMap::new();
    let mut datasets = Vec::new();
    for source in sources {
        let identity = fs::canonicalize(&source).unwrap_or_else(|_| source.clone());
        if !seen_paths.insert(identity) {
            continue;
        }

        let dataset = Dataset::from_path(&source)?;
        if let Some(other) = seen_names.get(&dataset.name) {
            return Err(Error::configuration(format!(
                "inputs {:?} and {:?} share the dataset name \"{}\"",
                other, source, dataset.name
            )));
        }
        seen_names.insert(dataset.name.clone(), source);
        datasets.push(dataset);
    }

    if datasets.is_empty() {
        return Err(Error::no_input(specs));
    }
    Ok(datasets)
}
