use std::path::{Path, PathBuf};

use log::debug;

use super::PHASE_INDEX;
use crate::dataset::Dataset;
use crate::runtime::Error;
use crate::store::{index_key, ArtifactStore, DIR_INDEX};
use crate::tasks::TaskList;
use crate::utils::quote_path;

/// Settings of the kmer indexing engine
#[derive(Clone, Debug)]
pub struct IndexParams {
    pub tool: String,
    pub kmer_size: usize,
    pub num_threads: usize,
    pub hash_size: String,
}

impl IndexParams {
    fn command(&self, path_source: &Path, path_index: &Path) -> String {
        format!(
            "{} count -m {} -t {} -s {} -o {} {}",
            self.tool,
            self.kmer_size,
            self.num_threads,
            self.hash_size,
            quote_path(path_index),
            quote_path(path_source)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltIndex {
    pub name: String,
    pub path: PathBuf,
}

/// One build task per dataset that has no index yet
pub fn plan_index_build(
    store: &dyn ArtifactStore,
    datasets: &[Dataset],
    params: &IndexParams,
) -> Result<TaskList, Error> {
    store.ensure_dir(Path::new(DIR_INDEX))?;

    let mut tasks = TaskList::new(PHASE_INDEX);
    for dataset in datasets {
        let key = index_key(&dataset.name);
        if store.has(&key) {
            continue;
        }
        let task = params.command(&dataset.path, &store.locate(&key));
        debug!("Planned {}", task);
        tasks.push_with_output(task, key);
    }
    Ok(tasks)
}

/// Indexes present for the given datasets. Having none is fatal
pub fn built_indexes(
    store: &dyn ArtifactStore,
    datasets: &[Dataset],
) -> Result<Vec<BuiltIndex>, Error> {
    let indexes: Vec<BuiltIndex> = datasets
        .iter()
        .filter(|d| store.has(&index_key(&d.name)))
        .map(|d| BuiltIndex {
            name: d.name.clone(),
            path: store.locate(&index_key(&d.name)),
        })
        .collect();

    if indexes.is_empty() {
        return Err(Error::missing_indexes(store.locate(Path::new(DIR_INDEX))));
    }
    Ok(indexes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FsArtifactStore;

    fn params() -> IndexParams {
        IndexParams {
            tool: "jellyfish".to_string(),
            kmer_size: 20,
            num_threads: 12,
            hash_size: "100M".to_string(),
        }
    }

    fn datasets() -> Vec<Dataset> {
        ["x.fa", "y.fa"]
            .iter()
            .map(|n| Dataset { name: n.to_string(), path: PathBuf::from("/in").join(n) })
            .collect()
    }

    #[test]
    fn builds_only_missing_indexes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();
        store.write(&index_key("y.fa"), b"jf").unwrap();

        let tasks = plan_index_build(&store, &datasets(), &params()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks.tasks[0],
            format!(
                "jellyfish count -m 20 -t 12 -s 100M -o {} /in/x.fa",
                dir.path().join("jellyfish/x.fa").display()
            )
        );
        assert!(dir.path().join(DIR_INDEX).is_dir());

        let indexes = built_indexes(&store, &datasets()).unwrap();
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].name, "y.fa");
    }

    #[test]
    fn nothing_to_build_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();
        for d in datasets() {
            store.write(&index_key(&d.name), b"jf").unwrap();
        }
        assert!(plan_index_build(&store, &datasets(), &params()).unwrap().is_empty());
    }

    #[test]
    fn no_index_at_all_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();
        let err = built_indexes(&store, &datasets()).unwrap_err();
        assert!(matches!(err, Error::MissingIndexes { .. }));
    }
}
