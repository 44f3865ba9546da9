use std::path::Path;

use log::debug;

use super::PHASE_SUBSET;
use crate::dataset::Dataset;
use crate::runtime::Error;
use crate::store::{subset_key, ArtifactStore, DIR_SUBSET};
use crate::tasks::TaskList;
use crate::utils::quote_path;

/// Plan sampling of each dataset down to `max_seqs` records. Returns the
/// datasets as they are to be read by the later phases
pub fn plan_subset(
    store: &dyn ArtifactStore,
    datasets: &[Dataset],
    max_seqs: usize,
    subset_tool: &str,
) -> Result<(TaskList, Vec<Dataset>), Error> {
    store.ensure_dir(Path::new(DIR_SUBSET))?;
    let path_subset_dir = store.locate(Path::new(DIR_SUBSET));

    let mut tasks = TaskList::new(PHASE_SUBSET);
    let mut subset_datasets = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        let key = subset_key(&dataset.name);
        if !store.has(&key) {
            let task = format!(
                "{} -o {} -n {} {}",
                subset_tool,
                quote_path(&path_subset_dir),
                max_seqs,
                quote_path(&dataset.path)
            );
            debug!("Planned {}", task);
            tasks.push_with_output(task, key.clone());
        }
        subset_datasets.push(dataset.relocated(store.locate(&key)));
    }
    Ok((tasks, subset_datasets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FsArtifactStore;

    #[test]
    fn existing_subsets_are_reused() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path().join("out")).unwrap();
        let datasets = vec![
            Dataset { name: "a.fa".into(), path: "/in/a.fa".into() },
            Dataset { name: "b.fa".into(), path: "/in/b.fa".into() },
        ];
        store.write(&subset_key("b.fa"), b">r\nA\n").unwrap();

        let (tasks, subsets) = plan_subset(&store, &datasets, 100, "fizkin subset").unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks.tasks[0],
            format!("fizkin subset -o {} -n 100 /in/a.fa", store.locate(Path::new(DIR_SUBSET)).display())
        );
        assert_eq!(subsets[1].path, store.locate(&subset_key("b.fa")));
        assert_eq!(subsets[0].name, "a.fa");
    }
}
