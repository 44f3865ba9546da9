use std::path::{Component, Path};

use log::{debug, warn};

use super::{PHASE_COUNT_INPUT, PHASE_COUNT_KEPT};
use crate::dataset::Dataset;
use crate::runtime::Error;
use crate::store::{count_key, mode_key, ArtifactStore, DIR_COUNTS, DIR_KEPT, DIR_MODE};
use crate::tasks::TaskList;
use crate::utils::quote_path;

/// Number of FASTA records of `input` written as text to `output`.
/// grep exits with 1 when nothing matched, which is a valid zero count
pub fn count_command(input: &Path, output: &Path) -> String {
    format!(
        "grep -ce '^>' {} > {}; test $? -le 1",
        quote_path(input),
        quote_path(output)
    )
}

/// Count the sequences kept by every pairwise comparison that has not been counted yet
pub fn plan_kept_counts(store: &dyn ArtifactStore) -> Result<TaskList, Error> {
    store.ensure_dir(Path::new(DIR_MODE))?;

    let mut tasks = TaskList::new(PHASE_COUNT_KEPT);
    for key_kept in store.list_files(Path::new(DIR_KEPT))? {
        let parts: Vec<&str> = key_kept
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect();
        let (index_name, query_name) = match parts.as_slice() {
            [_, index_name, query_name] => (*index_name, *query_name),
            _ => {
                warn!("Ignoring unexpected file {}", store.locate(&key_kept).display());
                continue;
            }
        };

        let key_mode = mode_key(index_name, query_name);
        if store.has(&key_mode) {
            continue;
        }
        store.ensure_dir(&Path::new(DIR_MODE).join(index_name))?;

        let task = count_command(&store.locate(&key_kept), &store.locate(&key_mode));
        debug!("Planned {}", task);
        tasks.push_with_output(task, key_mode);
    }
    Ok(tasks)
}

/// Count the sequences of each dataset that has no count yet
pub fn plan_input_counts(store: &dyn ArtifactStore, datasets: &[Dataset]) -> Result<TaskList, Error> {
    store.ensure_dir(Path::new(DIR_COUNTS))?;

    let mut tasks = TaskList::new(PHASE_COUNT_INPUT);
    for dataset in datasets {
        let key = count_key(&dataset.name);
        if store.has(&key) {
            continue;
        }
        let task = count_command(&dataset.path, &store.locate(&key));
        debug!("Planned {}", task);
        tasks.push_with_output(task, key);
    }
    Ok(tasks)
}
