use std::path::Path;

use log::debug;

use super::BuiltIndex;
use super::PHASE_PAIRWISE;
use crate::dataset::Dataset;
use crate::runtime::Error;
use crate::store::{kept_key, rejected_key, ArtifactStore, DIR_KEPT, DIR_REJECTED};
use crate::tasks::TaskList;
use crate::utils::quote_path;

/// Settings of the kmer query engine
#[derive(Clone, Debug)]
pub struct QueryParams {
    pub tool: String,
    pub fixed_params: [String; 2],
}

impl Default for QueryParams {
    fn default() -> Self {
        QueryParams {
            tool: "query_per_sequence".to_string(),
            fixed_params: ["1".to_string(), "10".to_string()],
        }
    }
}

impl QueryParams {
    fn command(&self, path_index: &Path, path_query: &Path, path_kept: &Path, path_rejected: &Path) -> String {
        format!(
            "{} {} {} {} {} 1>{} 2>{}",
            self.tool,
            self.fixed_params[0],
            self.fixed_params[1],
            quote_path(path_index),
            quote_path(path_query),
            quote_path(path_kept),
            quote_path(path_rejected)
        )
    }
}

/// Every index against every dataset, self-comparisons included. A pair is
/// done once its kept output exists. Each pair writes to its own files, so
/// the tasks are safe to run concurrently
pub fn plan_pairwise(
    store: &dyn ArtifactStore,
    indexes: &[BuiltIndex],
    datasets: &[Dataset],
    params: &QueryParams,
) -> Result<TaskList, Error> {
    store.ensure_dir(Path::new(DIR_KEPT))?;
    store.ensure_dir(Path::new(DIR_REJECTED))?;

    let mut tasks = TaskList::new(PHASE_PAIRWISE);
    for index in indexes {
        store.ensure_dir(&Path::new(DIR_KEPT).join(&index.name))?;
        store.ensure_dir(&Path::new(DIR_REJECTED).join(&index.name))?;

        for query in datasets {
            let key_kept = kept_key(&index.name, &query.name);
            if store.has(&key_kept) {
                continue;
            }
            let task = params.command(
                &index.path,
                &query.path,
                &store.locate(&key_kept),
                &store.locate(&rejected_key(&index.name, &query.name)),
            );
            debug!("Planned {}", task);
            tasks.push_with_output(task, key_kept);
        }
    }
    Ok(tasks)
}
