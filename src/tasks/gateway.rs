use log::{info, warn};

use super::TaskList;
use super::TaskRunner;
use crate::runtime::Error;
use crate::store::task_list_key;
use crate::store::ArtifactStore;

///////////////////////////////
/// Writes a task list to the store, has the runner execute it and then
/// discards it. A failing runner aborts and leaves the list for inspection.
/// Outputs of a failed list are removed, as a half-run command may already
/// have created its output file and would otherwise count as done
pub struct ExecutionGateway<'a> {
    store: &'a dyn ArtifactStore,
    runner: &'a dyn TaskRunner,
}

impl<'a> ExecutionGateway<'a> {
    pub fn new(store: &'a dyn ArtifactStore, runner: &'a dyn TaskRunner) -> ExecutionGateway<'a> {
        ExecutionGateway { store, runner }
    }

    /// Returns the number of tasks that were executed
    pub fn execute(&self, tasks: &TaskList, msg: &str) -> Result<usize, Error> {
        let key = task_list_key(&tasks.phase);
        self.store.write(&key, tasks.to_text().as_bytes())?;

        info!("{} (# jobs = {})", msg, tasks.len());
        if !tasks.is_empty() {
            if let Err(e) = self.runner.run(&self.store.locate(&key)) {
                self.discard_outputs(tasks)?;
                return Err(e);
            }
        }

        self.store.remove(&key)?;
        Ok(tasks.len())
    }

    fn discard_outputs(&self, tasks: &TaskList) -> Result<(), Error> {
        for output in &tasks.outputs {
            if self.store.has(output) {
                warn!("Removing output of failed phase {}: {}", tasks.phase, self.store.locate(output).display());
                self.store.remove(output)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FsArtifactStore;
    use std::cell::RefCell;
    use std::path::Path;

    struct RecordingRunner {
        seen: RefCell<Vec<String>>,
        fail: bool,
    }

    impl TaskRunner for RecordingRunner {
        fn name(&self) -> &str {
            "recording"
        }

        fn run(&self, path_tasks: &Path) -> Result<(), Error> {
            let text = std::fs::read_to_string(path_tasks)?;
            self.seen
                .borrow_mut()
                .extend(text.lines().map(|l| l.to_string()));
            if self.fail {
                Err(Error::execution("recording", path_tasks, Some("exit status: 1")))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn runs_then_discards_task_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();
        let runner = RecordingRunner { seen: RefCell::new(Vec::new()), fail: false };

        let mut tasks = TaskList::new("count");
        tasks.push("a");
        tasks.push("b");
        let n = ExecutionGateway::new(&store, &runner).execute(&tasks, "Counting").unwrap();

        assert_eq!(n, 2);
        assert_eq!(*runner.seen.borrow(), vec!["a".to_string(), "b".to_string()]);
        assert!(!store.has(&task_list_key("count")));
    }

    #[test]
    fn empty_list_never_reaches_runner() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();
        let runner = RecordingRunner { seen: RefCell::new(Vec::new()), fail: true };

        let n = ExecutionGateway::new(&store, &runner)
            .execute(&TaskList::new("index"), "Counting kmers")
            .unwrap();
        assert_eq!(n, 0);
        assert!(runner.seen.borrow().is_empty());
        assert!(!store.has(&task_list_key("index")));
    }

    #[test]
    fn failure_is_fatal_and_keeps_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();
        let runner = RecordingRunner { seen: RefCell::new(Vec::new()), fail: true };

        let mut tasks = TaskList::new("pairwise");
        tasks.push("query x y");
        let err = ExecutionGateway::new(&store, &runner)
            .execute(&tasks, "Pairwise comparison")
            .unwrap_err();
        assert!(matches!(err, Error::Execution { .. }));
        assert!(store.has(&task_list_key("pairwise")));
    }

    #[test]
    fn failure_removes_outputs_of_the_phase() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path()).unwrap();
        let runner = RecordingRunner { seen: RefCell::new(Vec::new()), fail: true };

        let done = Path::new("reads_kept/x/done").to_path_buf();
        let half = Path::new("reads_kept/x/y").to_path_buf();
        let never = Path::new("reads_kept/x/z").to_path_buf();
        store.write(&done, b">r\nA\n").unwrap();
        // a redirection creates the output before the command fails
        store.write(&half, b"").unwrap();

        let mut tasks = TaskList::new("pairwise");
        tasks.push_with_output("query x y", half.clone());
        tasks.push_with_output("query x z", never.clone());
        ExecutionGateway::new(&store, &runner)
            .execute(&tasks, "Pairwise comparison")
            .unwrap_err();

        assert!(!store.has(&half));
        assert!(!store.has(&never));
        assert!(store.has(&done));
    }
}
