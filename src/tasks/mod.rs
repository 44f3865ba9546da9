use std::path::PathBuf;

mod gateway;
mod runner;

pub use gateway::ExecutionGateway;
pub use runner::ParallelRunner;
pub use runner::RunnerKind;
pub use runner::TaskRunner;
pub use runner::ThreadPoolRunner;

///////////////////////////////
/// Independent shell commands of one pipeline phase. Order carries no meaning.
/// `outputs` are the artifact keys the commands create
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskList {
    pub phase: String,
    pub tasks: Vec<String>,
    pub outputs: Vec<PathBuf>,
}

impl TaskList {
    pub fn new<S: Into<String>>(phase: S) -> TaskList {
        TaskList {
            phase: phase.into(),
            tasks: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn push<S: Into<String>>(&mut self, task: S) {
        self.tasks.push(task.into());
    }

    /// Add a task together with the artifact it writes
    pub fn push_with_output<S: Into<String>>(&mut self, task: S, key: PathBuf) {
        self.tasks.push(task.into());
        self.outputs.push(key);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.tasks.iter()
    }

    /// One command per line, as consumed by the runners
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for task in &self.tasks {
            text.push_str(task);
            text.push('\n');
        }
        text
    }
}
