use std::fs;
use std::fs::File;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use log::{debug, warn};
use strum_macros::{Display, EnumString};

use crate::runtime::Error;
use crate::utils::command_to_string;

///////////////////////////////
/// Something that executes a task list file to completion. Per-task exit
/// codes are folded into one overall outcome
pub trait TaskRunner {
    fn name(&self) -> &str;

    fn run(&self, path_tasks: &Path) -> Result<(), Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RunnerKind {
    /// GNU parallel reading the task list on stdin
    Parallel,
    /// In-process thread pool running each line through `sh -c`
    Native,
}

///////////////////////////////
/// Hands the task list to GNU parallel
#[derive(Clone, Debug)]
pub struct ParallelRunner {
    pub program: String,
    pub num_threads: usize,
}

impl ParallelRunner {
    pub fn new<S: Into<String>>(program: S, num_threads: usize) -> ParallelRunner {
        ParallelRunner {
            program: program.into(),
            num_threads,
        }
    }
}

impl TaskRunner for ParallelRunner {
    fn name(&self) -> &str {
        &self.program
    }

    fn run(&self, path_tasks: &Path) -> Result<(), Error> {
        let file_tasks = File::open(path_tasks).map_err(|_| Error::file_not_found(path_tasks))?;

        let mut words = self.program.split_whitespace();
        let program = words.next().unwrap_or("parallel");
        let mut cmd = Command::new(program);
        cmd.args(words)
            .arg("-j")
            .arg(self.num_threads.to_string())
            .stdin(Stdio::from(file_tasks));
        debug!("Invoking {} < {}", command_to_string(&cmd), path_tasks.display());

        let status = cmd
            .status()
            .map_err(|_| Error::utility_not_executable(program))?;
        if !status.success() {
            return Err(Error::execution(
                self.name(),
                path_tasks,
                Some(format!("{}", status)),
            ));
        }
        Ok(())
    }
}

///////////////////////////////
/// Runs each task line with a shell on a bounded thread pool
#[derive(Clone, Debug)]
pub struct ThreadPoolRunner {
    pub shell: String,
    pub num_threads: usize,
}

impl ThreadPoolRunner {
    pub fn new(num_threads: usize) -> ThreadPoolRunner {
        ThreadPoolRunner {
            shell: "sh".to_string(),
            num_threads,
        }
    }
}

impl TaskRunner for ThreadPoolRunner {
    fn name(&self) -> &str {
        "native"
    }

    fn run(&self, path_tasks: &Path) -> Result<(), Error> {
        let text = fs::read_to_string(path_tasks).map_err(|_| Error::file_not_found(path_tasks))?;
        let lines: Vec<String> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect();
        let num_tasks = lines.len();

        let thread_pool = threadpool::ThreadPool::new(self.num_threads.max(1));
        let (tx, rx) = crossbeam::channel::unbounded::<(String, std::io::Result<ExitStatus>)>();
        for line in lines {
            let tx = tx.clone();
            let shell = self.shell.clone();
            thread_pool.execute(move || {
                debug!("Running task: {}", line);
                let status = Command::new(&shell).arg("-c").arg(&line).status();
                let _ = tx.send((line, status));
            });
        }
        drop(tx);
        thread_pool.join();

        let mut failed: Vec<String> = Vec::new();
        for (line, status) in rx.iter() {
            match status {
                Ok(status) if status.success() => {}
                Ok(status) => {
                    warn!("Task failed ({}): {}", status, line);
                    failed.push(line);
                }
                Err(e) => {
                    warn!("Task could not be started ({}): {}", e, line);
                    failed.push(line);
                }
            }
        }
        if thread_pool.panic_count() > 0 {
            return Err(Error::execution(
                self.name(),
                path_tasks,
                Some("a worker thread panicked"),
            ));
        }

        if let Some(first) = failed.first() {
            return Err(Error::execution(
                self.name(),
                path_tasks,
                Some(format!(
                    "{} of {} tasks failed, first: {}",
                    failed.len(),
                    num_tasks,
                    first
                )),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_kind_names() {
        assert_eq!("native".parse::<RunnerKind>().unwrap(), RunnerKind::Native);
        assert_eq!(RunnerKind::Parallel.to_string(), "parallel");
        assert!("slurm".parse::<RunnerKind>().is_err());
    }

    #[test]
    fn native_runner_executes_all_lines() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path();
        let path_tasks = out.join("tasks.jobs");
        let text = (0..5)
            .map(|i| format!("echo {} > {}", i, out.join(format!("f{}", i)).display()))
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(&path_tasks, text).unwrap();

        ThreadPoolRunner::new(3).run(&path_tasks).unwrap();
        for i in 0..5 {
            let content = fs::read_to_string(out.join(format!("f{}", i))).unwrap();
            assert_eq!(content.trim(), i.to_string());
        }
    }

    #[test]
    fn native_runner_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path_tasks = dir.path().join("tasks.jobs");
        fs::write(&path_tasks, "true\nexit 3\n").unwrap();

        let err = ThreadPoolRunner::new(2).run(&path_tasks).unwrap_err();
        assert!(matches!(err, Error::Execution { .. }));
    }
}
