use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use log::info;

use super::constants::*;
use crate::collect::{collect_directed_counts, collect_sample_counts};
use crate::dataset::{resolve_datasets, Dataset};
use crate::matrix::{build_matrices, write_matrices, DistanceMethod};
use crate::plan::{
    built_indexes, plan_index_build, plan_input_counts, plan_kept_counts, plan_pairwise,
    plan_subset, IndexParams, QueryParams,
};
use crate::runtime::Error;
use crate::store::{FsArtifactStore, DIR_FIGURES};
use crate::tasks::{ExecutionGateway, ParallelRunner, RunnerKind, TaskRunner, ThreadPoolRunner};
use crate::utils::{check_tool, expand_and_resolve, shell_quote};

/// Commandline option: Compare every dataset against every other through shared kmers
#[derive(Args)]
pub struct RunCMD {
    // Input files or directories
    #[arg(short = 'q', long = "query", value_parser = clap::value_parser!(PathBuf), num_args = 1.., required = true)]
    pub queries: Vec<PathBuf>,

    // Output directory
    #[arg(short = 'o', long = "outdir", value_parser = clap::value_parser!(PathBuf), default_value = DEFAULT_PATH_OUTDIR)]
    pub path_outdir: PathBuf,

    // Number of concurrent tasks; also handed to the kmer counter
    #[arg(short = 't', long = "num-threads", default_value_t = DEFAULT_THREADS)]
    pub num_threads: usize,

    #[arg(short = 'k', long = "kmer-size", default_value_t = DEFAULT_KMER_SIZE)]
    pub kmer_size: usize,

    // Hash size of the kmer counter
    #[arg(short = 's', long = "hash-size", default_value = DEFAULT_HASH_SIZE)]
    pub hash_size: String,

    // Subsample each input to this many sequences; 0 uses the inputs as-is
    #[arg(short = 'x', long = "max-seqs", default_value_t = DEFAULT_MAX_SEQS)]
    pub max_seqs: usize,

    #[arg(long = "distance", default_value = DEFAULT_DISTANCE)]
    pub distance: String,

    // How task lists are executed: parallel or native
    #[arg(long = "runner", default_value = DEFAULT_RUNNER)]
    pub runner: String,

    #[arg(long = "jellyfish", default_value = DEFAULT_TOOL_JELLYFISH)]
    pub tool_jellyfish: String,

    #[arg(long = "query-tool", default_value = DEFAULT_TOOL_QUERY)]
    pub tool_query: String,

    #[arg(long = "parallel", default_value = DEFAULT_TOOL_PARALLEL)]
    pub tool_parallel: String,
}
impl RunCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let params = self.to_params()?;
        let report = Fizkin::run(&params)?;

        info!(
            "Done, {} jobs run, {} matrices written, see output dir \"{}\"",
            report.num_jobs,
            report.matrices.len(),
            params.path_outdir.display()
        );
        Ok(())
    }

    /// Validate the options. Nothing is touched on disk
    pub fn to_params(&self) -> Result<FizkinParams, Error> {
        if self.num_threads < 1 {
            return Err(Error::configuration("--num-threads must be at least 1"));
        }
        if self.kmer_size < 1 {
            return Err(Error::configuration("--kmer-size must be at least 1"));
        }
        if self.hash_size.trim().is_empty() {
            return Err(Error::configuration("--hash-size cannot be empty"));
        }
        let distance = DistanceMethod::from_str(&self.distance)
            .map_err(|_| Error::configuration(format!("unknown distance method \"{}\"", self.distance)))?;
        let runner = RunnerKind::from_str(&self.runner)
            .map_err(|_| Error::configuration(format!("unknown runner \"{}\"", self.runner)))?;

        let exe = std::env::current_exe()?;
        let subset_tool = format!("{} subset", shell_quote(&exe.to_string_lossy()));

        Ok(FizkinParams {
            queries: self.queries.clone(),
            path_outdir: expand_and_resolve(&self.path_outdir)?,
            num_threads: self.num_threads,
            max_seqs: self.max_seqs,
            distance,
            runner,
            index: IndexParams {
                tool: self.tool_jellyfish.clone(),
                kmer_size: self.kmer_size,
                num_threads: self.num_threads,
                hash_size: self.hash_size.trim().to_string(),
            },
            query: QueryParams {
                tool: self.tool_query.clone(),
                ..QueryParams::default()
            },
            tool_parallel: self.tool_parallel.clone(),
            tool_subset: subset_tool,
        })
    }
}

#[derive(Clone, Debug)]
pub struct FizkinParams {
    pub queries: Vec<PathBuf>,
    pub path_outdir: PathBuf,
    pub num_threads: usize,
    pub max_seqs: usize,
    pub distance: DistanceMethod,
    pub runner: RunnerKind,
    pub index: IndexParams,
    pub query: QueryParams,
    pub tool_parallel: String,
    pub tool_subset: String,
}

impl FizkinParams {
    pub fn make_runner(&self) -> Box<dyn TaskRunner> {
        match self.runner {
            RunnerKind::Parallel => Box::new(ParallelRunner::new(self.tool_parallel.clone(), self.num_threads)),
            RunnerKind::Native => Box::new(ThreadPoolRunner::new(self.num_threads)),
        }
    }

    /// External tools that must be spawnable before any work starts
    fn preflight(&self) -> Result<(), Error> {
        if self.runner == RunnerKind::Parallel {
            check_tool(&self.tool_parallel)?;
            check_tool(&self.index.tool)?;
            check_tool(&self.query.tool)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct FizkinReport {
    /// Tasks executed over all phases; 0 when everything was already done
    pub num_jobs: usize,
    pub matrices: Vec<PathBuf>,
}

/// Algorithm: the full comparison pipeline, one phase after the other
pub struct Fizkin {}
impl Fizkin {
    pub fn run(params: &FizkinParams) -> Result<FizkinReport, Error> {
        params.preflight()?;

        let store = FsArtifactStore::new(&params.path_outdir)?;
        let runner = params.make_runner();
        let gateway = ExecutionGateway::new(&store, runner.as_ref());

        let datasets = resolve_datasets(&params.queries)?;
        info!(
            "Found {} input file{}",
            datasets.len(),
            if datasets.len() == 1 { "" } else { "s" }
        );

        let mut num_jobs = 0;

        let datasets: Vec<Dataset> = if params.max_seqs > 0 {
            let (tasks, subsets) = plan_subset(&store, &datasets, params.max_seqs, &params.tool_subset)?;
            num_jobs += gateway.execute(&tasks, "Subsetting input files")?;
            subsets
        } else {
            info!("No max_seqs, using input files as-is");
            datasets
        };

        let tasks = plan_index_build(&store, &datasets, &params.index)?;
        num_jobs += gateway.execute(&tasks, "Counting kmers")?;

        let indexes = built_indexes(&store, &datasets)?;
        let tasks = plan_pairwise(&store, &indexes, &datasets, &params.query)?;
        num_jobs += gateway.execute(&tasks, "Pairwise comparison")?;

        let tasks = plan_kept_counts(&store)?;
        num_jobs += gateway.execute(&tasks, "Counting kept reads")?;

        let tasks = plan_input_counts(&store, &datasets)?;
        num_jobs += gateway.execute(&tasks, "Counting input sequences")?;

        let totals = collect_sample_counts(&store)?;
        let counts = collect_directed_counts(&store)?;
        let set = build_matrices(&counts, Some(&totals), Some(params.distance))?;
        let matrices = write_matrices(&store, Path::new(DIR_FIGURES), &set)?;

        Ok(FizkinReport { num_jobs, matrices })
    }
}
