use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use log::info;

use super::constants::DEFAULT_DISTANCE;
use crate::collect::{collect_directed_counts_from, collect_sample_counts_from};
use crate::matrix::{build_matrices, write_matrices, DistanceMethod};
use crate::runtime::Error;
use crate::store::FsArtifactStore;

/// Commandline option: Build the matrices from an existing tree of pairwise counts
#[derive(Args)]
pub struct MatrixCMD {
    // Directory of <index>/<query> count files
    #[arg(short = 'm', long = "mode-dir", value_parser = clap::value_parser!(PathBuf))]
    pub path_mode: PathBuf,

    // Output directory
    #[arg(short = 'o', long = "out-dir", value_parser = clap::value_parser!(PathBuf))]
    pub path_out: PathBuf,

    // Directory of per-dataset sequence totals; enables the normalized matrices
    #[arg(short = 'c', long = "counts-dir", value_parser = clap::value_parser!(PathBuf))]
    pub path_counts: Option<PathBuf>,

    // Distance method
    #[arg(long = "distance", default_value = DEFAULT_DISTANCE)]
    pub distance: String,
}
impl MatrixCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let distance = DistanceMethod::from_str(&self.distance)
            .map_err(|_| Error::configuration(format!("unknown distance method \"{}\"", self.distance)))?;

        let params = MatrixParams {
            path_mode: self.path_mode.clone(),
            path_counts: self.path_counts.clone(),
            path_out: self.path_out.clone(),
            distance,
        };

        let written = BuildMatrix::run(&params)?;
        info!("Done, wrote {} matrices to {}", written.len(), params.path_out.display());
        Ok(())
    }
}

pub struct MatrixParams {
    pub path_mode: PathBuf,
    pub path_counts: Option<PathBuf>,
    pub path_out: PathBuf,
    pub distance: DistanceMethod,
}

/// Algorithm: collect counts and reduce them into matrices
pub struct BuildMatrix {}
impl BuildMatrix {
    pub fn run(params: &MatrixParams) -> Result<Vec<PathBuf>, Error> {
        if !params.path_mode.is_dir() {
            return Err(Error::file_not_found(&params.path_mode));
        }
        let store_mode = FsArtifactStore::new(&params.path_mode)?;
        let counts = collect_directed_counts_from(&store_mode, Path::new(""))?;

        let totals = match &params.path_counts {
            Some(path_counts) => {
                if !path_counts.is_dir() {
                    return Err(Error::file_not_found(path_counts));
                }
                let store_counts = FsArtifactStore::new(path_counts)?;
                Some(collect_sample_counts_from(&store_counts, Path::new(""))?)
            }
            None => None,
        };

        let set = build_matrices(&counts, totals.as_ref(), Some(params.distance))?;

        let store_out = FsArtifactStore::new(&params.path_out)?;
        write_matrices(&store_out, Path::new(""), &set)
    }
}
