use clap::Subcommand;

// Module declarations (alphabetical)
pub mod constants;
pub mod extract_reads;
pub mod matrix;
pub mod run;
pub mod subset;

pub use extract_reads::{ExtractReads, ExtractReadsCMD, ExtractReadsParams};
pub use matrix::{BuildMatrix, MatrixCMD, MatrixParams};
pub use run::{Fizkin, FizkinParams, FizkinReport, RunCMD};
pub use subset::{Subset, SubsetCMD, SubsetParams};

///////////////////////////////
/// Possible subcommands to parse
#[derive(Subcommand, strum_macros::Display)]
pub enum Commands {
    /// Run the whole comparison pipeline
    Run(RunCMD),
    /// Build matrices from existing pairwise counts
    Matrix(MatrixCMD),
    /// Randomly subsample a FASTA file
    Subset(SubsetCMD),
    /// Extract FASTA records by id
    ExtractReads(ExtractReadsCMD),
}

impl Commands {
    pub fn try_execute(&mut self) -> anyhow::Result<()> {
        match self {
            Commands::Run(cmd) => cmd.try_execute(),
            Commands::Matrix(cmd) => cmd.try_execute(),
            Commands::Subset(cmd) => cmd.try_execute(),
            Commands::ExtractReads(cmd) => cmd.try_execute(),
        }
    }
}
