use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::constants::{DEFAULT_PATH_SUBSET, DEFAULT_SUBSET_MIN, DEFAULT_SUBSET_NUM};
use crate::fileformat::{count_fasta_records, create_fasta_writer, open_fasta, record_error, write_record};
use crate::runtime::Error;
use crate::utils::expand_and_resolve;

/// Commandline option: Randomly sample a FASTA file down to a number of records
#[derive(Args)]
pub struct SubsetCMD {
    // Input FASTA, optionally compressed
    #[arg(value_parser = clap::value_parser!(PathBuf))]
    pub path_in: PathBuf,

    // Number of records to keep
    #[arg(short = 'n', long = "num", default_value_t = DEFAULT_SUBSET_NUM)]
    pub num: usize,

    // Remove the output if fewer records were kept
    #[arg(short = 'm', long = "min", default_value_t = DEFAULT_SUBSET_MIN)]
    pub min: usize,

    // Output directory
    #[arg(short = 'o', long = "out-dir", value_parser = clap::value_parser!(PathBuf), default_value = DEFAULT_PATH_SUBSET)]
    pub path_outdir: PathBuf,

    // Seed of the random sampling
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}
impl SubsetCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let params = SubsetParams {
            path_input: self.path_in.clone(),
            path_outdir: self.path_outdir.clone(),
            num: self.num,
            min: self.min,
            seed: self.seed,
        };

        let report = Subset::run(&params)?;
        if report.removed {
            info!(
                "Only took {}, so removing \"{}\"",
                report.num_taken,
                report.path_output.display()
            );
        } else {
            info!(
                "Done, wrote {} sequence{} to \"{}\"",
                report.num_taken,
                if report.num_taken == 1 { "" } else { "s" },
                report.path_output.display()
            );
        }
        Ok(())
    }
}

pub struct SubsetParams {
    pub path_input: PathBuf,
    pub path_outdir: PathBuf,
    pub num: usize,
    pub min: usize,
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub struct SubsetReport {
    pub path_output: PathBuf,
    pub num_records: usize,
    pub num_taken: usize,
    pub removed: bool,
}

/// Algorithm: random subsampling of a FASTA file
pub struct Subset {}
impl Subset {
    /// Chance of keeping a record, at 4 decimals. Everything is kept when
    /// the file is not larger than the wanted number
    pub fn take_fraction(num_records: usize, num_wanted: usize) -> f64 {
        if num_records > num_wanted {
            let p = num_wanted as f64 / num_records as f64;
            (p * 10000.0).round() / 10000.0
        } else {
            1.0
        }
    }

    pub fn run(params: &SubsetParams) -> Result<SubsetReport, Error> {
        if !params.path_input.is_file() {
            return Err(Error::file_not_found(&params.path_input));
        }

        let path_input = expand_and_resolve(&params.path_input)?;
        let path_outdir = expand_and_resolve(&params.path_outdir)?;
        if path_input.parent() == Some(path_outdir.as_path()) {
            return Err(Error::configuration(
                "--out-dir cannot be the directory of the input file",
            ));
        }
        if params.num < 1 {
            return Err(Error::configuration("--num cannot be less than one"));
        }

        fs::create_dir_all(&path_outdir)?;

        let num_records = count_fasta_records(&path_input)?;
        if num_records == 0 {
            return Err(Error::parse_error(
                format!("FASTA file {}", path_input.display()),
                Some("found no records"),
            ));
        }

        let file_name = path_input
            .file_name()
            .ok_or_else(|| Error::file_not_found(&path_input))?;
        let path_output = path_outdir.join(file_name);

        let take_pct = Subset::take_fraction(num_records, params.num);
        let mut rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut num_taken = 0;
        {
            let mut reader = open_fasta(&path_input)?;
            let mut writer = create_fasta_writer(&path_output)?;
            while let Some(record) = reader.next() {
                let record = record.map_err(|e| record_error(&path_input, e))?;
                if rng.gen::<f64>() <= take_pct {
                    write_record(&mut writer, &record)?;
                    num_taken += 1;
                }
                if num_taken >= params.num {
                    break;
                }
            }
            std::io::Write::flush(&mut writer)?;
        }

        let removed = num_taken < params.min;
        if removed {
            warn!("Fewer than {} records kept from {}", params.min, path_input.display());
            fs::remove_file(&path_output)?;
        }

        Ok(SubsetReport {
            path_output,
            num_records,
            num_taken,
            removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_fasta(path: &Path, n: usize) {
        let text: String = (0..n).map(|i| format!(">r{}\nACGT\n", i)).collect();
        fs::write(path, text).unwrap();
    }

    fn params(input: &Path, outdir: &Path, num: usize, min: usize) -> SubsetParams {
        SubsetParams {
            path_input: input.to_path_buf(),
            path_outdir: outdir.to_path_buf(),
            num,
            min,
            seed: Some(7),
        }
    }

    #[test]
    fn fraction_rounded_to_four_decimals() {
        assert_eq!(Subset::take_fraction(3, 1), 0.3333);
        assert_eq!(Subset::take_fraction(10, 10), 1.0);
        assert_eq!(Subset::take_fraction(5, 100), 1.0);
    }

    #[test]
    fn small_file_copied_whole() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("s.fa");
        write_fasta(&input, 5);
        let outdir = dir.path().join("out");

        let report = Subset::run(&params(&input, &outdir, 100, 0)).unwrap();
        assert_eq!(report.num_records, 5);
        assert_eq!(report.num_taken, 5);
        assert!(!report.removed);
        assert_eq!(report.path_output, outdir.join("s.fa"));
        assert_eq!(fs::read_to_string(outdir.join("s.fa")).unwrap(), fs::read_to_string(&input).unwrap());
    }

    #[test]
    fn never_more_than_requested() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("s.fa");
        write_fasta(&input, 200);
        let outdir = dir.path().join("out");

        let report = Subset::run(&params(&input, &outdir, 10, 0)).unwrap();
        assert!(report.num_taken <= 10);
        assert_eq!(count_fasta_records(&report.path_output).unwrap(), report.num_taken);
    }

    #[test]
    fn below_minimum_removed() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("s.fa");
        write_fasta(&input, 3);
        let outdir = dir.path().join("out");

        let report = Subset::run(&params(&input, &outdir, 10, 5)).unwrap();
        assert!(report.removed);
        assert!(!outdir.join("s.fa").exists());
    }

    #[test]
    fn rejected_settings() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("s.fa");
        write_fasta(&input, 3);

        let err = Subset::run(&params(&input, dir.path(), 10, 0)).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let err = Subset::run(&params(&input, &dir.path().join("out"), 0, 0)).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let empty = dir.path().join("empty.fa");
        fs::write(&empty, "").unwrap();
        let err = Subset::run(&params(&empty, &dir.path().join("out"), 10, 0)).unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }
}
