use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use log::info;

use crate::fileformat::{create_fasta_writer, open_fasta, record_error, record_id, write_record};
use crate::runtime::Error;

/// Commandline option: Pick the FASTA records listed in an id file
#[derive(Args)]
pub struct ExtractReadsCMD {
    // FASTA reads file
    #[arg(short = 'r', long = "reads", value_parser = clap::value_parser!(PathBuf))]
    pub path_reads: PathBuf,

    // File of read ids, one per line
    #[arg(short = 'i', long = "ids", value_parser = clap::value_parser!(PathBuf))]
    pub path_ids: PathBuf,

    // Output FASTA
    #[arg(short = 'o', long = "out", value_parser = clap::value_parser!(PathBuf))]
    pub path_out: PathBuf,
}
impl ExtractReadsCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let params = ExtractReadsParams {
            path_reads: self.path_reads.clone(),
            path_ids: self.path_ids.clone(),
            path_out: self.path_out.clone(),
        };

        let report = ExtractReads::run(&params)?;
        info!(
            "Done, checked {} took {}, see {}",
            report.num_checked,
            report.num_taken,
            params.path_out.display()
        );
        Ok(())
    }
}

pub struct ExtractReadsParams {
    pub path_reads: PathBuf,
    pub path_ids: PathBuf,
    pub path_out: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ExtractReadsReport {
    pub num_checked: usize,
    pub num_taken: usize,
}

/// Algorithm: filter a FASTA file by read id
pub struct ExtractReads {}
impl ExtractReads {
    /// First word of every non-empty line
    pub fn read_ids(path_ids: &Path) -> Result<HashSet<String>, Error> {
        let file = File::open(path_ids).map_err(|_| Error::file_not_found(path_ids))?;
        let mut ids = HashSet::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if let Some(id) = line.split_whitespace().next() {
                ids.insert(id.to_string());
            }
        }
        Ok(ids)
    }

    pub fn run(params: &ExtractReadsParams) -> Result<ExtractReadsReport, Error> {
        if !params.path_reads.is_file() {
            return Err(Error::file_not_found(&params.path_reads));
        }
        if !params.path_ids.is_file() {
            return Err(Error::file_not_found(&params.path_ids));
        }

        let take_id = ExtractReads::read_ids(&params.path_ids)?;

        let mut reader = open_fasta(&params.path_reads)?;
        let mut writer = create_fasta_writer(&params.path_out)?;

        let mut report = ExtractReadsReport {
            num_checked: 0,
            num_taken: 0,
        };
        while let Some(record) = reader.next() {
            let record = record.map_err(|e| record_error(&params.path_reads, e))?;
            report.num_checked += 1;

            let id = std::str::from_utf8(record_id(&record)).map_err(|e| {
                Error::parse_error(format!("read id in {}", params.path_reads.display()), Some(e.to_string()))
            })?;
            if take_id.contains(id) {
                write_record(&mut writer, &record)?;
                report.num_taken += 1;
            }
        }
        writer.flush()?;
        Ok(report)
    }
}
