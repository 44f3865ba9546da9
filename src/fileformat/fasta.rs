use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use seq_io::fasta::Reader as FastaReader;
use seq_io::fasta::Record;

use crate::runtime::Error;

pub type BoxedFastaReader = FastaReader<Box<dyn Read>>;

/// Open a FASTA file, compressed or not
pub fn open_fasta(path: &Path) -> Result<BoxedFastaReader, Error> {
    if !path.is_file() {
        return Err(Error::file_not_found(path));
    }
    let opened_handle = File::open(path)?;

    // Too short to carry a compression magic number
    if opened_handle.metadata()?.len() < 5 {
        return Ok(FastaReader::new(Box::new(opened_handle) as Box<dyn Read>));
    }

    let (reader, compression) = niffler::get_reader(Box::new(opened_handle)).map_err(|e| {
        Error::parse_error(format!("FASTA file {}", path.display()), Some(e.to_string()))
    })?;

    debug!(
        "Opened file {} with compression {:?}",
        path.display(),
        compression
    );
    Ok(FastaReader::new(reader))
}

/// Create a FASTA output file, with its parent directories
pub fn create_fasta_writer(path: &Path) -> Result<BufWriter<File>, Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}

pub(crate) fn record_error(path: &Path, e: seq_io::fasta::Error) -> Error {
    Error::parse_error(format!("FASTA file {}", path.display()), Some(e.to_string()))
}

/// Number of records in a FASTA file
pub fn count_fasta_records(path: &Path) -> Result<usize, Error> {
    let mut reader = open_fasta(path)?;
    let mut n = 0;
    while let Some(record) = reader.next() {
        record.map_err(|e| record_error(path, e))?;
        n += 1;
    }
    Ok(n)
}

/// Record id: the header up to the first whitespace of any kind
pub fn record_id<'a>(record: &'a seq_io::fasta::RefRecord) -> &'a [u8] {
    let head = record.head();
    head.split(|b| b.is_ascii_whitespace()).next().unwrap_or(head)
}

/// Write a record as a header line followed by its sequence on one line
pub fn write_record<W: Write>(writer: &mut W, record: &seq_io::fasta::RefRecord) -> Result<(), Error> {
    record.write(writer)?;
    Ok(())
}
