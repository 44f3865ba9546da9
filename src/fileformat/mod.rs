mod fasta;

pub use fasta::count_fasta_records;
pub use fasta::create_fasta_writer;
pub use fasta::open_fasta;
pub use fasta::record_id;
pub use fasta::write_record;
pub use fasta::BoxedFastaReader;
pub(crate) use fasta::record_error;
