pub const DEFAULT_PATH_OUTDIR: &str = "fizkin-out";
pub const DEFAULT_THREADS: usize = 12;
pub const DEFAULT_KMER_SIZE: usize = 20;
pub const DEFAULT_HASH_SIZE: &str = "100M";
pub const DEFAULT_MAX_SEQS: usize = 0;
pub const DEFAULT_DISTANCE: &str = "euclidean";
pub const DEFAULT_RUNNER: &str = "parallel";

pub const DEFAULT_TOOL_JELLYFISH: &str = "jellyfish";
pub const DEFAULT_TOOL_QUERY: &str = "query_per_sequence";
pub const DEFAULT_TOOL_PARALLEL: &str = "parallel";

pub const DEFAULT_SUBSET_NUM: usize = 500000;
pub const DEFAULT_SUBSET_MIN: usize = 0;
pub const DEFAULT_PATH_SUBSET: &str = "subset";
