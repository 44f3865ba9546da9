//! Planners turn the current state of the artifact store into the task
//! list of one phase. Every planner skips work whose artifact already
//! exists, and creates all output directories before returning.

mod count;
mod index;
mod pairwise;
mod subset;

pub use count::count_command;
pub use count::plan_input_counts;
pub use count::plan_kept_counts;
pub use index::built_indexes;
pub use index::plan_index_build;
pub use index::BuiltIndex;
pub use index::IndexParams;
pub use pairwise::plan_pairwise;
pub use pairwise::QueryParams;
pub use subset::plan_subset;

pub const PHASE_SUBSET: &str = "subset";
pub const PHASE_INDEX: &str = "index";
pub const PHASE_PAIRWISE: &str = "pairwise";
pub const PHASE_COUNT_KEPT: &str = "count_kept";
pub const PHASE_COUNT_INPUT: &str = "count_input";
