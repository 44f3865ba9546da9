pub mod collect;
pub mod command;
pub mod counts;
pub mod dataset;
pub mod fileformat;
pub mod matrix;
pub mod plan;
pub mod runtime;
pub mod store;
pub mod tasks;
pub mod utils;
