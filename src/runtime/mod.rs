mod error;
mod log;

pub use self::error::Error;
pub use self::log::*;
