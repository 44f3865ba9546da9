use path_clean::PathClean;
use std::env;
use std::path::{Path, PathBuf};

use crate::runtime::Error;

/// Absolute, lexically cleaned version of a path. Does NOT require the path to exist
pub fn expand_and_resolve<P: AsRef<Path>>(input: P) -> Result<PathBuf, Error> {
    let input = input.as_ref();
    let abs = if input.is_absolute() {
        input.to_path_buf()
    } else {
        env::current_dir()?.join(input)
    };
    Ok(abs.clean())
}
