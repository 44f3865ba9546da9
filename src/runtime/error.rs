use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {msg}")]
    Configuration { msg: String },

    #[error("No usable input files from {}", Error::format_specs(specs))]
    NoInput { specs: Vec<std::path::PathBuf> },

    #[error("Cannot have zero-count for input \"{name}\" (count file {:?})", path)]
    ZeroCount {
        name: String,
        path: std::path::PathBuf,
    },

    #[error("Missing or zero sequence total for \"{name}\"; cannot normalize{}", Error::format_msg_as_detail(msg))]
    MissingDenominator { name: String, msg: Option<String> },

    #[error(
        "Runner '{}' failed on task list {:?}{}",
        runner,
        path,
        Error::format_msg_as_detail(msg)
    )]
    Execution {
        runner: String,
        path: std::path::PathBuf,
        msg: Option<String>,
    },

    #[error(
        "Failed trying to execute utility '{utility}'. Make sure it is in your $PATH and you have execution permissions."
    )]
    UtilityNotExecutable { utility: String },

    #[error("Found no kmer indexes in {:?}", path)]
    MissingIndexes { path: std::path::PathBuf },

    #[error("File at {:?} not found.", path)]
    FileNotFound { path: std::path::PathBuf },

    #[error("Failed parsing {}{}", context, Error::format_msg_as_detail(msg))]
    ParseError {
        context: String,
        msg: Option<String>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    #[cold]
    pub fn configuration<M: Into<String>>(msg: M) -> Self {
        Error::Configuration { msg: msg.into() }
    }

    #[cold]
    pub fn no_input(specs: &[std::path::PathBuf]) -> Self {
        Error::NoInput {
            specs: specs.to_vec(),
        }
    }

    #[cold]
    pub fn zero_count<N: Into<String>, P: AsRef<std::path::Path>>(name: N, path: P) -> Self {
        Error::ZeroCount {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn missing_denominator<N: Into<String>, M: Into<String>>(name: N, msg: Option<M>) -> Self {
        Error::MissingDenominator {
            name: name.into(),
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn execution<R: Into<String>, P: AsRef<std::path::Path>, M: Into<String>>(
        runner: R,
        path: P,
        msg: Option<M>,
    ) -> Self {
        Error::Execution {
            runner: runner.into(),
            path: path.as_ref().to_path_buf(),
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn utility_not_executable<U: Into<String>>(utility: U) -> Self {
        Error::UtilityNotExecutable {
            utility: utility.into(),
        }
    }

    #[cold]
    pub fn missing_indexes<P: AsRef<std::path::Path>>(path: P) -> Self {
        Error::MissingIndexes {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn file_not_found<P: AsRef<std::path::Path>>(path: P) -> Self {
        Error::FileNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn parse_error<C: Into<String>, M: Into<String>>(context: C, msg: Option<M>) -> Self {
        Error::ParseError {
            context: context.into(),
            msg: msg.map(|m| m.into()),
        }
    }

    pub fn format_msg_as_detail(msg: &Option<String>) -> String {
        match msg {
            Some(m) => format!(" ({})", m),
            None => String::new(),
        }
    }

    fn format_specs(specs: &[std::path::PathBuf]) -> String {
        specs
            .iter()
            .map(|p| format!("\"{}\"", p.display()))
            .join(", ")
    }
}
