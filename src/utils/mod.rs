mod command_to_string;
mod detect_software;
mod path_utils;

pub use command_to_string::command_to_string;
pub use command_to_string::shell_quote;
pub(crate) use command_to_string::quote_path;

pub use detect_software::check_tool;
pub use detect_software::tool_program;

pub use path_utils::expand_and_resolve;
