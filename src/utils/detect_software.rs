use log::debug;
use log::info;
use std::process::Command;

use crate::runtime::Error;

/// The program part of a tool setting such as "sh /opt/query.sh"
pub fn tool_program(tool: &str) -> &str {
    tool.split_whitespace().next().unwrap_or(tool)
}

/// Check that a tool can be spawned at all; its exit status is irrelevant
pub fn check_tool(tool: &str) -> Result<(), Error> {
    let program = tool_program(tool);
    debug!("Checking for {}", program);
    if let Ok(_output) = Command::new(program).arg("--version").output() {
        info!("Found {}", program);
        Ok(())
    } else {
        Err(Error::utility_not_executable(program))
    }
}
