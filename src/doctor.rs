use serde::Serialize;
use std::process::Command;

use crate::config::Config;

#[derive(Debug, Serialize)]
pub struct DoctorReport {
    pub version: String,
    pub tools: Vec<ToolStatus>,
}

#[derive(Debug, Serialize)]
pub struct ToolStatus {
    pub name: &'static str,
    pub command: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
}

/// Run the doctor check: verify the clone client and the analyzer can be launched.
pub fn run_doctor(config: &Config) -> DoctorReport {
    let tools = vec![
        check_tool("git", &config.git_command),
        check_tool("analyzer", &config.analyzer_command),
    ];

    DoctorReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        tools,
    }
}

fn check_tool(name: &'static str, command: &str) -> ToolStatus {
    let output = Command::new(command).arg("--version").output();
    let (available, tool_version) = match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty());
            (true, version)
        }
        _ => (false, None),
    };
    ToolStatus {
        name,
        command: command.to_string(),
        available,
        tool_version,
    }
}
