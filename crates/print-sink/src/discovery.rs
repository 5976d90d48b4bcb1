//! System printer discovery via CUPS.

use std::process::Command;

use serde::Serialize;
use tracing::debug;

use crate::{Result, SinkError};

/// A printer visible to CUPS.
#[derive(Debug, Clone, Serialize)]
pub struct PrinterInfo {
    pub name: String,
    pub status: String,
    pub is_default: bool,
    /// Whether the driver accepts a darkness option. Determined once here
    /// from the queue name CUPS exposes; consumers only read the flag.
    pub supports_darkness: bool,
}

/// List printers known to CUPS, marking the system default.
pub fn list_printers() -> Result<Vec<PrinterInfo>> {
    let output = Command::new("lpstat")
        .arg("-p")
        .output()
        .map_err(|source| SinkError::CommandLaunch {
            command: "lpstat -p".to_string(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        if stderr.contains("No destinations added") || stderr.contains("No printers") {
            return Ok(Vec::new());
        }
        return Err(SinkError::CommandFailed {
            command: "lpstat -p".to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    let default = query_default_printer();
    let printers = parse_printer_list(&stdout, default.as_deref());
    debug!(count = printers.len(), default = ?default, "Listed system printers");
    Ok(printers)
}

/// Resolve a printer by name, falling back to the system default.
pub fn resolve_printer(name: Option<&str>) -> Result<PrinterInfo> {
    let mut printers = list_printers()?;
    match name {
        Some(wanted) => printers
            .into_iter()
            .find(|p| p.name == wanted)
            .ok_or_else(|| SinkError::PrinterNotFound(wanted.to_string())),
        None => {
            if printers.is_empty() {
                return Err(SinkError::NoPrinters);
            }
            let idx = printers.iter().position(|p| p.is_default).unwrap_or(0);
            Ok(printers.swap_remove(idx))
        }
    }
}

fn query_default_printer() -> Option<String> {
    let output = Command::new("lpstat").arg("-d").output().ok()?;
    if !output.status.success() {
        return None;
    }
    parse_default_line(&String::from_utf8_lossy(&output.stdout))
}

fn parse_default_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("system default destination:"))
        .map(|rest| rest.trim().to_string())
        .filter(|name| !name.is_empty())
}

fn parse_printer_list(stdout: &str, default: Option<&str>) -> Vec<PrinterInfo> {
    let mut printers = Vec::new();

    for line in stdout.lines() {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix("printer ") else {
            continue;
        };

        let mut parts = rest.splitn(2, ' ');
        let Some(name) = parts.next() else {
            continue;
        };
        let status = parts
            .next()
            .and_then(|s| s.strip_prefix("is "))
            .map(|s| s.trim().trim_end_matches('.').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        printers.push(PrinterInfo {
            name: name.to_string(),
            status,
            is_default: default == Some(name),
            supports_darkness: supports_darkness(name),
        });
    }

    printers
}

/// Case-insensitive vendor check for darkness support.
fn supports_darkness(name: &str) -> bool {
    name.to_lowercase().contains("zebra")
}
