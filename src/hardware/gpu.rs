//! NVIDIA adapter details
//!
//! Queried through nvidia-smi once CUDA has been selected. Any failure
//! (tool missing, non-zero exit, odd output) just means no details.

use serde::{Deserialize, Serialize};
use std::process::Command;

/// Details of the CUDA adapter in use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vram_mb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_version: Option<String>,
}

/// Look up the first NVIDIA adapter using nvidia-smi
pub fn detect_adapter() -> Option<AdapterInfo> {
    let output = Command::new("nvidia-smi")
        .args([
            "--query-gpu=name,memory.total,driver_version",
            "--format=csv,noheader,nounits",
        ])
        .output()
        .map_err(|e| tracing::debug!("nvidia-smi not runnable: {}", e))
        .ok()?;

    if !output.status.success() {
        tracing::debug!(status = %output.status, "nvidia-smi failed");
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let info = parse_nvidia_smi_line(stdout.lines().next()?);
    if let Some(info) = &info {
        tracing::info!(adapter = %info.name, vram_mb = ?info.vram_mb, "CUDA adapter detected");
    }
    info
}

/// Parse one `name, memory.total, driver_version` csv line
pub fn parse_nvidia_smi_line(line: &str) -> Option<AdapterInfo> {
    let parts: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
    if parts.len() < 3 || parts[0].is_empty() {
        return None;
    }

    let vram_mb: u64 = parts[1].parse().ok()?;
    let driver_version = if parts[2].is_empty() {
        None
    } else {
        Some(parts[2].to_string())
    };

    Some(AdapterInfo {
        name: parts[0].to_string(),
        vram_mb: Some(vram_mb),
        driver_version,
    })
}
