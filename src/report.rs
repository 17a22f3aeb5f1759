//! Probe report and its text/JSON renderings

use serde::Serialize;
use std::fmt;

use crate::error::ProbeResult;
use crate::hardware::{AdapterInfo, SelectedDevice};

const RULE_WIDTH: usize = 50;

/// Outcome of the optional secondary (Metal) probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryStatus {
    /// Module not compiled in
    ModuleAbsent,
    Available,
    Unavailable,
    /// Module present, availability query missing
    CheckMissing,
    /// Not queried because CUDA already won
    Skipped,
}

impl SecondaryStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, SecondaryStatus::Available)
    }
}

/// Result of opening the selected device after the decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeCheck {
    pub ordinal: usize,
    pub opened: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SmokeCheck {
    pub fn run(device: SelectedDevice, ordinal: usize) -> Self {
        match device.open(ordinal) {
            Ok(_) => {
                tracing::info!(device = %device, ordinal, "Smoke check opened device");
                SmokeCheck {
                    ordinal,
                    opened: true,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(device = %device, ordinal, "Smoke check failed: {}", e);
                SmokeCheck {
                    ordinal,
                    opened: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Everything one probe run found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub cuda_available: bool,
    pub metal: SecondaryStatus,
    pub selected: SelectedDevice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter: Option<AdapterInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoke: Option<SmokeCheck>,
}

impl ProbeReport {
    /// The branch the priority order should fire, from the raw flags alone
    pub fn expected(&self) -> SelectedDevice {
        if self.cuda_available {
            SelectedDevice::Cuda
        } else if self.metal.is_available() {
            SelectedDevice::Metal
        } else {
            SelectedDevice::Cpu
        }
    }

    pub fn status_lines(&self) -> Vec<String> {
        let metal_line = match self.metal {
            SecondaryStatus::ModuleAbsent => {
                "Metal module not found (this is normal if the metal feature is not enabled)"
                    .to_string()
            }
            SecondaryStatus::CheckMissing => {
                "Metal module exists but is_available() is not available".to_string()
            }
            SecondaryStatus::Available => "Metal available: true".to_string(),
            SecondaryStatus::Unavailable => "Metal available: false".to_string(),
            SecondaryStatus::Skipped => "Metal not checked (CUDA takes priority)".to_string(),
        };
        vec![format!("CUDA available: {}", self.cuda_available), metal_line]
    }

    pub fn expected_line(&self) -> &'static str {
        match self.expected() {
            SelectedDevice::Cuda => "[OK] CUDA is available -> 'cuda' is selected",
            SelectedDevice::Metal => "[OK] Metal is available -> 'metal' is selected",
            SelectedDevice::Cpu => {
                "[OK] Neither CUDA nor Metal is available -> 'cpu' is selected (normal)"
            }
        }
    }

    pub fn to_json(&self) -> ProbeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(f, "Device selection check")?;
        writeln!(f, "{}", rule)?;
        for line in self.status_lines() {
            writeln!(f, "{}", line)?;
        }

        writeln!(f)?;
        writeln!(f, "Selected device: {}", self.selected)?;
        if let Some(adapter) = &self.adapter {
            write!(f, "Adapter: {}", adapter.name)?;
            if let Some(vram) = adapter.vram_mb {
                write!(f, " ({} MB)", vram)?;
            }
            if let Some(driver) = &adapter.driver_version {
                write!(f, ", driver {}", driver)?;
            }
            writeln!(f)?;
        }
        if let Some(smoke) = &self.smoke {
            match &smoke.error {
                None => writeln!(f, "Smoke check: opened {}:{}", self.selected, smoke.ordinal)?,
                Some(e) => writeln!(
                    f,
                    "Smoke check: failed to open {}:{}: {}",
                    self.selected, smoke.ordinal, e
                )?,
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Expected behaviour:")?;
        writeln!(f, "{}", self.expected_line())?;
        writeln!(f, "{}", rule)
    }
}
